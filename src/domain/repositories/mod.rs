// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 互动事件仓库（engagement_repository）：追加用户互动事件并按文档聚合
/// - 新闻仓库（news_repository）：批量写入新闻主数据
pub mod engagement_repository;
pub mod news_repository;
