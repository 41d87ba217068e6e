// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：发现请求、新闻文档、互动事件和结果页
/// - 仓库接口（repositories）：互动事件存储抽象
/// - 搜索接口（search）：查询规格以及搜索执行和热度写回的抽象
/// - 服务（services）：排名、意图、摘要和热度聚合
///
/// 领域层只依赖抽象接口，外部实现位于基础设施层。
pub mod models;
pub mod repositories;
pub mod search;
pub mod services;
