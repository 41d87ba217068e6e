// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 领域层抽象接口的具体实现，负责与外部系统交互。
///
/// 包含的子模块：
/// - 缓存（cache）：摘要结果的进程内缓存
/// - 数据库（database）：数据库连接和实体映射
/// - 指标（metrics）：Prometheus 指标导出
/// - 仓库实现（repositories）：互动事件存储
/// - 搜索（search）：Elasticsearch REST 适配器
pub mod cache;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod search;
