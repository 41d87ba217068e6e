// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// HTTP 请求与领域模型之间的数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 发现请求、查询构建、排名和热度聚合
pub mod domain;

/// 基础设施模块
///
/// 搜索引擎、语言模型之外的外部集成：数据库、缓存、指标
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 错误类型、截止时间和遥测
pub mod utils;

/// 工作器模块
///
/// 热度事件的后台处理
pub mod workers;
