// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 错误类型、请求截止时间和遥测初始化
pub mod deadline;
pub mod errors;
pub mod telemetry;
