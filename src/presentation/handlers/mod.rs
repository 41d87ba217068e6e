// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 处理器只负责参数提取和响应转换，业务逻辑位于领域服务
pub mod engagement_handler;
pub mod news_handler;
