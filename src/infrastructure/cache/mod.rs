// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 按整页描述缓存语言模型生成的摘要
pub mod summary_cache;
