// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 热度事件的有界队列和后台刷新工作器
pub mod trending_worker;
