// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索领域模块
///
/// 定义搜索引擎的抽象接口（查询执行与热度分数写回）
/// 以及不可变的查询规格 `QuerySpec`
pub mod engine;
pub mod query;
