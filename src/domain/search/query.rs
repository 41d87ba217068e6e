// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};

use crate::domain::models::discovery::Pagination;

/// 查询规格
///
/// 每个请求新建一次，交给执行器后不再修改。字段只能由查询构建器设置
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    query: Value,
    sort: Vec<Value>,
    from: u64,
    size: u64,
}

impl QuerySpec {
    pub(crate) fn new(query: Value, sort: Vec<Value>, pagination: &Pagination) -> Self {
        Self {
            query,
            sort,
            from: pagination.offset(),
            size: pagination.limit,
        }
    }

    pub fn query(&self) -> &Value {
        &self.query
    }

    pub fn sort(&self) -> &[Value] {
        &self.sort
    }

    pub fn from(&self) -> u64 {
        self.from
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// 渲染为 Elasticsearch `_search` 请求体
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "query": self.query,
            "from": self.from,
            "size": self.size,
            "track_total_hits": true,
        });
        if !self.sort.is_empty() {
            body["sort"] = Value::Array(self.sort.clone());
        }
        body
    }
}
