// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::TrendingScoreUpdate;
use crate::domain::models::news::NewsDocument;
use crate::domain::search::query::QuerySpec;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("Search engine error: {0}")]
    EngineError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

/// 查询执行器
///
/// 在固定的新闻索引上执行查询，返回原始响应体（包含总命中数和命中列表）。
/// 失败时必须返回明确的错误，不允许返回部分结果
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn search(&self, query: &QuerySpec) -> Result<Value, SearchError>;
}

/// 热度分数写入端
///
/// 按文档ID定向更新 `recent_activity_score` 与 `last_event_time`
#[async_trait]
pub trait TrendingScoreSink: Send + Sync {
    async fn write_score(&self, update: &TrendingScoreUpdate) -> Result<(), SearchError>;
}

/// 文档写入端
///
/// 以文档ID为索引键批量写入，重复写入同一ID会覆盖原文档。
/// 任一文档失败时整批返回错误
#[async_trait]
pub trait DocumentIndexer: Send + Sync {
    async fn index_documents(&self, documents: &[NewsDocument]) -> Result<usize, SearchError>;
}
