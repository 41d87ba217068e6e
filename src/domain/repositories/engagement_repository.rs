// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::{EngagementCounts, EngagementEvent};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 存储中的数据无法映射为领域模型
    #[error("Corrupted record: {0}")]
    Corrupted(String),
}

/// 互动事件仓库特质
///
/// 事件只追加不修改。聚合查询必须覆盖该文档的全部历史事件
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// 追加一条事件，返回带存储ID的事件
    async fn append(&self, event: &EngagementEvent) -> Result<EngagementEvent, RepositoryError>;
    /// 单次查询统计各类事件数量和最近事件时间
    async fn aggregate(&self, document_id: i64) -> Result<EngagementCounts, RepositoryError>;
}
