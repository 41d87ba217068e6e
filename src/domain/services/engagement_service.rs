// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::domain::models::engagement::{EngagementEvent, EventKind};
use crate::domain::repositories::engagement_repository::EngagementRepository;
use crate::utils::errors::RankingError;
use crate::workers::trending_worker::TrendingQueue;

/// 互动服务
///
/// 先持久化事件，再投递给热度队列；事件一旦写入存储就恰好转发一次
#[derive(Clone)]
pub struct EngagementService {
    repo: Arc<dyn EngagementRepository>,
    queue: TrendingQueue,
}

impl EngagementService {
    pub fn new(repo: Arc<dyn EngagementRepository>, queue: TrendingQueue) -> Self {
        Self { repo, queue }
    }

    /// 记录一次用户互动
    ///
    /// # 参数
    ///
    /// * `document_id` - 新闻ID
    /// * `actor_id` - 用户ID
    /// * `kind` - 互动类型
    /// * `occurred_at` - 发生时间，缺省为当前时间
    ///
    /// # 错误
    ///
    /// * `RankingError::InvalidInput` - ID 非正数
    /// * `RankingError::Upstream` - 存储写入失败或热度队列已关闭
    pub async fn record(
        &self,
        document_id: i64,
        actor_id: i64,
        kind: EventKind,
        occurred_at: Option<DateTime<Utc>>,
    ) -> Result<EngagementEvent, RankingError> {
        if document_id <= 0 {
            return Err(RankingError::InvalidInput("invalid news id".to_string()));
        }
        if actor_id <= 0 {
            return Err(RankingError::InvalidInput("invalid user id".to_string()));
        }

        let event = EngagementEvent::new(
            document_id,
            actor_id,
            kind,
            occurred_at.unwrap_or_else(Utc::now),
        );
        let stored = self.repo.append(&event).await?;
        info!(
            document_id,
            actor_id,
            kind = %kind,
            "Engagement event stored"
        );

        self.queue.enqueue(stored.clone()).await?;
        Ok(stored)
    }
}
