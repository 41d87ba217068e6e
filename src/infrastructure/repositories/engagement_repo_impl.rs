// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::engagement::{EngagementCounts, EngagementEvent, EventKind};
use crate::domain::repositories::engagement_repository::{EngagementRepository, RepositoryError};
use crate::infrastructure::database::entities::user_activity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::*;
use std::sync::Arc;

/// 互动事件仓库实现
#[derive(Clone)]
pub struct EngagementRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl EngagementRepositoryImpl {
    /// 创建新的互动事件仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountsRow {
    likes: Option<i64>,
    shares: Option<i64>,
    views: Option<i64>,
    clicks: Option<i64>,
    last_event_time: Option<DateTimeWithTimeZone>,
}

fn count_of(kind: EventKind) -> SimpleExpr {
    Expr::cust(format!(
        "SUM(CASE WHEN activity_type = '{}' THEN 1 ELSE 0 END)",
        kind.as_str()
    ))
}

fn to_count(value: Option<i64>, column: &str) -> Result<u64, RepositoryError> {
    u64::try_from(value.unwrap_or(0))
        .map_err(|_| RepositoryError::Corrupted(format!("negative {} count", column)))
}

impl TryFrom<user_activity::Model> for EngagementEvent {
    type Error = RepositoryError;

    fn try_from(model: user_activity::Model) -> Result<Self, Self::Error> {
        let kind = model
            .activity_type
            .parse::<EventKind>()
            .map_err(RepositoryError::Corrupted)?;
        Ok(Self {
            id: Some(i64::from(model.id)),
            document_id: model.news_id,
            kind,
            actor_id: model.user_id,
            occurred_at: model.activity_time.with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl EngagementRepository for EngagementRepositoryImpl {
    async fn append(&self, event: &EngagementEvent) -> Result<EngagementEvent, RepositoryError> {
        let active_model = user_activity::ActiveModel {
            user_id: Set(event.actor_id),
            news_id: Set(event.document_id),
            activity_type: Set(event.kind.as_str().to_string()),
            activity_time: Set(event.occurred_at.into()),
            ..Default::default()
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        EngagementEvent::try_from(model)
    }

    async fn aggregate(&self, document_id: i64) -> Result<EngagementCounts, RepositoryError> {
        let row = user_activity::Entity::find()
            .select_only()
            .column_as(count_of(EventKind::Like), "likes")
            .column_as(count_of(EventKind::Share), "shares")
            .column_as(count_of(EventKind::View), "views")
            .column_as(count_of(EventKind::Click), "clicks")
            .column_as(user_activity::Column::ActivityTime.max(), "last_event_time")
            .filter(user_activity::Column::NewsId.eq(document_id))
            .into_model::<CountsRow>()
            .one(self.db.as_ref())
            .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(EngagementCounts::default()),
        };

        Ok(EngagementCounts {
            likes: to_count(row.likes, "like")?,
            shares: to_count(row.shares, "share")?,
            views: to_count(row.views, "view")?,
            clicks: to_count(row.clicks, "click")?,
            last_event_time: row.last_event_time.map(|ts| ts.with_timezone(&Utc)),
        })
    }
}
