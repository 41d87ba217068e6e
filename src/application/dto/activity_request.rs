// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::engagement::{EngagementEvent, EventKind};

/// 用户互动请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ActivityRequestDto {
    #[validate(range(min = 1, message = "invalid user id"))]
    pub user_id: i64,
    #[validate(custom(function = "validate_activity_type"))]
    pub activity_type: String,
    /// 缺省为服务端当前时间
    pub activity_time: Option<DateTime<Utc>>,
}

impl ActivityRequestDto {
    /// 校验通过后的互动类型
    pub fn kind(&self) -> Result<EventKind, String> {
        self.activity_type.trim().to_lowercase().parse()
    }
}

fn validate_activity_type(value: &str) -> Result<(), ValidationError> {
    value
        .trim()
        .to_lowercase()
        .parse::<EventKind>()
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("activity_type");
            err.message = Some("activity_type must be one of view, click, share, like".into());
            err
        })
}

/// 已记录的互动事件
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponseDto {
    pub id: Option<i64>,
    pub news_id: i64,
    pub user_id: i64,
    pub activity_type: EventKind,
    pub activity_time: DateTime<Utc>,
}

impl From<EngagementEvent> for ActivityResponseDto {
    fn from(event: EngagementEvent) -> Self {
        Self {
            id: event.id,
            news_id: event.document_id,
            user_id: event.actor_id,
            activity_type: event.kind,
            activity_time: event.occurred_at,
        }
    }
}
