// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 用户互动事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    View,
    Click,
    Share,
    Like,
}

impl EventKind {
    /// 热度计算中的权重：like > share > view > click
    pub fn weight(self) -> u64 {
        match self {
            EventKind::Like => 4,
            EventKind::Share => 3,
            EventKind::View => 2,
            EventKind::Click => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::View => "view",
            EventKind::Click => "click",
            EventKind::Share => "share",
            EventKind::Like => "like",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(EventKind::View),
            "click" => Ok(EventKind::Click),
            "share" => Ok(EventKind::Share),
            "like" => Ok(EventKind::Like),
            other => Err(format!("unknown activity type: {}", other)),
        }
    }
}

/// 用户互动事件
///
/// 只追加：写入持久化存储一次后，恰好转发给热度聚合器一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    /// 存储分配的ID，写入前为 None
    pub id: Option<i64>,
    pub document_id: i64,
    pub kind: EventKind,
    pub actor_id: i64,
    pub occurred_at: DateTime<Utc>,
}

impl EngagementEvent {
    pub fn new(document_id: i64, actor_id: i64, kind: EventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            document_id,
            kind,
            actor_id,
            occurred_at,
        }
    }
}

/// 某个文档全部历史事件的聚合结果
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngagementCounts {
    pub likes: u64,
    pub shares: u64,
    pub views: u64,
    pub clicks: u64,
    pub last_event_time: Option<DateTime<Utc>>,
}

impl EngagementCounts {
    /// 加权互动总数：likes×4 + shares×3 + views×2 + clicks×1
    pub fn weighted_total(&self) -> u64 {
        self.likes * EventKind::Like.weight()
            + self.shares * EventKind::Share.weight()
            + self.views * EventKind::View.weight()
            + self.clicks * EventKind::Click.weight()
    }

    pub fn total_events(&self) -> u64 {
        self.likes + self.shares + self.views + self.clicks
    }
}

/// 写回搜索引擎的热度分数，覆盖该文档之前的值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingScoreUpdate {
    pub document_id: i64,
    pub score: f64,
    pub last_event_time: DateTime<Utc>,
}
