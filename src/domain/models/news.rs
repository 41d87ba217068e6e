// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 地理坐标点，对应索引中的 `geo_point` 字段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// 索引中的新闻文档投影（`_source`）
///
/// 搜索引擎是排名字段（`relevance_score`、`recent_activity_score`、
/// `last_event_time`）的唯一记录系统
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDocument {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_activity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event_time: Option<DateTime<Utc>>,
}

/// 返回给客户端的新闻视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub source_name: String,
    pub category: Vec<String>,
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_summary: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<NewsDocument> for NewsArticle {
    fn from(doc: NewsDocument) -> Self {
        let (latitude, longitude) = doc
            .location
            .map(|point| (point.lat, point.lon))
            .unwrap_or_default();

        Self {
            title: doc.title,
            description: doc.description,
            url: doc.url,
            publication_date: doc.publication_date,
            source_name: doc.source_name,
            category: doc.category,
            relevance_score: doc.relevance_score,
            llm_summary: None,
            latitude,
            longitude,
        }
    }
}

/// 新闻源文件中的一条原始记录
///
/// 文件中的 `id` 字段不使用，文档ID由新闻表分配
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsFeedItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl NewsFeedItem {
    /// 标题和链接不能为空
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// 发布时间，接受不带时区的 `YYYY-MM-DDTHH:MM:SS`（按 UTC）或 RFC 3339
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.publication_date.as_deref()?.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(naive.and_utc());
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// 坐标点；两个坐标都为 0 时视为未设置
    pub fn location(&self) -> Option<GeoPoint> {
        if self.latitude == 0.0 && self.longitude == 0.0 {
            None
        } else {
            Some(GeoPoint::new(self.latitude, self.longitude))
        }
    }
}
