// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use tokio::time::Instant;

use crate::domain::models::discovery::{DiscoveryMode, DiscoveryRequest, Pagination};
use crate::domain::models::intent::{IntentResult, IntentTag};
use crate::domain::models::news::GeoPoint;
use crate::domain::search::query::QuerySpec;
use crate::domain::services::intent_resolver::IntentResolver;
use crate::utils::errors::RankingError;

/// 标题字段权重
pub const TITLE_BOOST: u32 = 3;
/// 相关性分数的开方增益系数
pub const RELEVANCE_BOOST_WEIGHT: f64 = 5.0;
/// 热度查询的空间衰减尺度
pub const TRENDING_DISTANCE_SCALE: &str = "50km";
/// 热度查询的时间衰减尺度
pub const TRENDING_RECENCY_SCALE: &str = "24h";
/// 两个高斯衰减函数在尺度距离处的衰减值
pub const TRENDING_DECAY: f64 = 0.5;

/// 查询构建器
///
/// 把已校验的发现请求翻译为搜索引擎查询。除全文模式需要先解析意图外，
/// 各模式的构建函数都是纯函数
#[derive(Clone)]
pub struct QueryBuilder {
    resolver: IntentResolver,
}

impl QueryBuilder {
    pub fn new(resolver: IntentResolver) -> Self {
        Self { resolver }
    }

    /// 为已校验的请求构建查询
    ///
    /// 全文模式会在截止时间内同步调用意图解析，失败直接向上传播，
    /// 不会退化为普通文本搜索
    ///
    /// # 参数
    ///
    /// * `request` - 经过 `DiscoveryRequest::validate` 的请求
    /// * `now` - 热度模式时间衰减的原点
    /// * `deadline` - 请求截止时间
    pub async fn build(
        &self,
        request: &DiscoveryRequest,
        now: DateTime<Utc>,
        deadline: Instant,
    ) -> Result<QuerySpec, RankingError> {
        let page = &request.pagination;
        let spec = match &request.mode {
            DiscoveryMode::Category { category } => category_query(category, page),
            DiscoveryMode::Score { score } => score_query(*score, page),
            DiscoveryMode::Source { source } => source_query(source, page),
            DiscoveryMode::Nearby { lat, long, radius } => {
                nearby_query(GeoPoint::new(*lat, *long), *radius, page)
            }
            DiscoveryMode::Search { query } => {
                let intent = self.resolver.resolve(query, deadline).await?;
                search_query(query, &intent, page)
            }
            DiscoveryMode::Trending { lat, long } => {
                trending_query(GeoPoint::new(*lat, *long), now, page)
            }
        };
        Ok(spec)
    }
}

/// 分类精确匹配，按发布时间倒序
pub fn category_query(category: &str, page: &Pagination) -> QuerySpec {
    QuerySpec::new(
        json!({ "term": { "category": category } }),
        vec![json!({ "publication_date": { "order": "desc" } })],
        page,
    )
}

/// 相关性分数下限过滤，按相关性分数倒序
pub fn score_query(threshold: f64, page: &Pagination) -> QuerySpec {
    QuerySpec::new(
        json!({ "range": { "relevance_score": { "gte": threshold } } }),
        vec![json!({ "relevance_score": { "order": "desc" } })],
        page,
    )
}

/// 来源名称短语匹配，按发布时间倒序
pub fn source_query(source: &str, page: &Pagination) -> QuerySpec {
    QuerySpec::new(
        json!({ "match_phrase": { "source_name": source } }),
        vec![json!({ "publication_date": { "order": "desc" } })],
        page,
    )
}

/// 半径内的地理距离过滤，按弧线距离升序，忽略没有位置的文档
pub fn nearby_query(point: GeoPoint, radius_km: i64, page: &Pagination) -> QuerySpec {
    let location = json!({ "lat": point.lat, "lon": point.lon });
    QuerySpec::new(
        json!({
            "geo_distance": {
                "distance": format!("{}km", radius_km),
                "location": location,
            }
        }),
        vec![json!({
            "_geo_distance": {
                "location": location,
                "order": "asc",
                "unit": "km",
                "distance_type": "arc",
                "ignore_unmapped": true,
            }
        })],
        page,
    )
}

/// 全文检索
///
/// 布尔 should 子句：始终包含标题（权重 3）与描述的模糊多字段匹配，
/// 再加上由意图派生的 terms 子句，至少命中一个。
/// 总分 = 匹配分 + sqrt(relevance_score) × 5
pub fn search_query(text: &str, intent: &IntentResult, page: &Pagination) -> QuerySpec {
    let mut should = vec![json!({
        "multi_match": {
            "query": text,
            "fields": [format!("title^{}", TITLE_BOOST), "description"],
            "type": "best_fields",
            "fuzziness": "AUTO",
        }
    })];
    should.extend(intent_clauses(intent));

    QuerySpec::new(
        json!({
            "function_score": {
                "query": {
                    "bool": {
                        "should": should,
                        "minimum_should_match": 1,
                    }
                },
                "boost_mode": "sum",
                "score_mode": "sum",
                "functions": [
                    {
                        "field_value_factor": {
                            "field": "relevance_score",
                            "factor": 1,
                            "modifier": "sqrt",
                            "missing": 0,
                        },
                        "weight": RELEVANCE_BOOST_WEIGHT,
                    }
                ],
            }
        }),
        Vec::new(),
        page,
    )
}

/// 意图派生的 terms 子句
///
/// `category` → 分类字段；`source` → 来源名称的 keyword 子字段。
/// 没有实体时不生成子句
pub fn intent_clauses(intent: &IntentResult) -> Vec<Value> {
    if intent.entities.is_empty() {
        return Vec::new();
    }
    let entities: Vec<&str> = intent.entities.iter().map(String::as_str).collect();

    intent
        .intent
        .iter()
        .filter_map(|tag| match tag {
            IntentTag::Category => Some(json!({ "terms": { "category": entities } })),
            IntentTag::Source => Some(json!({ "terms": { "source_name.keyword": entities } })),
            IntentTag::Latest | IntentTag::Nearby => None,
        })
        .collect()
}

/// 按位置的热门新闻
///
/// 三个独立因子求和而非相乘：存储的热度分数、以请求位置为中心的空间高斯衰减、
/// 以当前时间为中心的时间高斯衰减
pub fn trending_query(point: GeoPoint, now: DateTime<Utc>, page: &Pagination) -> QuerySpec {
    QuerySpec::new(
        json!({
            "function_score": {
                "query": { "match_all": {} },
                "boost_mode": "sum",
                "score_mode": "sum",
                "functions": [
                    {
                        "field_value_factor": {
                            "field": "recent_activity_score",
                            "factor": 1.0,
                            "missing": 0,
                        }
                    },
                    {
                        "gauss": {
                            "location": {
                                "origin": { "lat": point.lat, "lon": point.lon },
                                "scale": TRENDING_DISTANCE_SCALE,
                                "offset": "0km",
                                "decay": TRENDING_DECAY,
                            }
                        }
                    },
                    {
                        "gauss": {
                            "last_event_time": {
                                "origin": now.to_rfc3339_opts(SecondsFormat::Secs, true),
                                "scale": TRENDING_RECENCY_SCALE,
                                "decay": TRENDING_DECAY,
                            }
                        }
                    }
                ],
            }
        }),
        Vec::new(),
        page,
    )
}
