// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;

use crate::application::dto::news_query::FetchNewsQuery;
use crate::domain::models::discovery::{DiscoveryMode, DiscoveryRequest};
use crate::domain::models::result_page::ResultPage;
use crate::domain::services::ranking_service::RankingService;
use crate::utils::errors::RankingError;

type DiscoveryResponse = Result<Json<ResultPage>, RankingError>;

async fn discover(service: &RankingService, request: DiscoveryRequest) -> DiscoveryResponse {
    service.discover(request).await.map(Json)
}

/// 按分类获取新闻
pub async fn by_category(
    Extension(service): Extension<Arc<RankingService>>,
    Path(category): Path<String>,
    Query(params): Query<FetchNewsQuery>,
) -> DiscoveryResponse {
    let request = DiscoveryRequest::new(DiscoveryMode::Category { category }, params.pagination());
    discover(&service, request).await
}

/// 获取相关性分数不低于阈值的新闻
pub async fn by_score(
    Extension(service): Extension<Arc<RankingService>>,
    Path(score): Path<f64>,
    Query(params): Query<FetchNewsQuery>,
) -> DiscoveryResponse {
    let request = DiscoveryRequest::new(DiscoveryMode::Score { score }, params.pagination());
    discover(&service, request).await
}

/// 按来源获取新闻
pub async fn by_source(
    Extension(service): Extension<Arc<RankingService>>,
    Path(source): Path<String>,
    Query(params): Query<FetchNewsQuery>,
) -> DiscoveryResponse {
    let request = DiscoveryRequest::new(DiscoveryMode::Source { source }, params.pagination());
    discover(&service, request).await
}

/// 全文搜索，`q` 为查询文本
pub async fn search(
    Extension(service): Extension<Arc<RankingService>>,
    Query(params): Query<FetchNewsQuery>,
) -> DiscoveryResponse {
    discover(&service, params.search()).await
}

/// 获取指定位置附近的新闻，`radius` 单位为公里
pub async fn nearby(
    Extension(service): Extension<Arc<RankingService>>,
    Query(params): Query<FetchNewsQuery>,
) -> DiscoveryResponse {
    discover(&service, params.nearby()).await
}

/// 获取指定位置的热门新闻
pub async fn trending(
    Extension(service): Extension<Arc<RankingService>>,
    Query(params): Query<FetchNewsQuery>,
) -> DiscoveryResponse {
    discover(&service, params.trending()).await
}
