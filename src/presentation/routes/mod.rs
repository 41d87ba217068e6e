// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::Method,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::services::engagement_service::EngagementService;
use crate::domain::services::ranking_service::RankingService;
use crate::presentation::handlers::{engagement_handler, news_handler};

/// 创建应用路由
///
/// 发现和互动接口位于 `/api/v1` 下，健康检查和版本接口位于根路径
///
/// # 参数
///
/// * `ranking` - 排名服务
/// * `engagement` - 互动服务
pub fn routes(ranking: Arc<RankingService>, engagement: Arc<EngagementService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/news/category/{category}", get(news_handler::by_category))
        .route("/news/score/{score}", get(news_handler::by_score))
        .route("/news/search", get(news_handler::search))
        .route("/news/source/{source}", get(news_handler::by_source))
        .route("/news/nearby", get(news_handler::nearby))
        .route("/news/{id}/activity", post(engagement_handler::record_activity))
        .route("/trending", get(news_handler::trending));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(Extension(ranking))
        .layer(Extension(engagement))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
