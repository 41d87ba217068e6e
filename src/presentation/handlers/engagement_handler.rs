// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::activity_request::{ActivityRequestDto, ActivityResponseDto};
use crate::domain::services::engagement_service::EngagementService;
use crate::utils::errors::RankingError;

/// 记录用户对新闻的互动
///
/// 事件持久化后返回 202，热度分数由后台工作器异步更新
///
/// # 错误
///
/// * 400 - 新闻ID、用户ID或互动类型非法
/// * 500 - 存储写入失败
pub async fn record_activity(
    Extension(service): Extension<Arc<EngagementService>>,
    Path(news_id): Path<i64>,
    Json(payload): Json<ActivityRequestDto>,
) -> Result<(StatusCode, Json<ActivityResponseDto>), RankingError> {
    payload.validate()?;
    let kind = payload.kind().map_err(RankingError::InvalidInput)?;

    let event = service
        .record(news_id, payload.user_id, kind, payload.activity_time)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(event.into())))
}
