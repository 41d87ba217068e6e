// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use tokio::time::Instant;

use crate::utils::errors::RankingError;

/// 在请求截止时间内执行一个外部调用
///
/// 截止时间到期时放弃整个流水线（不重试），返回 `RankingError::Upstream`
///
/// # 参数
///
/// * `deadline` - 请求级截止时间
/// * `stage` - 当前阶段名称，仅用于错误信息
/// * `fut` - 外部调用
pub async fn within_deadline<F, T, E>(
    deadline: Instant,
    stage: &'static str,
    fut: F,
) -> Result<Result<T, E>, RankingError>
where
    F: Future<Output = Result<T, E>>,
{
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| RankingError::Upstream(format!("deadline exceeded during {}", stage)))
}
