// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

use crate::domain::models::discovery::DiscoveryRequest;
use crate::domain::models::result_page::ResultPage;
use crate::domain::search::engine::SearchExecutor;
use crate::domain::services::query_builder::QueryBuilder;
use crate::domain::services::result_mapper::ResultMapper;
use crate::utils::deadline::within_deadline;
use crate::utils::errors::RankingError;

/// 排名服务
///
/// 发现请求的唯一入口：校验、构建查询、执行搜索、映射结果。
/// 三个外部调用严格顺序执行，共享同一个请求截止时间
#[derive(Clone)]
pub struct RankingService {
    executor: Arc<dyn SearchExecutor>,
    builder: QueryBuilder,
    mapper: ResultMapper,
    request_timeout: Duration,
}

impl RankingService {
    pub fn new(
        executor: Arc<dyn SearchExecutor>,
        builder: QueryBuilder,
        mapper: ResultMapper,
        request_timeout: Duration,
    ) -> Self {
        Self {
            executor,
            builder,
            mapper,
            request_timeout,
        }
    }

    /// 执行一次发现请求
    ///
    /// 校验在任何 I/O 之前完成；截止时间在任一阶段到期都会中止整个流水线
    ///
    /// # 错误
    ///
    /// * `RankingError::InvalidInput` - 请求参数非法
    /// * `RankingError::Upstream` - 搜索引擎或语言模型失败，或截止时间到期
    /// * `RankingError::Parse` - 意图解析输出格式错误
    /// * `RankingError::Mapping` - 搜索结果结构不符合预期
    pub async fn discover(&self, request: DiscoveryRequest) -> Result<ResultPage, RankingError> {
        let mode = request.mode.name();
        counter!("discovery_requests_total", "mode" => mode).increment(1);
        let start = std::time::Instant::now();

        let result = self.run(request).await;

        histogram!("discovery_request_duration_seconds", "mode" => mode)
            .record(start.elapsed().as_secs_f64());
        match &result {
            Ok(page) => info!(
                mode,
                total_records = page.total_records,
                "Discovery request served"
            ),
            Err(e) => {
                counter!("discovery_failures_total", "kind" => e.kind()).increment(1);
                error!(mode, kind = e.kind(), "Discovery request failed: {}", e);
            }
        }
        result
    }

    async fn run(&self, request: DiscoveryRequest) -> Result<ResultPage, RankingError> {
        let request = request.validate()?;
        let deadline = Instant::now() + self.request_timeout;

        let query = self.builder.build(&request, Utc::now(), deadline).await?;
        let raw = within_deadline(deadline, "search", self.executor.search(&query)).await??;
        self.mapper.map(&raw, &request, deadline).await
    }
}
