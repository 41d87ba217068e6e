// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::engagement_repository::RepositoryError;
use crate::domain::search::engine::SearchError;
use crate::domain::services::llm_service::LlmError;
use crate::workers::trending_worker::QueueError;

/// 排名服务错误类型
///
/// 客户端可见的四类错误。除 `InvalidInput` 外均视为服务端错误
#[derive(Error, Debug)]
pub enum RankingError {
    /// 请求校验失败，客户端可修正
    #[error("{0}")]
    InvalidInput(String),

    /// 外部搜索引擎或 LLM 调用失败
    #[error("上游服务错误: {0}")]
    Upstream(String),

    /// 上游返回的数据格式错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 搜索结果结构不符合预期
    #[error("结果映射错误: {0}")]
    Mapping(String),
}

impl RankingError {
    /// 错误类别标签，用于指标和日志
    pub fn kind(&self) -> &'static str {
        match self {
            RankingError::InvalidInput(_) => "invalid_input",
            RankingError::Upstream(_) => "upstream",
            RankingError::Parse(_) => "parse",
            RankingError::Mapping(_) => "mapping",
        }
    }
}

impl From<SearchError> for RankingError {
    fn from(err: SearchError) -> Self {
        RankingError::Upstream(err.to_string())
    }
}

impl From<LlmError> for RankingError {
    fn from(err: LlmError) -> Self {
        RankingError::Upstream(err.to_string())
    }
}

impl From<RepositoryError> for RankingError {
    fn from(err: RepositoryError) -> Self {
        RankingError::Upstream(err.to_string())
    }
}

impl From<QueueError> for RankingError {
    fn from(err: QueueError) -> Self {
        RankingError::Upstream(err.to_string())
    }
}
