// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::services::llm_service::LLMServiceTrait;
use crate::infrastructure::cache::summary_cache::SummaryCache;
use crate::utils::errors::RankingError;

const SUMMARY_PROMPT: &str = "Generate a one or two sentence summary for each of the given articles, in the same order.
Give the output as a JSON array of strings with exactly one entry per article, with no explanation, no markdown, no code block, no backticks.
Use escape characters where required.
Articles: ";

/// 摘要生成器
///
/// 一次调用覆盖整页文档，返回与输入等长（期望）的摘要列表
#[derive(Clone)]
pub struct Summarizer {
    llm: Arc<dyn LLMServiceTrait>,
    cache: Option<Arc<SummaryCache>>,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LLMServiceTrait>) -> Self {
        Self { llm, cache: None }
    }

    pub fn with_cache(mut self, cache: Arc<SummaryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// 为一页文档描述批量生成摘要
    ///
    /// 不校验返回数量，数量对齐由结果映射器负责
    ///
    /// # 错误
    ///
    /// * `RankingError::Upstream` - 语言模型调用失败
    /// * `RankingError::Parse` - 返回内容不是字符串数组
    pub async fn summarize(&self, texts: &[String]) -> Result<Vec<String>, RankingError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(texts) {
                debug!("Summary cache hit for {} articles", texts.len());
                return Ok(hit);
            }
        }

        let articles = serde_json::to_string(texts)
            .map_err(|e| RankingError::Parse(format!("summary input: {}", e)))?;
        let prompt = format!("{}{}", SUMMARY_PROMPT, articles);
        let raw = self.llm.generate(&prompt).await?;

        let summaries = serde_json::from_str::<Vec<String>>(raw.trim()).map_err(|e| {
            error!("Summary JSON parse error: {} - raw: {}", e, raw);
            RankingError::Parse(format!("summary response: {}", e))
        })?;

        if let Some(cache) = &self.cache {
            cache.insert(texts, summaries.clone());
        }
        Ok(summaries)
    }
}
