// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{error, warn};

use crate::domain::models::discovery::DiscoveryRequest;
use crate::domain::models::news::{NewsArticle, NewsDocument};
use crate::domain::models::result_page::ResultPage;
use crate::domain::services::summarizer::Summarizer;
use crate::utils::deadline::within_deadline;
use crate::utils::errors::RankingError;

/// 结果映射器
///
/// 把原始命中转换为分页结果页，并按位置合并整页摘要
#[derive(Clone)]
pub struct ResultMapper {
    summarizer: Summarizer,
}

impl ResultMapper {
    pub fn new(summarizer: Summarizer) -> Self {
        Self { summarizer }
    }

    /// 映射原始搜索响应
    ///
    /// 摘要生成失败时降级为不带摘要的结果；摘要数量与命中数量不一致时
    /// 同样不附加摘要，避免把摘要错配到其他文章上
    ///
    /// # 错误
    ///
    /// * `RankingError::Mapping` - 响应缺少总数或命中列表，或文档无法解码
    /// * `RankingError::Upstream` - 摘要阶段截止时间到期
    pub async fn map(
        &self,
        raw: &Value,
        request: &DiscoveryRequest,
        deadline: Instant,
    ) -> Result<ResultPage, RankingError> {
        let (documents, total_records) = decode_hits(raw)?;

        let summaries = if documents.is_empty() {
            None
        } else {
            let descriptions: Vec<String> =
                documents.iter().map(|doc| doc.description.clone()).collect();
            match within_deadline(deadline, "summarization", self.summarizer.summarize(&descriptions))
                .await?
            {
                Ok(summaries) => Some(summaries),
                Err(e) => {
                    warn!("Summary generation failed, returning articles without summaries: {}", e);
                    None
                }
            }
        };

        let articles = attach_summaries(documents, summaries);

        Ok(ResultPage {
            articles,
            total_pages: request.pagination.total_pages(total_records),
            total_records,
            page_number: request.pagination.page_number,
            search_query: request.to_search_query(),
        })
    }
}

/// 从原始响应中解出文档列表和总命中数
///
/// `hits.total` 既可以是 `{ "value": n }` 对象也可以是数字
pub fn decode_hits(raw: &Value) -> Result<(Vec<NewsDocument>, u64), RankingError> {
    let hits = raw.get("hits").and_then(Value::as_object).ok_or_else(|| {
        error!("Unexpected response from search engine: {}", raw);
        RankingError::Mapping("response has no hits object".to_string())
    })?;

    let total = hits
        .get("total")
        .and_then(|total| match total {
            Value::Object(obj) => obj.get("value").and_then(Value::as_u64),
            other => other.as_u64(),
        })
        .ok_or_else(|| RankingError::Mapping("response has no total hit count".to_string()))?;

    let list = hits
        .get("hits")
        .and_then(Value::as_array)
        .ok_or_else(|| RankingError::Mapping("response has no hit list".to_string()))?;

    let documents = list
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            let source = hit
                .get("_source")
                .ok_or_else(|| RankingError::Mapping(format!("hit {} has no _source", i)))?;
            NewsDocument::deserialize(source)
                .map_err(|e| RankingError::Mapping(format!("hit {}: {}", i, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((documents, total))
}

/// 按位置合并摘要，数量不一致时全部不附加
pub fn attach_summaries(
    documents: Vec<NewsDocument>,
    summaries: Option<Vec<String>>,
) -> Vec<NewsArticle> {
    let mut articles: Vec<NewsArticle> = documents.into_iter().map(NewsArticle::from).collect();

    match summaries {
        Some(summaries) if summaries.len() == articles.len() => {
            for (article, summary) in articles.iter_mut().zip(summaries) {
                article.llm_summary = Some(summary);
            }
        }
        Some(summaries) => {
            warn!(
                "Summary count {} does not match article count {}, dropping summaries",
                summaries.len(),
                articles.len()
            );
        }
        None => {}
    }
    articles
}
