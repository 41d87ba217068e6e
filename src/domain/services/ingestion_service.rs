// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::news::NewsFeedItem;
use crate::domain::repositories::engagement_repository::RepositoryError;
use crate::domain::repositories::news_repository::NewsRepository;
use crate::domain::search::engine::{DocumentIndexer, SearchError};

/// 导入错误类型
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read news file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed news file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to store news: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Failed to index news: {0}")]
    Index(#[from] SearchError),
}

/// 导入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// 写入新闻表的记录数
    pub stored: usize,
    /// 写入索引的文档数
    pub indexed: usize,
    /// 缺少标题或链接而跳过的记录数
    pub skipped: usize,
}

/// 新闻导入服务
///
/// 先按批写入新闻表取得文档ID，再把同一批文档写入搜索索引
pub struct IngestionService {
    repo: Arc<dyn NewsRepository>,
    indexer: Arc<dyn DocumentIndexer>,
    batch_size: usize,
}

impl IngestionService {
    pub fn new(
        repo: Arc<dyn NewsRepository>,
        indexer: Arc<dyn DocumentIndexer>,
        batch_size: usize,
    ) -> Self {
        Self {
            repo,
            indexer,
            batch_size: batch_size.max(1),
        }
    }

    /// 读取 JSON 数组格式的新闻文件并导入
    pub async fn ingest_file(&self, path: impl AsRef<Path>) -> Result<IngestionReport, IngestionError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let items = parse_feed(&raw)?;
        info!("Loaded {} news records from {}", items.len(), path.display());
        self.ingest(items).await
    }

    /// 仅当新闻表为空时导入文件，返回 `None` 表示已跳过
    pub async fn seed_once(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<IngestionReport>, IngestionError> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            info!("News table already holds {} records, skipping seed", existing);
            return Ok(None);
        }
        self.ingest_file(path).await.map(Some)
    }

    /// 导入一组记录
    ///
    /// 某一批失败时立即返回错误，之前已完成的批次保留
    pub async fn ingest(&self, items: Vec<NewsFeedItem>) -> Result<IngestionReport, IngestionError> {
        let total = items.len();
        let valid: Vec<NewsFeedItem> = items.into_iter().filter(NewsFeedItem::is_valid).collect();
        let mut report = IngestionReport {
            skipped: total - valid.len(),
            ..Default::default()
        };
        if report.skipped > 0 {
            warn!("Skipping {} news records without title or url", report.skipped);
        }

        for batch in valid.chunks(self.batch_size) {
            let documents = self.repo.insert_batch(batch).await?;
            report.stored += documents.len();

            report.indexed += self.indexer.index_documents(&documents).await?;
            counter!("news_ingested_total").increment(documents.len() as u64);
        }

        info!(
            stored = report.stored,
            indexed = report.indexed,
            skipped = report.skipped,
            "News ingestion finished"
        );
        Ok(report)
    }
}

/// 解析新闻文件内容（JSON 数组）
pub fn parse_feed(raw: &str) -> Result<Vec<NewsFeedItem>, serde_json::Error> {
    serde_json::from_str(raw)
}
