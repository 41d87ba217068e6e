// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::news::{NewsDocument, NewsFeedItem};
use crate::domain::repositories::engagement_repository::RepositoryError;
use async_trait::async_trait;

/// 新闻主数据仓库特质
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// 在一个事务中写入一批新闻，返回带分配ID的索引文档，顺序与输入一致
    async fn insert_batch(&self, items: &[NewsFeedItem]) -> Result<Vec<NewsDocument>, RepositoryError>;
    /// 已存储的新闻数量
    async fn count(&self) -> Result<u64, RepositoryError>;
}
