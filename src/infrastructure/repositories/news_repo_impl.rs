// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::news::{GeoPoint, NewsDocument, NewsFeedItem};
use crate::domain::repositories::engagement_repository::RepositoryError;
use crate::domain::repositories::news_repository::NewsRepository;
use crate::infrastructure::database::entities::news;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;

/// 新闻仓库实现
#[derive(Clone)]
pub struct NewsRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl NewsRepositoryImpl {
    /// 创建新的新闻仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_active_model(item: &NewsFeedItem) -> news::ActiveModel {
    let location = item.location();
    news::ActiveModel {
        title: Set(item.title.clone()),
        description: Set(item.description.clone()),
        url: Set(item.url.clone()),
        publication_date: Set(item.published_at().map(Into::into)),
        source_name: Set(item.source_name.clone()),
        category: Set(item.category.join(",")),
        relevance_score: Set(item.relevance_score),
        latitude: Set(location.map(|point| point.lat)),
        longitude: Set(location.map(|point| point.lon)),
        ..Default::default()
    }
}

impl From<news::Model> for NewsDocument {
    fn from(model: news::Model) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        };
        Self {
            id: i64::from(model.id),
            title: model.title,
            description: model.description,
            url: model.url,
            publication_date: model.publication_date.map(|ts| ts.with_timezone(&Utc)),
            source_name: model.source_name,
            category: model
                .category
                .split(',')
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            relevance_score: model.relevance_score,
            location,
            recent_activity_score: None,
            last_event_time: None,
        }
    }
}

#[async_trait]
impl NewsRepository for NewsRepositoryImpl {
    async fn insert_batch(&self, items: &[NewsFeedItem]) -> Result<Vec<NewsDocument>, RepositoryError> {
        let txn = self.db.begin().await?;
        let mut documents = Vec::with_capacity(items.len());
        for item in items {
            let model = to_active_model(item).insert(&txn).await?;
            documents.push(NewsDocument::from(model));
        }
        txn.commit().await?;
        Ok(documents)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(news::Entity::find().count(self.db.as_ref()).await?)
    }
}
