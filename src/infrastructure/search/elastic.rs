// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::settings::ElasticSettings;
use crate::domain::models::engagement::TrendingScoreUpdate;
use crate::domain::models::news::NewsDocument;
use crate::domain::search::engine::{
    DocumentIndexer, SearchError, SearchExecutor, TrendingScoreSink,
};
use crate::domain::search::query::QuerySpec;

const TRENDING_UPDATE_SCRIPT: &str = "ctx._source.recent_activity_score = params.recent_activity_score; ctx._source.last_event_time = params.last_event_time;";

/// Elasticsearch REST 客户端
///
/// 在单个新闻索引上执行查询和热度分数写回
#[derive(Clone)]
pub struct ElasticClient {
    client: reqwest::Client,
    base_url: Url,
    index: String,
    credentials: Option<(String, Option<String>)>,
}

impl ElasticClient {
    /// 根据配置创建客户端
    ///
    /// # 错误
    ///
    /// * `SearchError::EngineError` - 地址无法解析或 HTTP 客户端无法构建
    pub fn new(settings: &ElasticSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| SearchError::EngineError(format!("failed to build client: {}", e)))?;

        // A trailing slash keeps any path prefix when joining endpoints
        let mut base = settings.url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| SearchError::EngineError(format!("invalid url {}: {}", settings.url, e)))?;

        let credentials = settings
            .username
            .clone()
            .filter(|user| !user.is_empty())
            .map(|user| (user, settings.password.clone()));

        Ok(Self {
            client,
            base_url,
            index: settings.index.clone(),
            credentials,
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// 索引不存在时创建索引和字段映射
    pub async fn ensure_index(&self) -> Result<(), SearchError> {
        let url = self.endpoint("")?;
        let response = self
            .request(Method::HEAD, url.clone())
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                debug!("Index {} already exists", self.index);
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                info!("Creating index {}", self.index);
                self.execute(self.request(Method::PUT, url).json(&index_mapping()))
                    .await
                    .map(|_| ())
            }
            status => Err(SearchError::EngineError(format!(
                "index check returned {}",
                status
            ))),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, SearchError> {
        let relative = if path.is_empty() {
            self.index.clone()
        } else {
            format!("{}/{}", self.index, path)
        };
        self.base_url
            .join(&relative)
            .map_err(|e| SearchError::EngineError(format!("invalid endpoint {}: {}", relative, e)))
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_ref()),
            None => builder,
        }
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<Value, SearchError> {
        let response = builder
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::EngineError(format!("{} - {}", status, body)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SearchExecutor for ElasticClient {
    async fn search(&self, query: &QuerySpec) -> Result<Value, SearchError> {
        let url = self.endpoint("_search")?;
        let body = query.to_body();
        debug!(query = %body, "Executing search");
        self.execute(self.request(Method::POST, url).json(&body)).await
    }
}

#[async_trait]
impl TrendingScoreSink for ElasticClient {
    async fn write_score(&self, update: &TrendingScoreUpdate) -> Result<(), SearchError> {
        let url = self.endpoint("_update_by_query")?;
        let response = self
            .execute(self.request(Method::POST, url).json(&update_body(update)))
            .await?;

        match response.get("failures").and_then(Value::as_array) {
            Some(failures) if !failures.is_empty() => Err(SearchError::EngineError(format!(
                "update failed for document {}: {}",
                update.document_id,
                Value::Array(failures.clone())
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentIndexer for ElasticClient {
    async fn index_documents(&self, documents: &[NewsDocument]) -> Result<usize, SearchError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let url = self.endpoint("_bulk")?;
        let body = bulk_body(documents)?;
        let response = self
            .execute(
                self.request(Method::POST, url)
                    .header(CONTENT_TYPE, "application/x-ndjson")
                    .body(body),
            )
            .await?;

        if response.get("errors").and_then(Value::as_bool).unwrap_or(false) {
            let reason = first_bulk_error(&response).unwrap_or_else(|| "unknown".to_string());
            return Err(SearchError::EngineError(format!("bulk index failed: {}", reason)));
        }
        debug!("Indexed {} documents into {}", documents.len(), self.index);
        Ok(documents.len())
    }
}

/// 批量写入请求体（NDJSON），每个文档一行动作一行数据，以换行结尾
pub fn bulk_body(documents: &[NewsDocument]) -> Result<String, SearchError> {
    let mut body = String::new();
    for document in documents {
        let action = json!({ "index": { "_id": document.id.to_string() } });
        let source = serde_json::to_string(document)
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
        body.push_str(&action.to_string());
        body.push('\n');
        body.push_str(&source);
        body.push('\n');
    }
    Ok(body)
}

fn first_bulk_error(response: &Value) -> Option<String> {
    response
        .get("items")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("index")?.get("error"))
        .map(|error| {
            error
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string())
        })
        .next()
}

/// 热度分数写回请求体，按文档 `id` 精确定位
pub fn update_body(update: &TrendingScoreUpdate) -> Value {
    json!({
        "query": {
            "term": { "id": { "value": update.document_id } }
        },
        "script": {
            "source": TRENDING_UPDATE_SCRIPT,
            "lang": "painless",
            "params": {
                "recent_activity_score": update.score,
                "last_event_time": update.last_event_time.to_rfc3339(),
            }
        }
    })
}

/// 新闻索引的字段映射
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "long" },
                "title": { "type": "text" },
                "description": { "type": "text" },
                "url": { "type": "keyword" },
                "publication_date": { "type": "date" },
                "source_name": {
                    "type": "text",
                    "fields": { "keyword": { "type": "keyword" } }
                },
                "category": { "type": "keyword" },
                "relevance_score": { "type": "float" },
                "location": { "type": "geo_point" },
                "recent_activity_score": { "type": "float" },
                "last_event_time": { "type": "date" }
            }
        }
    })
}
