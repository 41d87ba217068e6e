// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use newsrank::domain::models::engagement::EngagementEvent;
use newsrank::domain::search::engine::{SearchError, SearchExecutor};
use newsrank::domain::search::query::QuerySpec;
use newsrank::domain::services::engagement_service::EngagementService;
use newsrank::domain::services::intent_resolver::IntentResolver;
use newsrank::domain::services::llm_service::{LLMServiceTrait, LlmError};
use newsrank::domain::services::query_builder::QueryBuilder;
use newsrank::domain::services::ranking_service::RankingService;
use newsrank::domain::services::result_mapper::ResultMapper;
use newsrank::domain::services::summarizer::Summarizer;
use newsrank::infrastructure::repositories::engagement_repo_impl::EngagementRepositoryImpl;
use newsrank::presentation::routes;
use newsrank::workers::trending_worker::TrendingQueue;
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

/// Search engine stand-in returning a fixed response.
pub struct StubSearch {
    response: Value,
    pub calls: AtomicUsize,
    pub bodies: Mutex<Vec<Value>>,
}

impl StubSearch {
    pub fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchExecutor for StubSearch {
    async fn search(&self, query: &QuerySpec) -> Result<Value, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(query.to_body());
        Ok(self.response.clone())
    }
}

/// Language model stand-in: intent prompts get `intent`, everything else gets `summary`.
pub struct StubLlm {
    intent: String,
    summary: String,
    pub calls: AtomicUsize,
}

impl StubLlm {
    pub fn new(intent: &str, summary: &str) -> Arc<Self> {
        Arc::new(Self {
            intent: intent.to_string(),
            summary: summary.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LLMServiceTrait for StubLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.starts_with("You extract news query info") {
            Ok(self.intent.clone())
        } else {
            Ok(self.summary.clone())
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub search: Arc<StubSearch>,
    pub llm: Arc<StubLlm>,
    pub trending_rx: mpsc::Receiver<EngagementEvent>,
}

pub async fn create_test_app(search: Arc<StubSearch>, llm: Arc<StubLlm>) -> TestApp {
    let ranking = Arc::new(RankingService::new(
        search.clone(),
        QueryBuilder::new(IntentResolver::new(llm.clone())),
        ResultMapper::new(Summarizer::new(llm.clone())),
        Duration::from_secs(5),
    ));

    let repo = Arc::new(EngagementRepositoryImpl::new(setup_db().await));
    let (queue, trending_rx) = TrendingQueue::bounded(16);
    let engagement = Arc::new(EngagementService::new(repo, queue));

    let server = TestServer::new(routes::routes(ranking, engagement)).unwrap();

    TestApp {
        server,
        search,
        llm,
        trending_rx,
    }
}
