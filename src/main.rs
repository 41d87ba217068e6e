// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use newsrank::config::settings::Settings;
use newsrank::domain::repositories::engagement_repository::EngagementRepository;
use newsrank::domain::services::engagement_service::EngagementService;
use newsrank::domain::services::ingestion_service::IngestionService;
use newsrank::domain::services::intent_resolver::IntentResolver;
use newsrank::domain::services::llm_service::{LLMService, LLMServiceTrait};
use newsrank::domain::services::query_builder::QueryBuilder;
use newsrank::domain::services::ranking_service::RankingService;
use newsrank::domain::services::result_mapper::ResultMapper;
use newsrank::domain::services::summarizer::Summarizer;
use newsrank::domain::services::trending_aggregator::TrendingAggregator;
use newsrank::infrastructure::cache::summary_cache::SummaryCache;
use newsrank::infrastructure::database::connection;
use newsrank::infrastructure::repositories::engagement_repo_impl::EngagementRepositoryImpl;
use newsrank::infrastructure::repositories::news_repo_impl::NewsRepositoryImpl;
use newsrank::infrastructure::search::elastic::ElasticClient;
use newsrank::presentation::routes;
use newsrank::utils::telemetry;
use newsrank::workers::trending_worker::{TrendingQueue, TrendingWorker};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting newsrank...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    newsrank::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and apply migrations
    let db = Arc::new(connection::create_pool(&settings.database).await?);

    // 4. Search engine
    let elastic = Arc::new(ElasticClient::new(&settings.elastic)?);
    if let Err(e) = elastic.ensure_index().await {
        warn!("Could not verify index {}: {}", elastic.index(), e);
    }

    if let Some(seed_file) = &settings.ingestion.seed_file {
        let ingestion = IngestionService::new(
            Arc::new(NewsRepositoryImpl::new(db.clone())),
            elastic.clone(),
            settings.ingestion.batch_size,
        );
        match ingestion.seed_once(seed_file).await {
            Ok(Some(report)) => info!("Seeded {} news documents", report.indexed),
            Ok(None) => {}
            Err(e) => warn!("News seed from {} failed: {}", seed_file, e),
        }
    }

    // 5. Language model
    let llm: Arc<dyn LLMServiceTrait> = Arc::new(LLMService::new(&settings.llm)?);
    let mut summarizer = Summarizer::new(llm.clone());
    if settings.summary_cache.enabled {
        summarizer = summarizer.with_cache(Arc::new(SummaryCache::from_settings(
            &settings.summary_cache,
        )));
        info!("Summary cache enabled");
    }

    // 6. Ranking pipeline
    let ranking = Arc::new(RankingService::new(
        elastic.clone(),
        QueryBuilder::new(IntentResolver::new(llm)),
        ResultMapper::new(summarizer),
        settings.ranking.request_timeout(),
    ));

    // 7. Trending pipeline
    let repo: Arc<dyn EngagementRepository> = Arc::new(EngagementRepositoryImpl::new(db.clone()));
    let aggregator = Arc::new(TrendingAggregator::new(
        repo.clone(),
        elastic.clone(),
        settings.trending.batch_size,
        settings.trending.decay_lambda,
    ));
    let (queue, receiver) = TrendingQueue::bounded(settings.trending.queue_capacity);
    let worker = TrendingWorker::new(aggregator, settings.trending.max_concurrent_flushes);
    tokio::spawn(worker.run(receiver));

    let engagement = Arc::new(EngagementService::new(repo, queue));

    // 8. Start HTTP server
    let app = routes::routes(ranking, engagement);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
