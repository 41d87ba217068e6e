// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use newsrank::config::settings::ElasticSettings;
use newsrank::domain::repositories::news_repository::NewsRepository;
use newsrank::domain::services::ingestion_service::{IngestionError, IngestionService};
use newsrank::infrastructure::repositories::news_repo_impl::NewsRepositoryImpl;
use newsrank::infrastructure::search::elastic::ElasticClient;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::setup_db;

const FEED: &str = r#"[
    {"id": "9f1c", "title": "Metro line opens", "description": "New route connects suburbs",
     "url": "https://news.example/metro", "publication_date": "2025-04-10T07:45:00",
     "source_name": "City Herald", "category": ["transport", "city"],
     "relevance_score": 0.72, "latitude": 12.97, "longitude": 77.59},
    {"id": "9f1d", "title": "Monsoon arrives early", "description": "IMD confirms onset",
     "url": "https://news.example/monsoon", "publication_date": "2025-05-29T11:00:00",
     "source_name": "Weather Desk", "category": ["weather"],
     "relevance_score": 0.4, "latitude": 0, "longitude": 0},
    {"id": "9f1e", "title": "", "url": "https://news.example/blank"}
]"#;

fn elastic(server: &MockServer) -> Arc<ElasticClient> {
    let settings = ElasticSettings {
        url: server.uri(),
        index: "news".to_string(),
        timeout_secs: 5,
        username: None,
        password: None,
    };
    Arc::new(ElasticClient::new(&settings).unwrap())
}

/// Splits an NDJSON bulk body into (action, source) pairs.
fn bulk_pairs(body: &[u8]) -> Vec<(Value, Value)> {
    let text = std::str::from_utf8(body).unwrap();
    assert!(text.ends_with('\n'));
    let lines: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    lines
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

#[tokio::test]
async fn test_feed_file_is_stored_and_bulk_indexed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_bulk"))
        .and(header("content-type", "application/x-ndjson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 3, "errors": false, "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let db = setup_db().await;
    let repo = Arc::new(NewsRepositoryImpl::new(db));
    let service = IngestionService::new(repo.clone(), elastic(&server), 100);

    let feed_path = std::env::temp_dir().join(format!("newsrank-feed-{}.json", std::process::id()));
    tokio::fs::write(&feed_path, FEED).await.unwrap();
    let report = service.seed_once(&feed_path).await.unwrap().unwrap();
    tokio::fs::remove_file(&feed_path).await.unwrap();

    assert_eq!(report.stored, 2);
    assert_eq!(report.indexed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(repo.count().await.unwrap(), 2);

    let requests = server.received_requests().await.unwrap();
    let pairs = bulk_pairs(&requests[0].body);
    assert_eq!(pairs.len(), 2);

    let (action, metro) = &pairs[0];
    assert_eq!(action["index"]["_id"], metro["id"].to_string());
    assert_eq!(metro["title"], "Metro line opens");
    assert_eq!(metro["category"], json!(["transport", "city"]));
    assert_eq!(metro["location"], json!({ "lat": 12.97, "lon": 77.59 }));
    assert_eq!(metro["publication_date"], "2025-04-10T07:45:00Z");

    let (_, monsoon) = &pairs[1];
    assert!(monsoon.get("location").is_none());
    assert!(monsoon.get("recent_activity_score").is_none());
    assert_ne!(monsoon["id"], metro["id"]);
}

#[tokio::test]
async fn test_seed_is_skipped_once_news_exist() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errors": false })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = Arc::new(NewsRepositoryImpl::new(setup_db().await));
    let service = IngestionService::new(repo.clone(), elastic(&server), 100);
    let items = newsrank::domain::services::ingestion_service::parse_feed(FEED).unwrap();
    service.ingest(items).await.unwrap();

    let outcome = service.seed_once("missing-feed.json").await.unwrap();
    assert!(outcome.is_none());
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_bulk_item_errors_fail_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": { "_id": "2", "status": 400,
                    "error": { "type": "mapper_parsing_exception",
                               "reason": "failed to parse field [location]" } } }
            ]
        })))
        .mount(&server)
        .await;

    let repo = Arc::new(NewsRepositoryImpl::new(setup_db().await));
    let service = IngestionService::new(repo, elastic(&server), 100);
    let items = newsrank::domain::services::ingestion_service::parse_feed(FEED).unwrap();

    let err = service.ingest(items).await.unwrap_err();
    match err {
        IngestionError::Index(e) => assert!(e.to_string().contains("failed to parse field [location]")),
        other => panic!("unexpected error: {:?}", other),
    }
}
