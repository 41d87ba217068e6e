// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use newsrank::config::settings::ElasticSettings;
use newsrank::domain::models::discovery::Pagination;
use newsrank::domain::models::engagement::TrendingScoreUpdate;
use newsrank::domain::search::engine::{SearchError, SearchExecutor, TrendingScoreSink};
use newsrank::domain::services::query_builder::category_query;
use newsrank::infrastructure::search::elastic::ElasticClient;
use serde_json::{json, Value};
use wiremock::matchers::{basic_auth, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer, username: Option<&str>) -> ElasticSettings {
    ElasticSettings {
        url: server.uri(),
        index: "news".to_string(),
        timeout_secs: 5,
        username: username.map(str::to_string),
        password: username.map(|_| "secret".to_string()),
    }
}

fn update() -> TrendingScoreUpdate {
    TrendingScoreUpdate {
        document_id: 42,
        score: 17.0,
        last_event_time: Utc::now(),
    }
}

#[tokio::test]
async fn test_search_posts_query_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_search"))
        .and(body_partial_json(json!({
            "query": { "term": { "category": "sports" } },
            "from": 5,
            "size": 5,
            "track_total_hits": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "total": { "value": 0, "relation": "eq" }, "hits": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, None)).unwrap();
    let query = category_query("sports", &Pagination::new(Some(2), Some(5)));
    let raw = client.search(&query).await.unwrap();

    assert_eq!(raw["hits"]["total"]["value"], 0);
}

#[tokio::test]
async fn test_search_error_status_is_engine_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "type": "parsing_exception" }, "status": 400
        })))
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, None)).unwrap();
    let query = category_query("sports", &Pagination::default());
    let err = client.search(&query).await.unwrap_err();

    match err {
        SearchError::EngineError(message) => assert!(message.contains("400")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_write_score_updates_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_update_by_query"))
        .and(basic_auth("elastic", "secret"))
        .and(body_partial_json(json!({
            "query": { "term": { "id": { "value": 42 } } },
            "script": { "params": { "recent_activity_score": 17.0 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updated": 1, "failures": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, Some("elastic"))).unwrap();
    client.write_score(&update()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["script"]["params"]["last_event_time"].is_string());
}

#[tokio::test]
async fn test_write_score_reports_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_update_by_query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updated": 0,
            "failures": [ { "id": "abc", "cause": { "type": "version_conflict_engine_exception" } } ]
        })))
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, None)).unwrap();
    let err = client.write_score(&update()).await.unwrap_err();
    assert!(matches!(err, SearchError::EngineError(_)));
}

#[tokio::test]
async fn test_write_score_non_success_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/news/_update_by_query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, None)).unwrap();
    assert!(client.write_score(&update()).await.is_err());
}

#[tokio::test]
async fn test_ensure_index_creates_missing_index() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/news"))
        .and(body_partial_json(json!({
            "mappings": { "properties": { "location": { "type": "geo_point" } } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, None)).unwrap();
    client.ensure_index().await.unwrap();
}

#[tokio::test]
async fn test_ensure_index_leaves_existing_index() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ElasticClient::new(&settings(&server, None)).unwrap();
    client.ensure_index().await.unwrap();
}
