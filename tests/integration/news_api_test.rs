// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use newsrank::domain::models::engagement::EventKind;
use newsrank::domain::models::result_page::ResultPage;
use serde_json::{json, Value};

use super::helpers::{create_test_app, StubLlm, StubSearch};

fn hits() -> Value {
    json!({
        "hits": {
            "total": { "value": 11, "relation": "eq" },
            "hits": [
                { "_source": {
                    "id": 1,
                    "title": "Monsoon arrives early",
                    "description": "Rain across the west coast",
                    "url": "https://news.example/monsoon",
                    "publication_date": "2025-06-01T06:00:00Z",
                    "source_name": "Coastal Times",
                    "category": ["weather"],
                    "relevance_score": 0.64,
                    "location": { "lat": 18.52, "lon": 73.85 }
                } }
            ]
        }
    })
}

fn no_intent() -> &'static str {
    r#"{"entities": [], "intent": []}"#
}

#[tokio::test]
async fn test_category_route_returns_envelope() {
    let app = create_test_app(
        StubSearch::new(hits()),
        StubLlm::new(no_intent(), r#"["Monsoon reached the coast a week early."]"#),
    )
    .await;

    let response = app
        .server
        .get("/api/v1/news/category/weather")
        .add_query_param("p", 2)
        .add_query_param("l", 5)
        .await;

    response.assert_status_ok();
    let page: ResultPage = response.json();
    assert_eq!(page.total_records, 11);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page_number, 2);
    assert_eq!(page.articles.len(), 1);
    assert_eq!(
        page.articles[0].llm_summary.as_deref(),
        Some("Monsoon reached the coast a week early.")
    );
    assert_eq!(page.articles[0].latitude, 18.52);
    assert_eq!(page.search_query["mode"], "category");
    assert_eq!(page.search_query["category"], "weather");

    let body = app.search.bodies.lock().unwrap()[0].clone();
    assert_eq!(body["from"], 5);
}

#[tokio::test]
async fn test_invalid_input_is_bad_request_without_calls() {
    let app = create_test_app(StubSearch::new(hits()), StubLlm::new(no_intent(), "[]")).await;

    let response = app.server.get("/api/v1/news/score/-1").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid score");

    let response = app
        .server
        .get("/api/v1/trending")
        .add_query_param("long", 77.2)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "invalid latitude");

    let response = app.server.get("/api/v1/news/search").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(app.search.calls(), 0);
    assert_eq!(app.llm.calls(), 0);
}

#[tokio::test]
async fn test_nearby_normalizes_radius() {
    let app = create_test_app(
        StubSearch::new(hits()),
        StubLlm::new(no_intent(), r#"["summary"]"#),
    )
    .await;

    let response = app
        .server
        .get("/api/v1/news/nearby")
        .add_query_param("lat", 18.5)
        .add_query_param("long", 73.8)
        .add_query_param("radius", 0)
        .await;

    response.assert_status_ok();
    let page: ResultPage = response.json();
    assert_eq!(page.search_query["radius"], 10);

    let body = app.search.bodies.lock().unwrap()[0].clone();
    assert_eq!(body["query"]["geo_distance"]["distance"], "10km");
}

#[tokio::test]
async fn test_malformed_intent_is_server_error() {
    let app = create_test_app(
        StubSearch::new(hits()),
        StubLlm::new("```json\n{}\n```", "[]"),
    )
    .await;

    let response = app
        .server
        .get("/api/v1/news/search")
        .add_query_param("q", "election results")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>()["error"].is_string());
    assert_eq!(app.search.calls(), 0);
}

#[tokio::test]
async fn test_record_activity_is_accepted_and_queued() {
    let mut app = create_test_app(StubSearch::new(hits()), StubLlm::new(no_intent(), "[]")).await;

    let response = app
        .server
        .post("/api/v1/news/15/activity")
        .json(&json!({ "user_id": 3, "activity_type": "share" }))
        .await;

    response.assert_status(StatusCode::ACCEPTED);
    let body: Value = response.json();
    assert_eq!(body["news_id"], 15);
    assert_eq!(body["activity_type"], "share");
    assert!(body["id"].is_number());

    let queued = app.trending_rx.recv().await.unwrap();
    assert_eq!(queued.document_id, 15);
    assert_eq!(queued.kind, EventKind::Share);
}

#[tokio::test]
async fn test_record_activity_rejects_unknown_type() {
    let mut app = create_test_app(StubSearch::new(hits()), StubLlm::new(no_intent(), "[]")).await;

    let response = app
        .server
        .post("/api/v1/news/15/activity")
        .json(&json!({ "user_id": 3, "activity_type": "bookmark" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.trending_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app(StubSearch::new(hits()), StubLlm::new(no_intent(), "[]")).await;

    app.server.get("/health").await.assert_text("OK");
    app.server
        .get("/v1/version")
        .await
        .assert_text(env!("CARGO_PKG_VERSION"));
}
