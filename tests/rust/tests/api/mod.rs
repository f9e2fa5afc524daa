//! HTTP API tests driving the axum router in-process.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use mcpscout_core::{
    Aggregator, AggregatorConfig, MemoryCacheStore, SourceAdapter,
};
use mcpscout_server::{router, AppState};
use mcpscout_storage::{seed_sample_mcps, Database, SqliteMcpRepository};
use tests::fixtures::{search_result, WEATHER_JSON};
use tests::{CountingAdapter, HangingAdapter};

async fn test_state(adapters: Vec<Arc<dyn SourceAdapter>>) -> AppState {
    let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
    let mcps = Arc::new(SqliteMcpRepository::new(db));
    seed_sample_mcps(mcps.as_ref()).await.unwrap();

    let aggregator = Arc::new(
        Aggregator::new(adapters, Arc::new(MemoryCacheStore::new())).with_config(
            AggregatorConfig {
                adapter_deadline: Duration::from_millis(200),
                ..AggregatorConfig::default()
            },
        ),
    );

    AppState::new(aggregator, mcps)
}

async fn default_state() -> AppState {
    test_state(vec![CountingAdapter::new(
        "mock",
        vec![search_result("weather-tool", "http://a", 0.8)],
    )])
    .await
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = router(state, false)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send_json(
    state: AppState,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = router(state, false)
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health_reports_database_and_platforms() {
    let (status, body) = get(default_state().await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["supported_platforms"], json!(["mock"]));
}

#[tokio::test]
async fn test_list_mcps_with_domain_filter() {
    let (status, body) = get(default_state().await, "/mcps?domain=weather").await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "weather.forecast");
    // Listings omit the raw schema text.
    assert!(items[0].get("schema_content").is_none());
}

#[tokio::test]
async fn test_list_mcps_rejects_out_of_range_limit() {
    let (status, _) = get(default_state().await, "/mcps?limit=1000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_mcp_returns_schema_or_404() {
    let state = default_state().await;
    let (status, body) = get(state.clone(), "/mcps/weather-mcp-001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "weather.forecast");
    assert!(body["schema_content"].is_string());

    let (status, _) = get(state, "/mcps/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_get_delete_round_trip() {
    let state = default_state().await;

    let (status, created) = send_json(
        state.clone(),
        "POST",
        "/mcps",
        json!({"schema_content": WEATHER_JSON}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "weather-tool");
    assert_eq!(created["validated"], true);
    assert_eq!(created["domain"], "weather");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = get(state.clone(), &format!("/mcps/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);

    let response = router(state.clone(), false)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/mcps/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(state, &format!("/mcps/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_non_mcp_documents() {
    let (status, body) = send_json(
        default_state().await,
        "POST",
        "/mcps",
        json!({"schema_content": "not json at all"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("not an MCP"));
}

#[tokio::test]
async fn test_search_returns_ranked_results() {
    let (status, body) = get(default_state().await, "/mcps/search?query=weather").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "weather-tool");
    assert_eq!(results[0]["source_platform"], "mock");
}

#[tokio::test]
async fn test_search_validates_parameters() {
    let state = default_state().await;

    let (status, _) = get(state.clone(), "/mcps/search?query=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(state.clone(), "/mcps/search?query=x&limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(state, "/mcps/search?query=x&min_confidence=2.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_filters_by_min_confidence() {
    let state = test_state(vec![CountingAdapter::new(
        "mock",
        vec![
            search_result("keep", "http://k", 0.9),
            search_result("drop", "http://d", 0.3),
        ],
    )])
    .await;

    let (status, body) = get(state, "/mcps/search?query=x&min_confidence=0.5").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "keep");
}

#[tokio::test]
async fn test_enhanced_search_accepts_json_options() {
    let state = default_state().await;

    let (status, body) = send_json(
        state,
        "POST",
        "/mcps/search/enhanced",
        json!({
            "query": "weather",
            "limit": 5,
            "sources": ["mock"],
            "min_confidence": 0.1,
            "relevance_ranking": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_returns_503_when_all_sources_fail() {
    let state = test_state(vec![Arc::new(HangingAdapter)]).await;

    let (status, body) = get(state, "/mcps/search?query=weather").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("all discovery sources failed"));
}
