//! Drives the router through `oneshot` and checks the wire contract of each endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rs_answer_svc::provider::{AnswerProvider, ProviderError};
use rs_answer_svc::{QueryResolver, ResolveMode, TopicTable, router};
use serde_json::{Value, json};
use tower::ServiceExt;

const TUNNEL: &str = "터널 안전 관리 지침에 따르면, 2025년부터 IoT 센서 설치가 의무화되었습니다.";
const INSPECTION: &str = "정기 점검 주기가 6개월에서 3개월로 단축되었습니다.";
const DEFAULT: &str = "한국도로공사 규정에 따른 답변입니다.";

fn app() -> axum::Router {
    router(QueryResolver::new(Arc::new(TopicTable::builtin())))
}

async fn post_raw(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app(), uri, &body.to_string()).await
}

#[tokio::test]
async fn test_search_known_topics() {
    let (status, json) = post_json("/api/search", json!({ "query": "터널" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": TUNNEL }));

    let (status, json) = post_json("/api/search", json!({ "query": "점검" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": INSPECTION }));
}

#[tokio::test]
async fn test_search_unknown_topic_gets_default() {
    let (status, json) = post_json("/api/search", json!({ "query": "xyz-unknown" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": DEFAULT }));
}

#[tokio::test]
async fn test_search_missing_query_gets_default() {
    let (status, json) = post_json("/api/search", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], DEFAULT);
}

#[tokio::test]
async fn test_search_unmatched_inputs_get_default() {
    for query in ["", " ", "터널 ", "터 널", "도로🚧", "\u{0000}", "default"] {
        let (status, json) = post_json("/api/search", json!({ "query": query })).await;
        assert_eq!(status, StatusCode::OK, "query {query:?}");
        assert_eq!(json["answer"], DEFAULT, "query {query:?}");
    }
}

#[tokio::test]
async fn test_search_is_case_sensitive() {
    let table = TopicTable::from_json_str(r#"{"IoT": "sensor answer", "default": "fallback"}"#)
        .unwrap();
    let app = router(QueryResolver::new(Arc::new(table)));

    let (_, json) = post_raw(app.clone(), "/api/search", r#"{"query":"IoT"}"#).await;
    assert_eq!(json["answer"], "sensor answer");

    let (_, json) = post_raw(app, "/api/search", r#"{"query":"iot"}"#).await;
    assert_eq!(json["answer"], "fallback");
}

#[tokio::test]
async fn test_search_never_errors_for_valid_json() {
    let bodies = [
        json!(null),
        json!([]),
        json!("터널"),
        json!(42),
        json!({ "query": null }),
        json!({ "query": 5 }),
        json!({ "query": ["터널"] }),
        json!({ "query": { "nested": true } }),
        json!({ "unrelated": "field" }),
    ];

    for body in bodies {
        let (status, json) = post_json("/api/search", body.clone()).await;
        assert_eq!(status, StatusCode::OK, "body {body}");
        assert_eq!(json["answer"], DEFAULT, "body {body}");
    }
}

#[tokio::test]
async fn test_search_numeric_query_matches_text_key() {
    let table = TopicTable::from_json_str(r#"{"5": "five", "default": "fallback"}"#).unwrap();
    let app = router(QueryResolver::new(Arc::new(table)));

    let (_, json) = post_raw(app, "/api/search", r#"{"query":5}"#).await;
    assert_eq!(json["answer"], "five");
}

#[tokio::test]
async fn test_search_without_content_type_or_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["answer"], DEFAULT);
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let (status, json) = post_raw(app(), "/api/search", r#"{"query": "터널""#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "BAD_REQUEST");

    let (status, _) = post_raw(app(), "/api/chat", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_wraps_message() {
    let (status, json) = post_json("/api/chat", json!({ "message": "hello" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "response": "\"hello\"에 대한 AI 답변입니다." }));
}

#[tokio::test]
async fn test_chat_keeps_message_verbatim() {
    for message in ["", "He said \"stop\"", "터널 점검", "  spaced  "] {
        let (status, json) = post_json("/api/chat", json!({ "message": message })).await;
        assert_eq!(status, StatusCode::OK);
        let response = json["response"].as_str().unwrap();
        assert!(response.contains(message), "response {response:?}");
        assert_eq!(response, format!("\"{}\"에 대한 AI 답변입니다.", message));
    }
}

#[tokio::test]
async fn test_chat_missing_message() {
    let (status, json) = post_json("/api/chat", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "\"\"에 대한 AI 답변입니다.");
}

#[tokio::test]
async fn test_health() {
    let json = get_health(app()).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let body = format!(r#"{{"query":"{}"}}"#, "터".repeat(1024 * 1024));
    let (status, json) = post_raw(app(), "/api/search", &body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/search")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

struct OfflineProvider;

#[async_trait]
impl AnswerProvider for OfflineProvider {
    async fn answer(&self, _query: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable("offline".to_string()))
    }

    async fn health(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

struct EchoProvider;

#[async_trait]
impl AnswerProvider for EchoProvider {
    async fn answer(&self, query: &str) -> Result<String, ProviderError> {
        Ok(format!("generated: {}", query))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

#[tokio::test]
async fn test_fallback_mode_uses_provider_for_unmatched() {
    let resolver = QueryResolver::new(Arc::new(TopicTable::builtin())).with_provider(
        Arc::new(EchoProvider),
        ResolveMode::Fallback,
        Duration::from_secs(1),
    );
    let app = router(resolver);

    let (_, json) = post_raw(app.clone(), "/api/search", r#"{"query":"터널"}"#).await;
    assert_eq!(json["answer"], TUNNEL);

    let (_, json) = post_raw(app, "/api/search", r#"{"query":"교량"}"#).await;
    assert_eq!(json["answer"], "generated: 교량");
}

#[tokio::test]
async fn test_offline_provider_still_answers() {
    let resolver = QueryResolver::new(Arc::new(TopicTable::builtin())).with_provider(
        Arc::new(OfflineProvider),
        ResolveMode::Provider,
        Duration::from_secs(1),
    );

    let (status, json) = post_raw(router(resolver), "/api/search", r#"{"query":"터널"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], DEFAULT);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let app = app();
    let queries = ["터널", "점검", "xyz", "터널", ""];

    let tasks = queries.iter().map(|query| {
        let app = app.clone();
        let body = json!({ "query": query }).to_string();
        async move { post_raw(app, "/api/search", &body).await }
    });
    let results = futures::future::join_all(tasks).await;

    let answers: Vec<Value> = results.into_iter().map(|(_, json)| json["answer"].clone()).collect();
    assert_eq!(
        answers,
        vec![
            json!(TUNNEL),
            json!(INSPECTION),
            json!(DEFAULT),
            json!(TUNNEL),
            json!(DEFAULT)
        ]
    );
}

async fn get_health(app: axum::Router) -> Value {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_provider_status() {
    let healthy = QueryResolver::new(Arc::new(TopicTable::builtin())).with_provider(
        Arc::new(EchoProvider),
        ResolveMode::Fallback,
        Duration::from_secs(1),
    );
    let json = get_health(router(healthy)).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider"], json!({ "name": "echo", "status": "healthy" }));

    let offline = QueryResolver::new(Arc::new(TopicTable::builtin())).with_provider(
        Arc::new(OfflineProvider),
        ResolveMode::Provider,
        Duration::from_secs(1),
    );
    let json = get_health(router(offline)).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider"], json!({ "name": "offline", "status": "unhealthy" }));
}

#[tokio::test]
async fn test_health_without_provider_omits_status() {
    let json = get_health(app()).await;
    assert!(json.get("provider").is_none());
}
