//! HTTP router tests, driven in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use member_qa::server::router;
use member_qa::QaEngine;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const DINNER: &str =
    "User: Alice | Timestamp: 2024-01-01 | Message: I booked dinner at the new bistro downtown";

fn built_engine() -> Arc<QaEngine> {
    let engine = QaEngine::default();
    engine.build(vec![DINNER.to_string()]);
    Arc::new(engine)
}

async fn send(engine: Arc<QaEngine>, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router(engine).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_ask(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(built_engine(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["documents"], 1);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_without_corpus() {
    let (status, body) = send(Arc::new(QaEngine::default()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documents"], 0);
}

#[tokio::test]
async fn test_post_ask_answers() {
    let (status, body) = send(
        built_engine(),
        post_ask(json!({"question": "Where did Alice have dinner?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "answer": "Member: Alice | Timestamp: 2024-01-01 | Message: I booked dinner at the new bistro downtown"
        })
    );
}

#[tokio::test]
async fn test_post_ask_refusal_is_ok() {
    let (status, body) = send(
        built_engine(),
        post_ask(json!({"question": "What car does Alice drive?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["answer"],
        "The information is not available in the member messages."
    );
}

#[tokio::test]
async fn test_post_ask_blank_is_bad_request() {
    let (status, body) = send(built_engine(), post_ask(json!({"question": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_post_ask_malformed_body() {
    let (status, body) = send(built_engine(), post_ask(json!({"q": "hi"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_get_ask() {
    let (status, body) = send(
        built_engine(),
        get("/ask?question=Where%20did%20Alice%20have%20dinner%3F"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["answer"]
        .as_str()
        .unwrap()
        .starts_with("Member: Alice"));
}

#[tokio::test]
async fn test_get_ask_missing_question() {
    let (status, _) = send(built_engine(), get("/ask")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(built_engine(), get("/ask?question=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_ask_whitespace_question_is_answered() {
    let (status, body) = send(built_engine(), get("/ask?question=%20%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Question has no meaningful content.");
}

#[tokio::test]
async fn test_ask_without_corpus() {
    let (status, body) = send(
        Arc::new(QaEngine::default()),
        post_ask(json!({"question": "anything"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["answer"],
        "I don't have any member messages to answer from yet. Please try again later."
    );
}
