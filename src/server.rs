//! HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (version and indexed document count) |
//! | `POST` | `/ask` | Answer `{"question": "..."}` |
//! | `GET`  | `/ask?question=...` | Same, as a query string |
//!
//! Both `/ask` routes respond with `{"answer": "..."}`. Refusals ("not
//! available", "no data") are ordinary answers with status 200.
//!
//! A blank POST question is rejected with 400. `GET` only rejects a missing
//! or empty `question`; whitespace is passed to the engine, which answers
//! that the question has no meaningful content.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use member_qa_core::QaEngine;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::models::{QaResponse, Question, QuestionQuery};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    engine: Arc<QaEngine>,
}

/// Build the router. Exposed separately from [`run_server`] so it can be
/// driven in-process.
pub fn router(engine: Arc<QaEngine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/ask", get(handle_ask_get).post(handle_ask_post))
        .layer(cors)
        .with_state(AppState { engine })
}

/// Serve `engine` on `[server].bind` until the process is terminated.
pub async fn run_server(config: &Config, engine: Arc<QaEngine>) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(engine);

    tracing::info!("server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    /// Indexed documents; 0 while no corpus is built.
    documents: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: state.engine.document_count(),
    })
}

// ============ /ask ============

/// Handler for `POST /ask`.
async fn handle_ask_post(
    State(state): State<AppState>,
    payload: Result<Json<Question>, JsonRejection>,
) -> Result<Json<QaResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| bad_request(e.body_text()))?;
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(bad_request("question must not be empty"));
    }
    answer(&state, question.to_string()).await
}

/// Handler for `GET /ask?question=...`.
async fn handle_ask_get(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<QaResponse>, AppError> {
    match query.question {
        Some(question) if !question.is_empty() => answer(&state, question).await,
        _ => Err(bad_request("question must not be empty")),
    }
}

async fn answer(state: &AppState, question: String) -> Result<Json<QaResponse>, AppError> {
    // Scoring is CPU-bound; keep it off the async workers.
    let engine = state.engine.clone();
    let answer = tokio::task::spawn_blocking(move || engine.answer(&question))
        .await
        .map_err(|e| internal(format!("answer task failed: {}", e)))?;

    Ok(Json(QaResponse { answer }))
}
