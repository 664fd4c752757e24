//! HTTP server for the FAQ chatbot.
//!
//! The surrounding legal-aid application calls `POST /chat` with the
//! user's message and persists the returned reply as the bot's chat
//! message.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chat` | Chatbot reply for a message (always 200) |
//! | `POST` | `/match` | Single thresholded lookup, optional score breakdown |
//! | `GET`  | `/categories` | FAQ categories with question counts |
//! | `GET`  | `/health` | Health check (version, corpus state) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "threshold must be in [0.0, 1.0]" } }
//! ```
//!
//! Error codes: `bad_request` (400), `corpus_unavailable` (503), `internal` (500).
//! `POST /chat` never returns an error body.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use barangay_faq_core::matcher::Candidate;
use barangay_faq_core::responder::{Reply, Responder, Tier, APOLOGY_REPLY, PRIMARY_THRESHOLD};
use barangay_faq_core::source::{CorpusError, CorpusSource};

use crate::config::Config;
use crate::corpus::FileCorpusProvider;

type SharedSource = Arc<dyn CorpusSource>;

#[derive(Clone)]
struct AppState {
    responder: Arc<Responder<SharedSource>>,
}

/// Start the server with the file-backed corpus named in the config.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let provider = FileCorpusProvider::from_config(config);
    tracing::info!(path = %provider.path().display(), "FAQ corpus will load on first use");
    run_server_with_source(config, Arc::new(provider)).await
}

/// Start the server with an explicit corpus source.
///
/// Used by embedders and tests that supply their own corpus.
pub async fn run_server_with_source(config: &Config, source: SharedSource) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(source);

    tracing::info!("FAQ server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(source: SharedSource) -> Router {
    let state = AppState {
        responder: Arc::new(Responder::new(source)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handle_chat))
        .route("/match", post(handle_match))
        .route("/categories", get(handle_categories))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
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

impl From<CorpusError> for AppError {
    fn from(err: CorpusError) -> Self {
        if err.is_degraded() {
            AppError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "corpus_unavailable".to_string(),
                message: err.to_string(),
            }
        } else {
            AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "internal".to_string(),
                message: err.to_string(),
            }
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    corpus_loaded: bool,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        corpus_loaded: state.responder.matcher().source().is_loaded(),
    })
}

// ============ POST /chat ============

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    tier: Tier,
    /// RFC 3339 timestamp for the bot message.
    created_at: String,
}

/// Handler for `POST /chat`.
///
/// Scoring runs on the blocking pool; the first request may also read the
/// corpus file there. A task failure still produces the apology reply.
async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let responder = state.responder.clone();
    let reply = tokio::task::spawn_blocking(move || responder.reply(&req.message))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "chat reply task failed");
            Reply {
                tier: Tier::Apology,
                text: APOLOGY_REPLY.to_string(),
            }
        });

    Json(ChatResponse {
        reply: reply.text,
        tier: reply.tier,
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

// ============ POST /match ============

#[derive(Deserialize)]
struct MatchRequest {
    query: String,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    explain: bool,
}

#[derive(Serialize)]
struct MatchResponse {
    answer: Option<String>,
    threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain: Option<Candidate>,
}

/// Handler for `POST /match`.
///
/// Without `explain` this degrades like the chatbot does: a missing corpus
/// is just `"answer": null`. With `explain` the corpus failure is reported.
async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let threshold = req.threshold.unwrap_or(PRIMARY_THRESHOLD);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(bad_request(format!(
            "threshold must be in [0.0, 1.0], got {}",
            threshold
        )));
    }

    let matcher = state.responder.matcher();

    if !req.explain {
        let answer = matcher.find_best_match(&req.query, threshold).into_answer();
        return Ok(Json(MatchResponse {
            answer,
            threshold,
            explain: None,
        }));
    }

    let candidate = matcher.best_candidate(&req.query)?;
    let answer = candidate
        .as_ref()
        .filter(|c| c.accepted_at(threshold))
        .map(|c| c.answer.clone());

    Ok(Json(MatchResponse {
        answer,
        threshold,
        explain: candidate,
    }))
}

// ============ GET /categories ============

#[derive(Serialize)]
struct CategorySummary {
    name: String,
    questions: usize,
}

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<CategorySummary>,
}

async fn handle_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let corpus = state.responder.matcher().source().corpus()?;
    let categories = corpus
        .categories
        .iter()
        .map(|c| CategorySummary {
            name: c.name.clone(),
            questions: c.questions.len(),
        })
        .collect();
    Ok(Json(CategoriesResponse { categories }))
}
