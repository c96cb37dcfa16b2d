// 🌐 Cookbook HTTP API (axum)
//
//   POST /parse          {"input": "..."}   → {"msg": "Canonical Name"}
//   POST /entry          ingredient|recipe  → {}
//   GET  /summary?name=  recipe summary     → {"name", "cookTime", "ingredients"}
//   GET  /entries        every entry, oldest first
//   GET  /entries/:name  one entry
//   GET  /health

use crate::error::CookbookError;
use crate::normalize::normalize;
use crate::registry::Cookbook;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    cookbook: Cookbook,
}

/// Body of every message-style response (errors, /parse, /health)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
}

impl MessageResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            entries: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    input: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    name: Option<String>,
}

/// Every cookbook error is the client's fault
impl IntoResponse for CookbookError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

/// Unreadable bodies (bad JSON, wrong shape, wrong content type) get the same
/// 400 + `{"msg"}` treatment as every other rejected request
impl From<JsonRejection> for CookbookError {
    fn from(rejection: JsonRejection) -> Self {
        CookbookError::invalid_field("body", rejection.body_text())
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(MessageResponse {
        msg: "OK".to_string(),
        entries: Some(state.cookbook.len()),
    })
}

/// POST /parse - Canonicalize a handwritten name
async fn parse_name(
    request: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, CookbookError> {
    let Json(request) = request?;
    normalize(&request.input)
        .map(|name| Json(MessageResponse::new(name)))
        .ok_or(CookbookError::MalformedName(request.input))
}

/// POST /entry - Add an ingredient or recipe
async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, CookbookError> {
    let inserted = payload
        .map_err(CookbookError::from)
        .and_then(|Json(payload)| state.cookbook.insert(&payload));

    match inserted {
        Ok(_) => Ok(Json(serde_json::json!({}))),
        Err(e) => {
            warn!(error = %e, "entry rejected");
            Err(e)
        }
    }
}

/// GET /summary?name=... - Flatten a recipe into ingredients and total cook time
async fn get_summary(State(state): State<AppState>, Query(query): Query<SummaryQuery>) -> Response {
    let Some(name) = query.name else {
        return CookbookError::MissingField("name").into_response();
    };

    match state.cookbook.summarize(&name) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            warn!(name = %name, error = %e, "summary failed");
            e.into_response()
        }
    }
}

/// GET /entries - All entries in insertion order
async fn list_entries(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.cookbook.entries())
}

/// GET /entries/:name - One entry by raw or canonical name
async fn get_entry(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.cookbook.get(&name) {
        Some(entry) => (StatusCode::OK, Json(entry)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new(CookbookError::NotFound(name).to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router around a (possibly pre-filled) cookbook
pub fn build_router(cookbook: Cookbook) -> Router {
    let state = AppState { cookbook };

    Router::new()
        .route("/health", get(health_check))
        .route("/parse", post(parse_name))
        .route("/entry", post(create_entry))
        .route("/summary", get(get_summary))
        .route("/entries", get(list_entries))
        .route("/entries/:name", get(get_entry))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
