//! HTTP route layer.
//!
//! Exposes the message board via a JSON API. Handlers translate the core
//! contracts (validate, process, board operations, statistics) into HTTP
//! status codes and JSON bodies; no business logic lives here.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/` | HTML landing page |
//! | `GET`    | `/health` | Health check (returns version) |
//! | `GET`    | `/api/info` | Service and endpoint overview |
//! | `POST`   | `/data` | Echo a JSON payload back |
//! | `GET`    | `/api/messages` | List all messages with statistics |
//! | `POST`   | `/api/messages` | Validate, enrich, and store a message |
//! | `GET`    | `/api/messages/search?q=` | Substring search |
//! | `GET`    | `/api/messages/{id}` | Fetch one message |
//! | `PUT`    | `/api/messages/{id}` | Merge-update one message |
//! | `DELETE` | `/api/messages/{id}` | Delete one message |
//! | `GET`    | `/api/admin/stats` | Statistics, API-key gated |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Search query required" } }
//! ```
//!
//! Error codes: `bad_request` (400), `unauthorized` (401), `not_found` (404).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::Config;
use crate::models::{BoardStats, Message, MessageUpdate, RawRecord};
use crate::process::process;
use crate::stats::board_stats;
use crate::store::Board;
use crate::validate::validate;

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (wrapped in `Arc` for cheap cloning across handlers).
    pub config: Arc<Config>,
    /// The in-memory message board.
    pub board: Arc<Board>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            board: Arc::new(Board::new()),
        }
    }
}

/// Builds the full router. Public so tests can serve it on an ephemeral
/// port without going through [`run_server`].
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/api/admin/stats", get(handle_admin_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(handle_home))
        .route("/health", get(handle_health))
        .route("/api/info", get(handle_info))
        .route("/data", post(handle_echo))
        .route("/api/messages", get(handle_list).post(handle_create))
        .route("/api/messages/search", get(handle_search))
        .route(
            "/api/messages/{id}",
            get(handle_get).put(handle_update).delete(handle_delete),
        )
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on the configured bind address.
///
/// Builds a fresh [`Board`], registers all routes, and serves until
/// Ctrl-C or SIGTERM.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState::new(config.clone());
    let app = build_router(state);

    info!("binding to {bind_addr}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("pinwall listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
pub struct AppError {
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

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 401 Unauthorized error.
fn unauthorized(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::UNAUTHORIZED,
        code: "unauthorized".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ API-key gate ============

/// Header carrying the shared secret for admin routes.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Rejects admin requests whose `X-API-Key` header does not match the
/// configured secret. Runs before the handler, so no store operation
/// happens on a failed check. Disabled when no key is configured.
async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(ref expected) = state.config.auth.api_key {
        let presented = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return Err(unauthorized("Invalid or missing API key"));
        }
    }
    Ok(next.run(request).await)
}

// ============ GET / ============

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Pinwall</title></head>
<body>
  <h1>Pinwall</h1>
  <p>An in-memory JSON message board. See <a href="/api/info">/api/info</a>
  for the endpoint list.</p>
</body>
</html>
"#;

async fn handle_home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Health check used by load balancers and monitoring tools.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/info ============

async fn handle_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "application": "pinwall",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/": "Homepage",
            "/health": "Health check",
            "/data": "POST endpoint for data submission",
            "/api/info": "API information",
            "/api/messages": "Message CRUD",
            "/api/messages/search": "Substring search (?q=)",
            "/api/admin/stats": "Statistics (API-key gated)",
        },
    }))
}

// ============ POST /data ============

/// Echo endpoint: accepts any JSON payload and returns it unchanged.
/// Empty or null payloads are rejected, matching the message the
/// original service used.
async fn handle_echo(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Json(data) = payload.map_err(|_| bad_request("No data provided"))?;

    let empty = data.is_null() || data.as_object().is_some_and(|o| o.is_empty());
    if empty {
        return Err(bad_request("No data provided"));
    }

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Data received successfully",
            "received_data": data,
        })),
    ))
}

// ============ GET /api/messages ============

/// JSON response body for `GET /api/messages`.
#[derive(Serialize)]
struct ListResponse {
    status: String,
    count: usize,
    statistics: BoardStats,
    messages: Vec<Message>,
}

/// Lists all messages with statistics computed over the current contents.
async fn handle_list(State(state): State<AppState>) -> Json<ListResponse> {
    let messages = state.board.list_all();
    let statistics = board_stats(&messages);
    Json(ListResponse {
        status: "success".to_string(),
        count: messages.len(),
        statistics,
        messages,
    })
}

// ============ POST /api/messages ============

/// Validates, enriches, and stores a message.
///
/// Returns 400 with the validator's reason for bad input, 201 with the
/// stored record otherwise.
async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<RawRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Json(raw) =
        payload.map_err(|_| bad_request("Request body must be a JSON object"))?;

    validate(&raw, &state.config.validation).map_err(bad_request)?;

    let stored = state.board.append(process(&raw));

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Message created and processed",
            "data": stored,
        })),
    ))
}

// ============ GET /api/messages/search ============

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

/// Case-insensitive substring search over message text and names.
async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(bad_request("Search query required"));
    }

    let results = state.board.search(&query);
    Ok(Json(serde_json::json!({
        "status": "success",
        "query": query.to_lowercase(),
        "count": results.len(),
        "results": results,
    })))
}

// ============ /api/messages/{id} ============

async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let message = state
        .board
        .find_by_id(id)
        .ok_or_else(|| not_found("Message not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": message,
    })))
}

/// Merge-updates a message and stamps `updated_at`. Derived counts are
/// pinned to insertion time and not recomputed.
async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<MessageUpdate>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(update) =
        payload.map_err(|_| bad_request("Request body must be a JSON object"))?;

    let message = state
        .board
        .update(id, update)
        .ok_or_else(|| not_found("Message not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Message updated successfully",
        "data": message,
    })))
}

async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.board.delete_by_id(id) {
        return Err(not_found("Message not found"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Message deleted successfully",
    })))
}

// ============ GET /api/admin/stats ============

/// Statistics over the current board, behind the API-key gate.
async fn handle_admin_stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let messages = state.board.list_all();
    Json(serde_json::json!({
        "status": "success",
        "data": board_stats(&messages),
    }))
}
