//! AI Chef HTTP backend.
//!
//! A thin stateless proxy between the mobile client and the completion API.
//! There is no per-request state beyond the shared configuration; the
//! recipe database is queried directly by the client, never through here.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Liveness check (static string) |
//! | `POST` | `/ai-chef` | Forward `{query}` to the completion API, answer `{reply}` |
//!
//! # Error Contract
//!
//! Errors are JSON bodies with a single `error` field:
//!
//! ```json
//! { "error": "Query is required" }
//! ```
//!
//! Missing/blank query → 400; upstream failure → 500. The 500 body never
//! echoes upstream details; those go to the log.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the app (and browser
//! builds of it) can call the proxy directly.

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

use crate::config::Config;
use crate::suggest;

/// Shared application state passed to route handlers via Axum's `State`.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Build the router; split out from [`run_server`] so tests can serve it
/// on an ephemeral port.
pub fn app(config: Arc<Config>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/ai-chef", post(handle_ai_chef))
        .layer(cors)
        .with_state(AppState { config })
}

/// Start the backend on the configured port (the `PORT` environment
/// variable, defaulting to 3000). Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.server.port);
    let router = app(Arc::new(config.clone()));

    println!("AI Chef backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Handler for `GET /`.
async fn handle_root() -> &'static str {
    "AI Chef backend is running"
}

#[derive(Deserialize)]
struct SuggestRequest {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Serialize)]
struct SuggestResponse {
    reply: String,
}

/// Handler for `POST /ai-chef`.
async fn handle_ai_chef(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let query = request.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError {
            status: StatusCode::BAD_REQUEST,
            message: "Query is required".to_string(),
        });
    }

    match suggest::suggest(&state.config.ai, query).await {
        Ok(reply) => Ok(Json(SuggestResponse { reply })),
        Err(err) => {
            log::error!("suggestion request failed: {:#}", err);
            Err(AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to fetch AI response".to_string(),
            })
        }
    }
}
