use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_macros::debug_handler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ToddError;
use crate::models::{ChatRequest, ChatResponse, HealthResponse};
use crate::persona::ERROR_FALLBACK;
use crate::service::ChatService;

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChatService>,
}

/// Chat + health routes, with static files served from `static_dir` for
/// anything else when the directory exists.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/health", get(handle_health))
        .with_state(state);

    if let Some(dir) = static_dir.filter(|d| d.is_dir()) {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[debug_handler]
async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ToddError> {
    let Json(request) = payload.map_err(|e| ToddError::InvalidRequest(e.body_text()))?;

    let header_id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let session_id = request.session_id.or(header_id);
    let user_message = request.user_message.unwrap_or_default();

    let reply = state
        .service
        .respond(session_id.as_deref(), &user_message)
        .await;

    Ok(Json(ChatResponse {
        response: reply.text,
    }))
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.service.sessions().len(),
    })
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);

    let body = Json(serde_json::json!({
        "error": detail,
        "response": ERROR_FALLBACK,
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
