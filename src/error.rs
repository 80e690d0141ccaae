use axum::http::StatusCode;
use axum::Json;

use crate::persona::ERROR_FALLBACK;

#[derive(Debug, thiserror::Error)]
pub enum ToddError {
    #[error("remote model returned {status}: {body}")]
    Remote { status: StatusCode, body: String },

    #[error("remote model unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed remote response: {0}")]
    MalformedResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ToddError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Remote { .. } | Self::Transport(_) | Self::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for ToddError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "response": ERROR_FALLBACK,
        }));
        (status, body).into_response()
    }
}
