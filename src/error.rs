use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Temperature API error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No data to export")]
    EmptySelection,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Backend(msg) => {
                tracing::error!("Temperature API error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Temperature API error: {msg}"),
                )
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            Self::Csv(e) => {
                tracing::error!("CSV error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to build CSV".to_string(),
                )
            }
            Self::EmptySelection => {
                tracing::warn!("CSV export requested with no visible series");
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
