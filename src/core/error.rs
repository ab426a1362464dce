use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::core::context::Cancellation;
use crate::shared::sql::BuildError;
use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// A path or query parameter failed validation before any store access
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Query build error: {0}")]
    Build(#[from] BuildError),

    #[error("Request {0}")]
    Cancelled(Cancellation),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, "invalid parameter", msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "requested item not found", msg),
            AppError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                internal()
            }
            AppError::Build(ref e) => {
                tracing::error!("Query build error: {}", e);
                internal()
            }
            AppError::Cancelled(reason) => {
                tracing::warn!("Request aborted: {}", reason);
                internal()
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error",
        "something went wrong".to_string(),
    )
}

pub type Result<T> = std::result::Result<T, AppError>;
