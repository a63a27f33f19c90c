//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}' is not a valid port")]
    InvalidPort { key: &'static str, value: String },
}

/// Outcome of a failed repository call. Handlers branch on the variant, never on the message.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("product with id {id} not found")]
    NotFound { id: i64 },
    #[error("database: {0}")]
    Persistence(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    /// Message is a fixed template; the underlying cause is logged, not returned.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Map a repository failure for `id` to a response error. Persistence failures are logged
    /// and reported with `message` only.
    pub fn from_repository(err: RepositoryError, message: impl Into<String>) -> Self {
        match err {
            RepositoryError::NotFound { id } => AppError::NotFound(format!("Product with id: {} not found", id)),
            RepositoryError::Persistence(e) => {
                let message = message.into();
                tracing::error!(error = %e, "{}", message);
                AppError::Internal(message)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Internal(_) => "internal_error",
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
