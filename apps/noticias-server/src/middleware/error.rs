//! Error handling - every failure becomes a `{"error": ...}` JSON body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use noticias_core::DomainError;
use noticias_core::error::MSG_NOT_FOUND;
use noticias_shared::ErrorResponse;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// `message` goes to the client, `cause` only to the logs.
    #[error("Internal error: {message} ({cause})")]
    Internal { message: String, cause: String },
}

impl AppError {
    /// Convert a domain failure, using `failure` as the client message for storage errors.
    pub fn from_domain(err: DomainError, failure: &str) -> Self {
        match err {
            DomainError::InvalidArgument(msg) => AppError::BadRequest(msg),
            DomainError::NotFound { .. } => AppError::NotFound(MSG_NOT_FOUND.to_string()),
            DomainError::Storage(cause) => AppError::Internal {
                message: failure.to_string(),
                cause,
            },
        }
    }

    /// Message shown to the client.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::PayloadTooLarge(msg) => msg,
            AppError::Internal { message, .. } => message,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal { message, cause } = self {
            tracing::error!(error = %cause, "{}", message);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.message()))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
