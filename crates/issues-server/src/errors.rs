//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{}", message)]
    InvalidBody { message: String },

    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("Could not build metrics handler,\n  caused by: {}", source)]
    MetricsError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Domain error,\n  caused by: {}", source)]
    DomainError { source: issues_core::DomainError },

    #[error("Database error,\n  caused by: {}", source)]
    DatabaseError {
        source: issues_database_interface::DatabaseError,
    },
}

impl From<issues_core::DomainError> for ServerError {
    fn from(e: issues_core::DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ServerError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match &self {
            ServerError::InvalidBody { message } => message.clone(),
            _ => "internal server error".into(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
