//! Unified error type for the garage service.
//!
//! Every fallible operation in `core`, `export` and `api` returns [`Result`].
//! The HTTP layer turns an [`Error`] into a status code and a JSON body via
//! [`IntoResponse`]; internal faults are logged with full detail while the
//! client only sees a generic message.

use crate::core::validation::ValidationErrors;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// All errors produced by the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity is absent or belongs to someone else
    #[error("{resource} with ID {id} not found")]
    NotFound {
        /// Human-readable resource name, e.g. `"Car"`
        resource: &'static str,
        /// Requested identifier
        id: i64,
    },

    /// One or more fields failed their acceptance rules
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Malformed request parameters or body
    #[error("{message}")]
    BadRequest {
        /// Message returned to the client
        message: String,
    },

    /// No user identity on the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Storage layer failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Spreadsheet rendering failure
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// I/O failure (binding the listener, creating the data directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Config { .. } | Self::Database(_) | Self::Spreadsheet(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client. Never leaks storage details.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, .. } => format!("{resource} not found"),
            Self::Validation(_) => "Validation failed".to_string(),
            Self::BadRequest { message } => message.clone(),
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::Config { .. } | Self::Database(_) | Self::Spreadsheet(_) | Self::Io(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Self::Config { .. } | Self::Database(_) | Self::Spreadsheet(_) | Self::Io(_) => {
                tracing::error!("Internal service error: {self}");
            }
            Self::Unauthenticated => tracing::info!("Rejected unauthenticated request"),
            Self::NotFound { .. } | Self::Validation(_) | Self::BadRequest { .. } => {
                tracing::debug!("Client error: {self}");
            }
        }

        let status = self.status_code();
        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            other => (status, Json(json!({ "error": other.user_message() }))).into_response(),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
