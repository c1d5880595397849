//! Gate Error Types
//!
//! Gate-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Evaluating a request never produces one of these; they come from
//! startup validation, the login flow and the session store.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
    /// Invalid startup configuration
    #[error("Gate misconfigured: {0}")]
    Misconfigured(String),

    /// Unknown user id / password pair
    #[error("Invalid user id or password")]
    InvalidCredentials,

    /// Session store failure
    #[error("Session store error: {0}")]
    SessionStore(String),
}

impl GateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::InvalidCredentials => ErrorKind::Unauthorized,
            GateError::SessionStore(_) => ErrorKind::ServiceUnavailable,
            GateError::Misconfigured(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            // Store details stay in the logs
            GateError::SessionStore(_) => AppError::service_unavailable("Session store unavailable"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            GateError::SessionStore(msg) => {
                tracing::error!(message = %msg, "Session store error");
            }
            GateError::Misconfigured(msg) => {
                tracing::error!(message = %msg, "Gate misconfigured");
            }
            GateError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
