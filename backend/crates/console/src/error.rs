//! Console Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No login identity on the request (gate bypassed)
    #[error("Login required")]
    NotSignedIn,

    /// No account data for the signed-in user
    #[error("Account not found")]
    AccountNotFound,

    /// Paging parameters out of range
    #[error("Invalid paging: {0}")]
    InvalidPaging(String),
}

impl ConsoleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsoleError::NotSignedIn => ErrorKind::Unauthorized,
            ConsoleError::AccountNotFound => ErrorKind::NotFound,
            ConsoleError::InvalidPaging(_) => ErrorKind::BadRequest,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            ConsoleError::NotSignedIn => err.with_action("Sign in and retry"),
            _ => err,
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Console error");
        self.to_app_error().into_response()
    }
}
