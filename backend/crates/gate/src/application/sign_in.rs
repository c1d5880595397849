//! Sign In Use Case
//!
//! Login-time lookup of the internal account id, followed by a fresh
//! session carrying the identity the gate checks for.

use std::sync::Arc;

use kernel::id::SessionId;

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::session::{CurrentUser, Session};
use crate::error::{GateError, GateResult};

/// Sign in input
#[derive(Debug, Clone)]
pub struct SignInInput {
    pub user_id: String,
    pub password: String,
    /// Session the caller arrived with, replaced on success
    pub previous_session: Option<SessionId>,
}

/// Sign In Use Case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// Resolve the login and issue a new session
    ///
    /// The previous session (if any) is deleted so its ID cannot be reused
    /// with the new identity.
    pub async fn execute(&self, input: SignInInput) -> GateResult<Session> {
        let user_id = input.user_id.trim();
        if user_id.is_empty() || input.password.is_empty() {
            return Err(GateError::InvalidCredentials);
        }

        let int_user_id = self
            .user_repo
            .find_int_user_id(user_id, &input.password)
            .await?
            .ok_or(GateError::InvalidCredentials)?;

        if let Some(previous) = input.previous_session {
            self.session_repo.delete(&previous).await?;
        }

        let session = Session::signed_in(&CurrentUser {
            user_id: user_id.to_string(),
            int_user_id,
        });
        self.session_repo.save(&session).await?;

        tracing::info!(user_id = %user_id, session_id = %session.id, "User signed in");

        Ok(session)
    }
}
