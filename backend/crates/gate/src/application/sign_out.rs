//! Sign Out Use Case

use std::sync::Arc;

use kernel::id::SessionId;

use crate::domain::repository::SessionRepository;
use crate::error::GateResult;

/// Sign Out Use Case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Drop the session; unknown IDs are ignored
    pub async fn execute(&self, session_id: &SessionId) -> GateResult<()> {
        self.session_repo.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(())
    }
}
