//! Repository Traits
//!
//! Interfaces for session storage and the login-time user lookup.
//! Implementations live in the infrastructure layer.

use crate::domain::opt_log::OptLog;
use crate::domain::session::Session;
use crate::error::GateResult;
use kernel::id::SessionId;

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Find a live session; idle-expired sessions are dropped and not returned.
    /// A successful lookup counts as an access.
    async fn find(&self, session_id: &SessionId) -> GateResult<Option<Session>>;

    /// Insert or replace a session
    async fn save(&self, session: &Session) -> GateResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: &SessionId) -> GateResult<()>;

    /// Clean up idle-expired sessions
    async fn cleanup_expired(&self) -> GateResult<u64>;
}

/// User directory trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Resolve the internal account id for a login; `None` when the pair is unknown
    async fn find_int_user_id(&self, user_id: &str, password: &str) -> GateResult<Option<String>>;
}

/// Operation log sink
#[trait_variant::make(OptLogRepository: Send)]
pub trait LocalOptLogRepository {
    /// Append one entry
    async fn save(&self, log: &OptLog) -> GateResult<()>;
}
