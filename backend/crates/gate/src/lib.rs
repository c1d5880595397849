//! Gate (Login Enforcement) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session model, exempt patterns, decisions, operation log, repository traits
//! - `application/` - Gate evaluation, configuration, sign-in/out use cases
//! - `infra/` - In-memory repository implementations
//! - `presentation/` - Middleware, login handlers, router
//!
//! ## Gate Model
//! - Enforcement can be switched off entirely (development)
//! - Exempt paths bypass the gate: exact match, or containment of the text
//!   before the first `*`
//! - A session is logged in only when it holds both `user_id` and `int_user_id`
//! - Page requests are redirected to the login page and the session is
//!   flagged `istimeout`; script requests get a `sessionstatus: timeout` header

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{GateConfig, SessionConfig};
pub use application::evaluate::{evaluate, login_location};
pub use domain::decision::{Denial, GateDecision};
pub use domain::session::CurrentUser;
pub use error::{GateError, GateResult};
pub use infra::memory::{MemoryOptLogRepository, MemorySessionRepository, MemoryUserRepository};
pub use presentation::router::login_router;

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
