//! Presentation Layer
//!
//! Gate middleware, login handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod view;

pub use handlers::GateAppState;
pub use middleware::{ClientIp, GateMiddlewareState, SESSION_STATUS, require_login};
pub use router::login_router;
