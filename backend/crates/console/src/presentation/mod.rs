//! Presentation Layer
//!
//! HTTP handlers, DTOs, views, and router.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod view;

pub use handlers::ConsoleAppState;
pub use router::console_router;
