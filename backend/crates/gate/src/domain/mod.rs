//! Domain Layer - Gate rules and session model
//!
//! This layer contains:
//! - The session entity and its attribute contract
//! - Exempt path patterns
//! - The per-request descriptor and the gate decision
//! - Operation log entries
//! - Repository traits (interfaces)

pub mod decision;
pub mod exempt;
pub mod opt_log;
pub mod repository;
pub mod request;
pub mod session;
