//! Platform Crate - Technical Infrastructure
//!
//! HTTP plumbing shared by the feature crates:
//! - Cookie building and extraction
//! - Client inspection from request headers (script callers, client IP)

pub mod client;
pub mod cookie;
