//! Application Layer
//!
//! Gate evaluation, the login flow use cases and operation logging.

pub mod config;
pub mod evaluate;
pub mod record_operation;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use config::{GateConfig, SessionConfig};
pub use evaluate::{evaluate, login_location};
pub use record_operation::RecordOperationUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
