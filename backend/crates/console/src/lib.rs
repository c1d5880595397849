//! Console (Administrative Pages) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Cameras, accounts, paging, repository traits
//! - `infra/` - In-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every route here expects to sit behind the login gate.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ConsoleError, ConsoleResult};
pub use infra::memory::{MemoryAccountRepository, MemoryCameraRepository};
pub use presentation::handlers::ConsoleAppState;
pub use presentation::router::console_router;
