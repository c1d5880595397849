//! Infrastructure Layer

pub mod memory;

pub use memory::{MemoryAccountRepository, MemoryCameraRepository};
