//! Domain Layer
//!
//! Entities for the console pages and the repository traits behind them.

pub mod account;
pub mod camera;
pub mod page;
pub mod repository;
