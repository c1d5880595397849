//! Repository Traits

use rust_decimal::Decimal;

use crate::domain::camera::Camera;
use crate::domain::page::{Page, PageRequest};
use crate::error::ConsoleResult;

/// Camera repository trait
#[trait_variant::make(CameraRepository: Send)]
pub trait LocalCameraRepository {
    /// One page of cameras
    async fn find_page(&self, request: &PageRequest) -> ConsoleResult<Page<Camera>>;
}

/// Account lookups keyed by internal account id
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    async fn find_card_no(&self, int_user_id: &str) -> ConsoleResult<Option<String>>;

    async fn find_fee_rate(&self, int_user_id: &str) -> ConsoleResult<Option<Decimal>>;
}
