//! In-memory repositories

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::camera::Camera;
use crate::domain::page::{Page, PageRequest};
use crate::domain::repository::{AccountRepository, CameraRepository};
use crate::error::ConsoleResult;

/// Fixed camera inventory
#[derive(Clone, Default)]
pub struct MemoryCameraRepository {
    cameras: Arc<Vec<Camera>>,
}

impl MemoryCameraRepository {
    pub fn new(cameras: Vec<Camera>) -> Self {
        Self {
            cameras: Arc::new(cameras),
        }
    }

    /// The two cameras the console ships with
    pub fn demo() -> Self {
        Self::new(vec![
            Camera::new("192.168.1.2", "3306", "test1"),
            Camera::new("192.168.1.2", "3306", "test1"),
        ])
    }
}

impl CameraRepository for MemoryCameraRepository {
    async fn find_page(&self, request: &PageRequest) -> ConsoleResult<Page<Camera>> {
        Ok(Page::slice(&self.cameras, request))
    }
}

/// Accounts keyed by internal account id
#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<HashMap<String, Account>>,
}

impl MemoryAccountRepository {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.int_user_id.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(accounts),
        }
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn find_card_no(&self, int_user_id: &str) -> ConsoleResult<Option<String>> {
        Ok(self.accounts.get(int_user_id).map(|a| a.card_no.clone()))
    }

    async fn find_fee_rate(&self, int_user_id: &str) -> ConsoleResult<Option<Decimal>> {
        Ok(self.accounts.get(int_user_id).map(|a| a.fee_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_cameras() {
        let page = MemoryCameraRepository::demo()
            .find_page(&PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.results[0].user_name, "test1");
    }

    #[tokio::test]
    async fn test_account_lookups() {
        let repo = MemoryAccountRepository::new([Account {
            int_user_id: "10001".to_string(),
            card_no: "6222000011112222".to_string(),
            fee_rate: Decimal::new(3, 3),
        }]);

        assert_eq!(
            repo.find_card_no("10001").await.unwrap().as_deref(),
            Some("6222000011112222")
        );
        assert_eq!(
            repo.find_fee_rate("10001").await.unwrap(),
            Some(Decimal::new(3, 3))
        );
        assert!(repo.find_card_no("404").await.unwrap().is_none());
    }
}
