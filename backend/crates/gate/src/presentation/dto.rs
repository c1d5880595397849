//! Form DTOs

use serde::Deserialize;

/// Login form submission
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub user_id: String,
    pub password: String,
}
