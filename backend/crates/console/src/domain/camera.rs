//! Camera Entity

use serde::Serialize;

/// A network camera registered with the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub ip: String,
    pub port: String,
    pub user_name: String,
}

impl Camera {
    pub fn new(ip: impl Into<String>, port: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            port: port.into(),
            user_name: user_name.into(),
        }
    }
}
