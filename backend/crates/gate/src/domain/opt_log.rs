//! Operation Log Entry
//!
//! One record per security-relevant action: sign-in attempts, sign-outs and
//! requests the gate turned away.

use chrono::{DateTime, Utc};
use derive_more::Display;
use std::net::IpAddr;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("sign_in")]
    SignIn,
    #[display("sign_in_failed")]
    SignInFailed,
    #[display("sign_out")]
    SignOut,
    #[display("gate_denied")]
    GateDenied,
}

/// Operation log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptLog {
    pub operation: Operation,
    /// Login name, when one is known
    pub user_id: Option<String>,
    /// Request path as the client sent it
    pub path: String,
    pub client_ip: Option<IpAddr>,
    /// Free-form detail (the gate decision, for denials)
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OptLog {
    pub fn new(operation: Operation, path: impl Into<String>) -> Self {
        Self {
            operation,
            user_id: None,
            path: path.into(),
            client_ip: None,
            detail: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_client_ip(mut self, client_ip: Option<IpAddr>) -> Self {
        self.client_ip = client_ip;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let log = OptLog::new(Operation::SignIn, "/admin/login")
            .with_user("ruidev")
            .with_client_ip(Some("10.0.0.1".parse().unwrap()));

        assert_eq!(log.operation.to_string(), "sign_in");
        assert_eq!(log.user_id.as_deref(), Some("ruidev"));
        assert_eq!(log.path, "/admin/login");
        assert!(log.detail.is_none());
    }
}
