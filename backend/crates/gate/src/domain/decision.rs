//! Gate Decision

use derive_more::Display;

/// Outcome of evaluating one request
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GateDecision {
    #[display("allow")]
    Allow,
    #[display("deny ({_0})")]
    Deny(Denial),
}

/// How a denial is communicated to the caller
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Denial {
    /// Browser navigation: send the caller to the login page
    #[display("redirect to {location}")]
    Redirect { location: String },
    /// Script caller: flag the expired session in a response header
    #[display("session timeout")]
    SessionTimeout,
}

impl GateDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}
