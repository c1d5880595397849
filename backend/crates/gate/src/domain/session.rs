//! Session Entity
//!
//! Server-side key-value state scoped to one browser session. The login
//! flow writes the identity attributes; the gate only reads them, except
//! for the advisory `istimeout` flag.

use chrono::{DateTime, Duration, Utc};
use derive_more::Display;
use kernel::id::SessionId;
use std::collections::HashMap;

/// Attribute holding the login name
pub const USER_ID: &str = "user_id";
/// Attribute holding the internal account identifier
pub const INT_USER_ID: &str = "int_user_id";
/// Attribute set when a browser was bounced to the login page
pub const IS_TIMEOUT: &str = "istimeout";

/// Value stored under a session attribute
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AttributeValue {
    #[display("{_0}")]
    Text(String),
    #[display("{_0}")]
    Flag(bool),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            AttributeValue::Text(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

/// Read/write access to session attributes
pub trait SessionAttributes {
    fn attribute(&self, name: &str) -> Option<&AttributeValue>;

    fn set_attribute(&mut self, name: &str, value: AttributeValue);

    fn remove_attribute(&mut self, name: &str) -> Option<AttributeValue>;

    /// Text attribute, `None` when absent or not text
    fn text(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttributeValue::as_text)
    }

    /// Flag attribute, `false` when absent or not a flag
    fn flag(&self, name: &str) -> bool {
        self.attribute(name)
            .and_then(AttributeValue::as_flag)
            .unwrap_or(false)
    }
}

/// Identity placed into the session by the login flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
    pub int_user_id: String,
}

impl CurrentUser {
    /// Read the identity pair; both halves must be present
    ///
    /// An empty string still counts as present. A lone `user_id`
    /// (or `int_user_id`) is not an identity.
    pub fn from_session<S: SessionAttributes + ?Sized>(session: &S) -> Option<Self> {
        let user_id = session.text(USER_ID)?;
        let int_user_id = session.text(INT_USER_ID)?;
        Some(Self {
            user_id: user_id.to_string(),
            int_user_id: int_user_id.to_string(),
        })
    }
}

/// Whether the session carries a complete login identity
pub fn is_authenticated<S: SessionAttributes + ?Sized>(session: &S) -> bool {
    session.text(USER_ID).is_some() && session.text(INT_USER_ID).is_some()
}

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    attributes: HashMap<String, AttributeValue>,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session with a fresh random ID
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            attributes: HashMap::new(),
            created_at: now,
            last_accessed_at: now,
        }
    }

    /// Create a session already holding a login identity
    pub fn signed_in(user: &CurrentUser) -> Self {
        let mut session = Self::new();
        session.set_attribute(USER_ID, user.user_id.as_str().into());
        session.set_attribute(INT_USER_ID, user.int_user_id.as_str().into());
        session
    }

    /// Update last access timestamp
    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }

    /// Whether the session sat idle longer than `timeout`
    pub fn is_idle_expired(&self, timeout: Duration) -> bool {
        Utc::now() - self.last_accessed_at > timeout
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAttributes for Session {
    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }

    fn remove_attribute(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }
}

impl SessionAttributes for HashMap<String, AttributeValue> {
    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name)
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.insert(name.to_string(), value);
    }

    fn remove_attribute(&mut self, name: &str) -> Option<AttributeValue> {
        self.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_attributes_required() {
        let mut session = Session::new();
        assert!(!is_authenticated(&session));

        session.set_attribute(USER_ID, "u1".into());
        assert!(!is_authenticated(&session));

        session.set_attribute(INT_USER_ID, "100".into());
        assert!(is_authenticated(&session));
    }

    #[test]
    fn test_int_user_id_alone_is_not_enough() {
        let mut session = Session::new();
        session.set_attribute(INT_USER_ID, "100".into());
        assert!(!is_authenticated(&session));
        assert!(CurrentUser::from_session(&session).is_none());
    }

    #[test]
    fn test_empty_text_counts_as_present() {
        let mut session = Session::new();
        session.set_attribute(USER_ID, "".into());
        session.set_attribute(INT_USER_ID, "".into());
        assert!(is_authenticated(&session));
    }

    #[test]
    fn test_flag_value_is_not_an_identity() {
        let mut session = Session::new();
        session.set_attribute(USER_ID, true.into());
        session.set_attribute(INT_USER_ID, "100".into());
        assert!(!is_authenticated(&session));
    }

    #[test]
    fn test_signed_in_session() {
        let user = CurrentUser {
            user_id: "ruidev".to_string(),
            int_user_id: "42".to_string(),
        };
        let session = Session::signed_in(&user);
        assert_eq!(CurrentUser::from_session(&session), Some(user));
        assert!(!session.flag(IS_TIMEOUT));
    }

    #[test]
    fn test_idle_expiry() {
        let mut session = Session::new();
        session.last_accessed_at = Utc::now() - Duration::minutes(31);
        assert!(session.is_idle_expired(Duration::minutes(30)));

        session.touch();
        assert!(!session.is_idle_expired(Duration::minutes(30)));
    }

    #[test]
    fn test_attribute_display() {
        assert_eq!(AttributeValue::from("u1").to_string(), "u1");
        assert_eq!(AttributeValue::from(true).to_string(), "true");
    }
}
