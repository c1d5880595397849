//! Application Configuration
//!
//! Gate and session settings, built once at startup and shared read-only.

use std::time::Duration;

use axum::http::HeaderValue;
use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::exempt::ExemptPattern;
use crate::error::{GateError, GateResult};

/// Gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    enforcement_enabled: bool,
    exempt_patterns: Vec<ExemptPattern>,
    login_path: String,
}

impl GateConfig {
    /// Validate and build the gate configuration
    ///
    /// ## Errors
    /// * `GateError::Misconfigured` - enforcement is on and the login path is
    ///   blank, the login path cannot be sent as a `Location` header, or an
    ///   exempt pattern is blank
    pub fn new<I, P>(enforcement_enabled: bool, exempt_patterns: I, login_path: impl Into<String>) -> GateResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let login_path = login_path.into();
        if enforcement_enabled && login_path.trim().is_empty() {
            return Err(GateError::Misconfigured(
                "login path is required when enforcement is enabled".to_string(),
            ));
        }
        if HeaderValue::from_str(&login_path).is_err() {
            return Err(GateError::Misconfigured(format!(
                "login path {login_path:?} is not a valid Location header value"
            )));
        }

        let exempt_patterns = exempt_patterns
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = raw.as_ref();
                if raw.trim().is_empty() {
                    Err(GateError::Misconfigured(format!(
                        "exempt pattern #{index} is blank"
                    )))
                } else {
                    Ok(ExemptPattern::parse(raw))
                }
            })
            .collect::<GateResult<Vec<_>>>()?;

        Ok(Self {
            enforcement_enabled,
            exempt_patterns,
            login_path,
        })
    }

    /// Enforcement off (development)
    pub fn development() -> Self {
        Self {
            enforcement_enabled: false,
            exempt_patterns: Vec::new(),
            login_path: "/login".to_string(),
        }
    }

    pub fn enforcement_enabled(&self) -> bool {
        self.enforcement_enabled
    }

    pub fn exempt_patterns(&self) -> &[ExemptPattern] {
        &self.exempt_patterns
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// Idle time after which a session is discarded
    pub idle_timeout: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "JSESSIONID".to_string(),
            idle_timeout: Duration::from_secs(30 * 60), // 30 minutes
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl SessionConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Idle timeout as a chrono duration
    pub fn idle_timeout_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.idle_timeout).unwrap_or(chrono::Duration::MAX)
    }

    /// Cookie settings scoped to the deployment root
    pub fn cookie(&self, context_path: &str) -> CookieConfig {
        let path = if context_path.is_empty() {
            "/".to_string()
        } else {
            context_path.to_string()
        };
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path,
            max_age_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = GateConfig::new(true, ["/login", "/static/*"], "/login").unwrap();
        assert!(config.enforcement_enabled());
        assert_eq!(config.exempt_patterns().len(), 2);
        assert_eq!(config.login_path(), "/login");
    }

    #[test]
    fn test_blank_login_path_rejected_when_enforcing() {
        let err = GateConfig::new(true, Vec::<String>::new(), "  ").unwrap_err();
        assert!(matches!(err, GateError::Misconfigured(_)));
    }

    #[test]
    fn test_blank_login_path_allowed_when_bypassing() {
        let config = GateConfig::new(false, Vec::<String>::new(), "").unwrap();
        assert!(!config.enforcement_enabled());
    }

    #[test]
    fn test_login_path_must_be_header_safe() {
        let err = GateConfig::new(true, ["/login"], "/log\nin").unwrap_err();
        assert!(matches!(err, GateError::Misconfigured(_)));

        let err = GateConfig::new(false, Vec::<String>::new(), "/bad\u{7f}path").unwrap_err();
        assert!(err.to_string().contains("Location"));
    }

    #[test]
    fn test_blank_pattern_rejected() {
        let err = GateConfig::new(true, ["/login", ""], "/login").unwrap_err();
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn test_pattern_order_preserved() {
        let config = GateConfig::new(true, ["/b", "/a/*"], "/login").unwrap();
        assert_eq!(
            config.exempt_patterns(),
            &[
                ExemptPattern::Exact("/b".to_string()),
                ExemptPattern::Contains("/a/".to_string())
            ]
        );
    }

    #[test]
    fn test_session_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "JSESSIONID");
        assert_eq!(config.idle_timeout, Duration::from_secs(1800));
        assert!(config.cookie_secure);
        assert!(!SessionConfig::development().cookie_secure);
    }

    #[test]
    fn test_cookie_path_follows_context() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie("").path, "/");
        assert_eq!(config.cookie("/admin").path, "/admin");
    }
}
