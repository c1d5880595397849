//! Startup configuration
//!
//! Read once from the environment (and `.env`); immutable afterwards.

use anyhow::{Context, bail};
use gate::application::config::SameSite;
use gate::{GateConfig, SessionConfig};
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_EXCLUDE_URLS: &str = "/login,/static/*";
const DEFAULT_LOGIN_URL: &str = "/login";

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    /// Deployment root; `""` when mounted at `/`
    pub context_path: String,
    pub gate: GateConfig,
    pub session: SessionConfig,
    /// `(user_id, password, int_user_id)` directory fixtures
    pub demo_users: Vec<(String, String, String)>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("SERVER_ADDR must be host:port")?;

        let context_path = parse_context_path(lookup("CONTEXT_PATH").unwrap_or_default())?;

        let enforcement_enabled = match lookup("GATE_ENABLED") {
            Some(value) => parse_bool(&value).context("GATE_ENABLED must be true or false")?,
            None => true,
        };
        let exclude_urls = lookup("GATE_EXCLUDE_URLS").unwrap_or_else(|| DEFAULT_EXCLUDE_URLS.to_string());
        let login_url = lookup("GATE_LOGIN_URL").unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());

        let gate = GateConfig::new(enforcement_enabled, split_list(&exclude_urls), login_url)?;

        let mut session = if cfg!(debug_assertions) {
            SessionConfig::development()
        } else {
            SessionConfig::default()
        };
        if let Some(name) = lookup("SESSION_COOKIE_NAME") {
            if name.trim().is_empty() {
                bail!("SESSION_COOKIE_NAME must not be blank");
            }
            session.cookie_name = name.trim().to_string();
        }
        if let Some(secs) = lookup("SESSION_IDLE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("SESSION_IDLE_TIMEOUT_SECS must be a number of seconds")?;
            session.idle_timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("COOKIE_SECURE") {
            session.cookie_secure = parse_bool(&value).context("COOKIE_SECURE must be true or false")?;
        }
        if let Some(value) = lookup("COOKIE_SAME_SITE") {
            session.cookie_same_site = SameSite::parse(&value)
                .with_context(|| format!("COOKIE_SAME_SITE has unknown policy {value:?}"))?;
        }

        let demo_users = match lookup("DEMO_USERS") {
            Some(value) => parse_demo_users(&value)?,
            None if cfg!(debug_assertions) => vec![(
                "ruidev".to_string(),
                "123456".to_string(),
                "10001".to_string(),
            )],
            None => Vec::new(),
        };

        Ok(Self {
            addr,
            context_path,
            gate,
            session,
            demo_users,
        })
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: {other:?}"),
    }
}

/// Comma separated, order kept, surrounding whitespace and empty items dropped
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_context_path(value: String) -> anyhow::Result<String> {
    let value = value.trim();
    if value.is_empty() || value == "/" {
        return Ok(String::new());
    }
    if !value.starts_with('/') || value.ends_with('/') {
        bail!("CONTEXT_PATH must start with '/' and not end with '/': {value:?}");
    }
    Ok(value.to_string())
}

/// `user:password:int_user_id` entries, comma separated
fn parse_demo_users(value: &str) -> anyhow::Result<Vec<(String, String, String)>> {
    split_list(value)
        .into_iter()
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(user), Some(password), Some(int_id)) if !user.is_empty() && !int_id.is_empty() => {
                    Ok((user.to_string(), password.to_string(), int_id.to_string()))
                }
                _ => bail!("DEMO_USERS entry must be user:password:int_user_id"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse().unwrap());
        assert_eq!(config.context_path, "");
        assert!(config.gate.enforcement_enabled());
        assert_eq!(config.gate.exempt_patterns().len(), 2);
        assert_eq!(config.gate.login_path(), "/login");
    }

    #[test]
    fn test_exclude_list_keeps_order() {
        let config = config(&[("GATE_EXCLUDE_URLS", " /health , ,/static/* ")]).unwrap();
        let patterns: Vec<String> = config
            .gate
            .exempt_patterns()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(patterns, vec!["/health", "/static/*"]);
    }

    #[test]
    fn test_blank_login_url_fails_fast() {
        assert!(config(&[("GATE_LOGIN_URL", " ")]).is_err());
        assert!(config(&[("GATE_LOGIN_URL", " "), ("GATE_ENABLED", "false")]).is_ok());
    }

    #[test]
    fn test_context_path_rules() {
        assert_eq!(config(&[("CONTEXT_PATH", "/admin")]).unwrap().context_path, "/admin");
        assert_eq!(config(&[("CONTEXT_PATH", "/")]).unwrap().context_path, "");
        assert!(config(&[("CONTEXT_PATH", "admin")]).is_err());
        assert!(config(&[("CONTEXT_PATH", "/admin/")]).is_err());
    }

    #[test]
    fn test_session_overrides() {
        let config = config(&[
            ("SESSION_COOKIE_NAME", "SID"),
            ("SESSION_IDLE_TIMEOUT_SECS", "60"),
            ("COOKIE_SECURE", "yes"),
            ("COOKIE_SAME_SITE", "strict"),
        ])
        .unwrap();
        assert_eq!(config.session.cookie_name, "SID");
        assert_eq!(config.session.idle_timeout, Duration::from_secs(60));
        assert!(config.session.cookie_secure);
        assert_eq!(config.session.cookie_same_site, SameSite::Strict);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config(&[("GATE_ENABLED", "maybe")]).is_err());
        assert!(config(&[("SESSION_IDLE_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("SERVER_ADDR", "nowhere")]).is_err());
    }

    #[test]
    fn test_demo_users() {
        let config = config(&[("DEMO_USERS", "a:pw:1,b::2")]).unwrap();
        assert_eq!(config.demo_users.len(), 2);
        assert_eq!(config.demo_users[1], ("b".to_string(), String::new(), "2".to_string()));
        assert!(parse_demo_users("broken").is_err());
    }
}
