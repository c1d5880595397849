//! Gate Evaluation
//!
//! Decides, per request, whether the target handler may run.

use platform::client::is_script_request;

use crate::application::config::GateConfig;
use crate::domain::decision::{Denial, GateDecision};
use crate::domain::exempt::is_exempt;
use crate::domain::request::RequestDescriptor;
use crate::domain::session::{IS_TIMEOUT, SessionAttributes, is_authenticated};

/// Evaluate one request against the gate
///
/// Order of checks:
/// 1. enforcement disabled → allow
/// 2. bare path exempted → allow
/// 3. session carries `user_id` and `int_user_id` → allow
/// 4. script caller → deny with a session-timeout signal, session untouched
/// 5. otherwise → set `istimeout` on the session and redirect to login
///
/// Never fails; a missing session is treated as unauthenticated.
pub fn evaluate<S>(config: &GateConfig, req: RequestDescriptor<'_, S>) -> GateDecision
where
    S: SessionAttributes + ?Sized,
{
    if !config.enforcement_enabled() {
        return GateDecision::Allow;
    }

    let bare_path = req.bare_path();
    if is_exempt(config.exempt_patterns(), bare_path) {
        tracing::debug!(path = %bare_path, "Exempt path");
        return GateDecision::Allow;
    }

    let RequestDescriptor {
        context_path,
        headers,
        session,
        ..
    } = req;

    if session.as_deref().is_some_and(|s| is_authenticated(s)) {
        return GateDecision::Allow;
    }

    if is_script_request(headers) {
        tracing::debug!(path = %bare_path, "Unauthenticated script request");
        return GateDecision::Deny(Denial::SessionTimeout);
    }

    if let Some(session) = session {
        session.set_attribute(IS_TIMEOUT, true.into());
    }

    let location = login_location(config.login_path(), context_path);
    tracing::debug!(path = %bare_path, location = %location, "Unauthenticated page request");
    GateDecision::Deny(Denial::Redirect { location })
}

/// Redirect target for the login page
///
/// Absolute paths live under the deployment root; anything else
/// (a full URL, a relative path) is used verbatim.
pub fn login_location(login_path: &str, context_path: &str) -> String {
    if login_path.starts_with('/') && !context_path.trim().is_empty() {
        format!("{context_path}{login_path}")
    } else {
        login_path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_location_prefixes_context() {
        assert_eq!(login_location("/login", "/admin"), "/admin/login");
        assert_eq!(login_location("/login", ""), "/login");
    }

    #[test]
    fn test_login_location_verbatim_when_not_absolute_path() {
        assert_eq!(
            login_location("http://external.example/login", "/admin"),
            "http://external.example/login"
        );
        assert_eq!(login_location("login.html", "/admin"), "login.html");
    }
}
