//! Router assembly

use axum::Router;
use axum::middleware::from_fn_with_state;
use console::{ConsoleAppState, MemoryAccountRepository, MemoryCameraRepository, console_router};
use gate::middleware::{GateMiddlewareState, require_login};
use gate::presentation::GateAppState;
use gate::{MemoryOptLogRepository, MemorySessionRepository, MemoryUserRepository, login_router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Backing stores for the application
#[derive(Clone)]
pub struct Repositories {
    pub sessions: MemorySessionRepository,
    pub users: MemoryUserRepository,
    pub opt_log: MemoryOptLogRepository,
    pub cameras: MemoryCameraRepository,
    pub accounts: MemoryAccountRepository,
}

/// Build the full application router
///
/// Every route sits behind the login gate; the login routes themselves are
/// reachable only through the exempt list.
pub fn build_router(config: &AppConfig, repos: Repositories) -> Router {
    let gate_config = Arc::new(config.gate.clone());
    let session_config = Arc::new(config.session.clone());
    let context_path: Arc<str> = Arc::from(config.context_path.as_str());
    let sessions = Arc::new(repos.sessions);
    let opt_log = Arc::new(repos.opt_log);

    let gate_state = GateMiddlewareState {
        sessions: sessions.clone(),
        opt_log: opt_log.clone(),
        config: gate_config.clone(),
        session_config: session_config.clone(),
        context_path: context_path.clone(),
    };

    let login = login_router(GateAppState {
        users: Arc::new(repos.users),
        sessions,
        opt_log,
        config: gate_config,
        session_config,
        context_path,
    });

    let console = console_router(ConsoleAppState {
        cameras: Arc::new(repos.cameras),
        accounts: Arc::new(repos.accounts),
    });

    let app = Router::new()
        .merge(login)
        .merge(console)
        .layer(from_fn_with_state(
            gate_state,
            require_login::<MemorySessionRepository, MemoryOptLogRepository>,
        ));

    let app = if config.context_path.is_empty() {
        app
    } else {
        Router::new().nest(&config.context_path, app)
    };

    app.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use console::domain::account::Account;
    use gate::SessionConfig;
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn repos() -> Repositories {
        Repositories {
            sessions: MemorySessionRepository::from_config(&SessionConfig::default()),
            users: MemoryUserRepository::new([("ruidev", "123456", "10001")]),
            opt_log: MemoryOptLogRepository::default(),
            cameras: MemoryCameraRepository::demo(),
            accounts: MemoryAccountRepository::new([Account {
                int_user_id: "10001".to_string(),
                card_no: "6222000011112222".to_string(),
                fee_rate: Decimal::new(3, 3),
            }]),
        }
    }

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    async fn sign_in(app: &Router, path: &str) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::post(path)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("user_id=ruidev&password=123456"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_anonymous_page_redirects_under_context() {
        let app = build_router(&config(&[("CONTEXT_PATH", "/admin")]), repos());

        let response = app
            .oneshot(Request::get("/admin/camera").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
    }

    #[tokio::test]
    async fn test_anonymous_script_call_gets_timeout_header() {
        let app = build_router(&config(&[]), repos());

        let response = app
            .oneshot(
                Request::get("/camera/list")
                    .header("X-Requested-With", "XMLHttpRequest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["sessionstatus"], "timeout");
    }

    #[tokio::test]
    async fn test_signed_in_profile_under_context() {
        let app = build_router(&config(&[("CONTEXT_PATH", "/admin")]), repos());
        let cookie = sign_in(&app, "/admin/login").await;

        let response = app
            .oneshot(
                Request::get("/admin/user/profile")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["intUserId"], "10001");
        assert_eq!(body["feeRate"], "0.003");
    }

    #[tokio::test]
    async fn test_bypass_mode_serves_pages_without_login() {
        let app = build_router(&config(&[("GATE_ENABLED", "false")]), repos());

        let response = app
            .oneshot(Request::get("/index").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
