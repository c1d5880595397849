//! Gate Middleware
//!
//! Runs the gate in front of every handler it is layered over.

use axum::body::Body;
use axum::extract::{ConnectInfo, OriginalUri, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::SessionId;
use platform::client::extract_client_ip;
use platform::cookie::{extract_cookie, set_cookie_header};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::application::config::{GateConfig, SessionConfig};
use crate::application::{RecordOperationUseCase, evaluate};
use crate::domain::decision::{Denial, GateDecision};
use crate::domain::opt_log::{Operation, OptLog};
use crate::domain::repository::{OptLogRepository, SessionRepository};
use crate::domain::request::RequestDescriptor;
use crate::domain::session::{CurrentUser, Session};
use crate::error::GateResult;

/// Response header that tells script callers their session is gone
pub const SESSION_STATUS: HeaderName = HeaderName::from_static("sessionstatus");

/// Caller address as seen by the gate, available to handlers behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

/// Middleware state
#[derive(Clone)]
pub struct GateMiddlewareState<S, L>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    pub sessions: Arc<S>,
    pub opt_log: Arc<L>,
    pub config: Arc<GateConfig>,
    pub session_config: Arc<SessionConfig>,
    /// Deployment root (`""` when mounted at `/`)
    pub context_path: Arc<str>,
}

/// Look up the caller's session from the session cookie
///
/// A missing or unparsable cookie is `Ok(None)`; only store failures are errors.
pub(crate) async fn load_session<S>(
    sessions: &S,
    headers: &HeaderMap,
    cookie_name: &str,
) -> GateResult<Option<Session>>
where
    S: SessionRepository,
{
    let Some(session_id) = extract_cookie(headers, cookie_name)
        .and_then(|value| value.parse::<SessionId>().ok())
    else {
        return Ok(None);
    };
    sessions.find(&session_id).await
}

/// Middleware that lets only logged-in callers (or exempt paths) through
///
/// A caller without a session gets a new one, so a browser redirect can
/// record `istimeout`. The new session is stored only when the gate wrote
/// to it. If the store fails, the request is judged as having no session.
pub async fn require_login<S, L>(
    State(state): State<GateMiddlewareState<S, L>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    let (mut session, is_new) =
        match load_session(state.sessions.as_ref(), req.headers(), &state.session_config.cookie_name)
            .await
        {
            Ok(Some(session)) => (Some(session), false),
            Ok(None) => (Some(Session::new()), true),
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, treating request as anonymous");
                (None, false)
            }
        };

    let uri_path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let client_ip = extract_client_ip(
        req.headers(),
        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip()),
    );

    let decision = evaluate(
        &state.config,
        RequestDescriptor::new(
            &uri_path,
            &state.context_path,
            req.headers(),
            session.as_mut(),
        ),
    );

    let denial = match decision {
        GateDecision::Allow => {
            if let Some(user) = session.as_ref().and_then(|s| CurrentUser::from_session(s)) {
                req.extensions_mut().insert(user);
            }
            req.extensions_mut().insert(ClientIp(client_ip));
            return next.run(req).await;
        }
        GateDecision::Deny(denial) => denial,
    };

    tracing::info!(
        path = %uri_path,
        client_ip = ?client_ip,
        decision = %denial,
        "Request blocked by login gate"
    );
    RecordOperationUseCase::new(state.opt_log.clone())
        .execute(
            OptLog::new(Operation::GateDenied, uri_path.as_str())
                .with_client_ip(client_ip)
                .with_detail(denial.to_string()),
        )
        .await;

    match denial {
        Denial::SessionTimeout => (
            StatusCode::OK,
            [(SESSION_STATUS, HeaderValue::from_static("timeout"))],
        )
            .into_response(),
        Denial::Redirect { location } => {
            let location =
                HeaderValue::from_str(&location).unwrap_or_else(|_| HeaderValue::from_static("/"));
            let mut response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();

            if let Some(session) = session {
                match state.sessions.save(&session).await {
                    Ok(()) if is_new => {
                        let cookie = state.session_config.cookie(&state.context_path);
                        response.headers_mut().insert(
                            header::SET_COOKIE,
                            set_cookie_header(&cookie, &session.id.to_string()),
                        );
                    }
                    Ok(()) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to record session timeout flag");
                    }
                }
            }
            response
        }
    }
}
