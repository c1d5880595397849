//! HTTP Handlers
//!
//! The login flow that places `user_id` / `int_user_id` into the session.

use axum::{Extension, Form};
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use kernel::id::SessionId;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};
use std::sync::Arc;

use crate::application::config::{GateConfig, SessionConfig};
use crate::application::{
    RecordOperationUseCase, SignInInput, SignInUseCase, SignOutUseCase, login_location,
};
use crate::domain::opt_log::{Operation, OptLog};
use crate::domain::repository::{OptLogRepository, SessionRepository, UserRepository};
use crate::domain::session::{CurrentUser, IS_TIMEOUT, SessionAttributes};
use crate::error::{GateError, GateResult};
use crate::presentation::dto::LoginForm;
use crate::presentation::middleware::{ClientIp, load_session};
use crate::presentation::view::{INVALID_LOGIN_NOTICE, SESSION_EXPIRED_NOTICE, login_page};

/// Landing page after a successful login, relative to the deployment root
pub const HOME_PATH: &str = "/index";

/// Shared state for login handlers
#[derive(Clone)]
pub struct GateAppState<U, S, L>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub opt_log: Arc<L>,
    pub config: Arc<GateConfig>,
    pub session_config: Arc<SessionConfig>,
    pub context_path: Arc<str>,
}

impl<U, S, L> GateAppState<U, S, L>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    fn form_action(&self) -> String {
        format!("{}/login", self.context_path)
    }

    async fn record(&self, log: OptLog) {
        RecordOperationUseCase::new(self.opt_log.clone())
            .execute(log)
            .await;
    }
}

fn redirect(location: &str) -> Response {
    let location = HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"));
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

// ============================================================================
// Login page
// ============================================================================

/// GET /login
///
/// Shows the expiry notice once when the gate flagged the session.
pub async fn login_form<U, S, L>(
    State(state): State<GateAppState<U, S, L>>,
    headers: HeaderMap,
) -> GateResult<Html<String>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    let session = load_session(
        state.sessions.as_ref(),
        &headers,
        &state.session_config.cookie_name,
    )
    .await?;

    let mut notice = None;
    if let Some(mut session) = session {
        if session.flag(IS_TIMEOUT) {
            session.remove_attribute(IS_TIMEOUT);
            state.sessions.save(&session).await?;
            notice = Some(SESSION_EXPIRED_NOTICE);
        }
    }

    Ok(Html(login_page(&state.form_action(), notice)))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /login
pub async fn login<U, S, L>(
    State(state): State<GateAppState<U, S, L>>,
    OriginalUri(uri): OriginalUri,
    client_ip: Option<Extension<ClientIp>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> GateResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    let previous_session = extract_cookie(&headers, &state.session_config.cookie_name)
        .and_then(|value| value.parse::<SessionId>().ok());

    let client_ip = client_ip.and_then(|Extension(ClientIp(ip))| ip);
    let attempted_user_id = form.user_id.trim().to_string();

    let use_case = SignInUseCase::new(state.users.clone(), state.sessions.clone());
    let input = SignInInput {
        user_id: form.user_id,
        password: form.password,
        previous_session,
    };

    let session = match use_case.execute(input).await {
        Ok(session) => session,
        Err(GateError::InvalidCredentials) => {
            tracing::warn!("Invalid login attempt");
            state
                .record(
                    OptLog::new(Operation::SignInFailed, uri.path())
                        .with_user(attempted_user_id)
                        .with_client_ip(client_ip),
                )
                .await;
            return Ok((
                StatusCode::UNAUTHORIZED,
                Html(login_page(&state.form_action(), Some(INVALID_LOGIN_NOTICE))),
            )
                .into_response());
        }
        Err(e) => return Err(e),
    };

    state
        .record(
            OptLog::new(Operation::SignIn, uri.path())
                .with_user(attempted_user_id)
                .with_client_ip(client_ip),
        )
        .await;

    let cookie = state.session_config.cookie(&state.context_path);
    let mut response = redirect(&format!("{}{}", state.context_path, HOME_PATH));
    response.headers_mut().insert(
        header::SET_COOKIE,
        set_cookie_header(&cookie, &session.id.to_string()),
    );
    Ok(response)
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /logout
pub async fn logout<U, S, L>(
    State(state): State<GateAppState<U, S, L>>,
    OriginalUri(uri): OriginalUri,
    client_ip: Option<Extension<ClientIp>>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
) -> GateResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    if let Some(session_id) = extract_cookie(&headers, &state.session_config.cookie_name)
        .and_then(|value| value.parse::<SessionId>().ok())
    {
        SignOutUseCase::new(state.sessions.clone())
            .execute(&session_id)
            .await?;
    }

    let mut log = OptLog::new(Operation::SignOut, uri.path())
        .with_client_ip(client_ip.and_then(|Extension(ClientIp(ip))| ip));
    if let Some(Extension(user)) = user {
        log = log.with_user(user.user_id);
    }
    state.record(log).await;

    let cookie = state.session_config.cookie(&state.context_path);
    let mut response = redirect(&login_location(state.config.login_path(), &state.context_path));
    response
        .headers_mut()
        .insert(header::SET_COOKIE, delete_cookie_header(&cookie));
    Ok(response)
}
