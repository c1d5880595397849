//! Login Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{OptLogRepository, SessionRepository, UserRepository};
use crate::presentation::handlers::{self, GateAppState};

/// Create the login router for any repository implementation
pub fn login_router<U, S, L>(state: GateAppState<U, S, L>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    L: OptLogRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/login",
            get(handlers::login_form::<U, S, L>).post(handlers::login::<U, S, L>),
        )
        .route("/logout", post(handlers::logout::<U, S, L>))
        .with_state(state)
}
