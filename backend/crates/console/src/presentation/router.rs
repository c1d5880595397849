//! Console Router

use axum::{Router, routing::get};

use crate::domain::repository::{AccountRepository, CameraRepository};
use crate::presentation::handlers::{self, ConsoleAppState};

/// Create the console router for any repository implementation
pub fn console_router<C, A>(state: ConsoleAppState<C, A>) -> Router
where
    C: CameraRepository + Clone + Send + Sync + 'static,
    A: AccountRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/index", get(handlers::index))
        .route("/camera", get(handlers::camera_index))
        .route("/camera/list", get(handlers::camera_list::<C, A>))
        .route("/user/index", get(handlers::user_index))
        .route("/user/profile", get(handlers::user_profile::<C, A>))
        .with_state(state)
}
