//! HTTP Handlers

use axum::extract::{Query, State};
use axum::response::Html;
use axum::{Extension, Json};
use gate::CurrentUser;
use std::sync::Arc;

use crate::domain::camera::Camera;
use crate::domain::page::{GridPage, PageRequest};
use crate::domain::repository::{AccountRepository, CameraRepository};
use crate::error::{ConsoleError, ConsoleResult};
use crate::presentation::dto::{PageQuery, ProfileResponse};
use crate::presentation::view;

/// Shared state for console handlers
#[derive(Clone)]
pub struct ConsoleAppState<C, A>
where
    C: CameraRepository + Clone + Send + Sync + 'static,
    A: AccountRepository + Clone + Send + Sync + 'static,
{
    pub cameras: Arc<C>,
    pub accounts: Arc<A>,
}

/// GET /index
pub async fn index() -> Html<String> {
    Html(view::render(view::INDEX))
}

/// GET /user/index
pub async fn user_index() -> Html<String> {
    Html(view::render(view::TRADE_RECORD))
}

/// GET /camera
pub async fn camera_index() -> Html<String> {
    Html(view::render(view::CAMERA_LIST))
}

/// GET /camera/list
pub async fn camera_list<C, A>(
    State(state): State<ConsoleAppState<C, A>>,
    Query(query): Query<PageQuery>,
) -> ConsoleResult<Json<GridPage<Camera>>>
where
    C: CameraRepository + Clone + Send + Sync + 'static,
    A: AccountRepository + Clone + Send + Sync + 'static,
{
    let request = PageRequest::new(query.page, query.rows)?;
    let page = state.cameras.find_page(&request).await?;
    Ok(Json(page.into()))
}

/// GET /user/profile
pub async fn user_profile<C, A>(
    State(state): State<ConsoleAppState<C, A>>,
    user: Option<Extension<CurrentUser>>,
) -> ConsoleResult<Json<ProfileResponse>>
where
    C: CameraRepository + Clone + Send + Sync + 'static,
    A: AccountRepository + Clone + Send + Sync + 'static,
{
    let Extension(user) = user.ok_or(ConsoleError::NotSignedIn)?;

    let card_no = state
        .accounts
        .find_card_no(&user.int_user_id)
        .await?
        .ok_or(ConsoleError::AccountNotFound)?;
    let fee_rate = state
        .accounts
        .find_fee_rate(&user.int_user_id)
        .await?
        .ok_or(ConsoleError::AccountNotFound)?;

    Ok(Json(ProfileResponse {
        user_id: user.user_id,
        int_user_id: user.int_user_id,
        card_no,
        fee_rate,
    }))
}
