//! User endpoints.

use axum::{Router, extract::State, routing::get};
use friendgraph_common::AppResult;

use crate::{
    extractors::NoBody,
    response::{ApiResponse, UsersPayload},
    state::AppState,
};

/// List the email of every user.
async fn list_users(
    State(state): State<AppState>,
    _: NoBody,
) -> AppResult<ApiResponse<UsersPayload>> {
    let users = state.user_service.list_emails().await?;
    Ok(ApiResponse::ok(UsersPayload {
        count: users.len(),
        users,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}
