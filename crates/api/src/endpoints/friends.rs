//! Friendship endpoints.

use axum::{Router, extract::State, routing::get};
use friendgraph_common::AppResult;

use crate::{
    extractors::JsonBody,
    requests::{EmailRequest, FriendPairRequest},
    response::{self, ApiResponse, Empty, FriendsPayload},
    state::AppState,
};

/// Make two users friends.
async fn create_friend(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FriendPairRequest>,
) -> AppResult<ApiResponse<Empty>> {
    let (first, second) = req.validate()?;
    state.relationship_service.add_friend(first, second).await?;
    Ok(response::ok())
}

/// Friends of one user, without anyone they share a block with.
async fn list_friends(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<EmailRequest>,
) -> AppResult<ApiResponse<FriendsPayload>> {
    let email = req.validate()?;
    let friends = state.graph_service.friends_of(email).await?;
    Ok(ApiResponse::ok(friends.into()))
}

/// Friends shared by two users.
async fn common_friends(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FriendPairRequest>,
) -> AppResult<ApiResponse<FriendsPayload>> {
    let (first, second) = req.validate()?;
    let friends = state.graph_service.common_friends(first, second).await?;
    Ok(ApiResponse::ok(friends.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/friends", get(list_friends).post(create_friend))
        .route("/commonFriends", get(common_friends))
}
