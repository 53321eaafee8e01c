//! Blocking endpoint.

use axum::{Router, extract::State, routing::post};
use friendgraph_common::AppResult;

use crate::{
    extractors::JsonBody,
    requests::RequestorRequest,
    response::{self, ApiResponse, Empty},
    state::AppState,
};

/// Block the target on behalf of the requestor.
async fn block_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RequestorRequest>,
) -> AppResult<ApiResponse<Empty>> {
    let (requestor, target) = req.validate()?;
    state.relationship_service.block(requestor, target).await?;
    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/blocking", post(block_user))
}
