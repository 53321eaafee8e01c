//! Subscription endpoint.

use axum::{Router, extract::State, routing::post};
use friendgraph_common::AppResult;

use crate::{
    extractors::JsonBody,
    requests::RequestorRequest,
    response::{self, ApiResponse, Empty},
    state::AppState,
};

/// Subscribe the requestor to the target's updates.
async fn subscribe(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RequestorRequest>,
) -> AppResult<ApiResponse<Empty>> {
    let (requestor, target) = req.validate()?;
    state
        .relationship_service
        .subscribe(requestor, target)
        .await?;
    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/subscription", post(subscribe))
}
