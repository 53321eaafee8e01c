//! Message recipient endpoint.

use axum::{Router, extract::State, routing::get};
use friendgraph_common::AppResult;

use crate::{
    extractors::JsonBody,
    requests::RecipientsRequest,
    response::{ApiResponse, RecipientsPayload},
    state::AppState,
};

/// Everyone who should receive a message from the sender.
async fn recipients(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RecipientsRequest>,
) -> AppResult<ApiResponse<RecipientsPayload>> {
    let (sender, text) = req.validate()?;
    let recipients = state.graph_service.recipients(sender, text).await?;
    Ok(ApiResponse::ok(RecipientsPayload { recipients }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/recipients", get(recipients))
}
