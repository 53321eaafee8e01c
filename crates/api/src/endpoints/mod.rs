//! API endpoints.

mod blocking;
mod friends;
mod recipients;
mod subscription;
mod users;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    let v1 = Router::new()
        .merge(users::router())
        .merge(friends::router())
        .merge(recipients::router())
        .merge(subscription::router())
        .merge(blocking::router());

    Router::new().nest("/v1", v1)
}
