//! HTTP API layer for friendgraph.
//!
//! - **Endpoints**: relationship creation and graph queries under `/v1`
//! - **Extractors**: JSON bodies decoded into request types, empty-body checks
//! - **Requests**: field validation with the client-facing messages
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod requests;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
