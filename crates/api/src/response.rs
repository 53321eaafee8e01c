//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Successful response: `success: true` next to the payload's own fields.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`; failures go through the error response.
    pub success: bool,
    /// Payload fields, flattened into the response object.
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// No payload beyond the success flag.
#[derive(Debug, Serialize)]
pub struct Empty {}

/// `{"success": true}`.
#[must_use]
pub const fn ok() -> ApiResponse<Empty> {
    ApiResponse::ok(Empty {})
}

/// Every registered user.
#[derive(Debug, Serialize)]
pub struct UsersPayload {
    /// Emails in id order.
    pub users: Vec<String>,
    /// Number of users.
    pub count: usize,
}

/// A list of friends with its length.
#[derive(Debug, Serialize)]
pub struct FriendsPayload {
    /// Number of friends.
    pub count: usize,
    /// Friend emails.
    pub friends: Vec<String>,
}

impl From<Vec<String>> for FriendsPayload {
    fn from(friends: Vec<String>) -> Self {
        Self {
            count: friends.len(),
            friends,
        }
    }
}

/// Who receives a message.
#[derive(Debug, Serialize)]
pub struct RecipientsPayload {
    /// Recipient emails, each listed once.
    pub recipients: Vec<String>,
}
