//! Error types for friendgraph.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// A relationship that already exists between two users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RelationshipConflict {
    #[error("The friend relationship already exists")]
    AlreadyFriends,

    #[error("The subscription already exists")]
    AlreadySubscribed,

    #[error("The blocking relationship already exists")]
    AlreadyBlocked,
}

/// Application error type.
///
/// The `Display` output is the exact text returned to API clients.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("{0}")]
    BodyInvalid(String),

    #[error("{0}")]
    Validation(String),

    // === Downstream Errors ===
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Conflict(#[from] RelationshipConflict),

    #[error("The users have blocked each other")]
    Blocked,

    #[error("{0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message used when a body cannot be decoded into the expected shape.
    pub const BODY_INVALID: &'static str = "Body request invalid format";

    /// Message used when a body decodes but carries no usable fields.
    pub const BODY_EMPTY: &'static str = "Request body is empty";

    /// Message used when both sides of a pair are the same address.
    pub const SAME_EMAIL: &'static str = "Two email addresses must be different";

    /// Shorthand for the undecodable-body error.
    #[must_use]
    pub fn body_invalid() -> Self {
        Self::BodyInvalid(Self::BODY_INVALID.to_string())
    }

    /// Shorthand for the empty-body validation error.
    #[must_use]
    pub fn body_empty() -> Self {
        Self::Validation(Self::BODY_EMPTY.to_string())
    }

    /// Validation error for a pair naming the same user twice.
    #[must_use]
    pub fn same_email() -> Self {
        Self::Validation(Self::SAME_EMAIL.to_string())
    }

    /// Error for an email address that does not belong to any user.
    #[must_use]
    pub fn email_not_found(email: &str) -> Self {
        Self::NotFound(format!("{email} does not exist"))
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Everything past request validation is reported as a server-side
    /// failure, including lookups and relationship conflicts.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BodyInvalid(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::NotFound(_)
            | Self::Conflict(_)
            | Self::Blocked
            | Self::Database(_)
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BodyInvalid(_) => "BODY_INVALID",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(RelationshipConflict::AlreadyFriends) => "ALREADY_FRIENDS",
            Self::Conflict(RelationshipConflict::AlreadySubscribed) => "ALREADY_SUBSCRIBED",
            Self::Conflict(RelationshipConflict::AlreadyBlocked) => "ALREADY_BLOCKED",
            Self::Blocked => "BLOCKED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = Json(json!({
            "message": self.to_string(),
            "success": false,
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(AppError::body_invalid().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::body_empty().status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_downstream_errors_are_server_errors() {
        assert!(AppError::email_not_found("a@b.com").is_server_error());
        assert!(AppError::Blocked.is_server_error());
        assert!(AppError::from(RelationshipConflict::AlreadyFriends).is_server_error());
        assert!(AppError::Database("boom".to_string()).is_server_error());
    }

    #[test]
    fn test_messages_are_not_prefixed() {
        assert_eq!(AppError::body_empty().to_string(), "Request body is empty");
        assert_eq!(
            AppError::email_not_found("kate@example.com").to_string(),
            "kate@example.com does not exist"
        );
        assert_eq!(
            AppError::Database("connection refused".to_string()).to_string(),
            "connection refused"
        );
        assert_eq!(
            AppError::from(RelationshipConflict::AlreadySubscribed).to_string(),
            "The subscription already exists"
        );
    }

    #[tokio::test]
    async fn test_into_response_shape() {
        let response = AppError::body_invalid().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"message": "Body request invalid format", "success": false})
        );
    }
}
