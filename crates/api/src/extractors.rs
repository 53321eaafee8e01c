//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use friendgraph_common::AppError;
use serde::de::DeserializeOwned;

/// JSON request body.
///
/// Unlike `axum::Json`, the `Content-Type` header is not required, and every
/// decoding failure becomes [`AppError::BodyInvalid`]. A literal `null`
/// body decodes to `T::default()`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::body_invalid())?;

        serde_json::from_slice::<Option<T>>(&bytes)
            .map(|body| Self(body.unwrap_or_default()))
            .map_err(|e| {
                tracing::debug!(error = %e, "Failed to decode request body");
                AppError::body_invalid()
            })
    }
}

/// Asserts the request carries no body.
#[derive(Debug, Clone, Copy)]
pub struct NoBody;

impl<S> FromRequest<S> for NoBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::body_invalid())?;

        if bytes.is_empty() {
            Ok(Self)
        } else {
            Err(AppError::body_invalid())
        }
    }
}
