//! JSON body extractor that rejects with 400 and runs payload validation.

use crate::error::AppError;
use crate::model::Validate;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

/// Decodes the body as JSON whatever the `Content-Type`. Decode failures (bad syntax, wrong
/// types, missing fields) become `AppError::BadRequest`, and `T::validate` must pass.
#[derive(Clone, Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(rejection.body_text())
            } else {
                AppError::BadRequest(rejection.body_text())
            }
        })?;
        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
