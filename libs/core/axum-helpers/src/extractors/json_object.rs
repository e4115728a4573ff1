//! JSON body extractor that only accepts objects.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

/// Raw JSON object body.
///
/// Bodies that are not valid JSON, or that decode to anything other than an
/// object, are rejected with 400 `Invalid data format.`. The content type is
/// not checked. Field rules run on the untyped map afterwards.
///
/// ```ignore
/// async fn create(JsonObject(body): JsonObject) -> Result<Response, AppError> {
///     let violations = RULES.validate(&body);
///     // ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::invalid_json())?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(JsonObject(map)),
            _ => Err(AppError::invalid_json()),
        }
    }
}
