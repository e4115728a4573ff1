//! Response shaping for service results.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// What a service operation produced: a status, optional data and an optional message.
///
/// Built fresh per request; the handler decides the JSON key the data is rendered under.
///
/// ```rust
/// use axum::http::StatusCode;
/// use axum_helpers::Payload;
///
/// let payload = Payload::created(7).with_message("Item created");
/// assert_eq!(payload.status(), StatusCode::CREATED);
/// assert_eq!(payload.message(), Some("Item created"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Payload<T> {
    status: StatusCode,
    data: Option<T>,
    message: Option<String>,
}

impl<T> Payload<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    /// A payload carrying only a status and a message.
    pub fn message_only(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T: Serialize> Payload<T> {
    /// Render as `{key: data, message}` at the payload's status. Absent parts are omitted.
    pub fn render(self, key: &str) -> Result<Response, AppError> {
        let mut body = Map::new();
        if let Some(data) = self.data {
            body.insert(key.to_string(), serde_json::to_value(data)?);
        }
        if let Some(message) = self.message {
            body.insert("message".to_string(), Value::String(message));
        }
        Ok((self.status, Json(Value::Object(body))).into_response())
    }
}
