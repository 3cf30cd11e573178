//! The request-dispatch template every bootcamp Lambda follows
//!
//! A deployed function is one [`Handler`] implementation plus a `main` that
//! feeds incoming events through [`dispatch`]. The flow is linear:
//! validate, then handle, then respond. Validation failures short-circuit
//! with a 400 envelope; handler errors are translated at this boundary and
//! never propagate to the invoking runtime.

use std::collections::HashMap;

use async_trait::async_trait;
use lambda_http::http::{HeaderName, HeaderValue, StatusCode};
use lambda_http::{Body, Response};
use lambda_runtime::Context;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::models::ErrorResponse;

const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

/// The uniform response structure returned by every handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// Serialized JSON payload
    pub body: String,
}

impl Envelope {
    /// Build an envelope around an already-serialized JSON body
    pub fn raw(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE_JSON.0.to_string(), CONTENT_TYPE_JSON.1.to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Build an envelope by serializing `body` as JSON
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Result<Self> {
        Ok(Self::raw(status_code, serde_json::to_string(body)?))
    }

    /// Build an error envelope from the shared error taxonomy
    pub fn from_error(err: &Error) -> Self {
        let body = ErrorResponse::new(err.code(), err.to_string());
        match serde_json::to_string(&body) {
            Ok(serialized) => Self::raw(err.status_code(), serialized),
            Err(_) => Self::raw(
                500,
                r#"{"error":"internal_error","message":"failed to serialize error body"}"#.to_string(),
            ),
        }
    }

    /// Build a 400 envelope from a structured validation failure
    pub fn from_validation(failure: &ValidationFailure) -> Self {
        let mut body = ErrorResponse::new("validation_error", failure.reason.clone());
        if let Some(field) = &failure.field {
            body = body.with_details(serde_json::json!({ "field": field }));
        }
        match serde_json::to_string(&body) {
            Ok(serialized) => Self::raw(400, serialized),
            Err(_) => Self::raw(
                400,
                r#"{"error":"validation_error","message":"request validation failed"}"#.to_string(),
            ),
        }
    }

    /// Convert into an HTTP response for `lambda_http` entry points
    ///
    /// Infallible: an out-of-range status falls back to 500, malformed
    /// header pairs are skipped.
    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }
        response
    }
}

/// A structured validation failure: the reason and the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: Option<String>,
    pub reason: String,
}

impl ValidationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            field: None,
            reason: reason.into(),
        }
    }

    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            reason: reason.into(),
        }
    }
}

/// What a handler body produces: a fully formed envelope, or a raw value
/// for the dispatcher to wrap with status 200
#[derive(Debug)]
pub enum Outcome {
    Envelope(Envelope),
    Value(serde_json::Value),
}

impl From<Envelope> for Outcome {
    fn from(envelope: Envelope) -> Self {
        Outcome::Envelope(envelope)
    }
}

impl From<serde_json::Value> for Outcome {
    fn from(value: serde_json::Value) -> Self {
        Outcome::Value(value)
    }
}

/// One deployed function: an optional validation step and a handler body
#[async_trait]
pub trait Handler {
    /// The transport-level event this function receives
    type Event: Send + 'static;

    /// Pre-handler validation; the default accepts everything, for handlers
    /// that validate inline
    fn validate(&self, _event: &Self::Event) -> std::result::Result<(), ValidationFailure> {
        Ok(())
    }

    async fn handle(&self, event: Self::Event, ctx: &Context) -> Result<Outcome>;
}

/// Run one event through the template and always come back with an envelope
pub async fn dispatch<H>(handler: &H, event: H::Event, ctx: &Context) -> Envelope
where
    H: Handler + Sync,
{
    if let Err(failure) = handler.validate(&event) {
        return Envelope::from_validation(&failure);
    }

    match handler.handle(event, ctx).await {
        Ok(Outcome::Envelope(envelope)) => envelope,
        Ok(Outcome::Value(value)) => Envelope::raw(200, value.to_string()),
        Err(e) => Envelope::from_error(&e),
    }
}
