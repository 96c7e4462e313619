//! Result shaping for verb handlers.

use axum::http::{header::HeaderName, HeaderMap, HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// The value returned by a verb handler.
///
/// Anything other than [`Reply::Http`] implies a default success status.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Application data serialized as a success response.
    Data(Value),
    /// No response body.
    NoContent,
    /// Explicit status code and headers.
    Http(HttpResult),
}

impl Reply {
    /// Serialize `value` into a data reply.
    pub fn data<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Reply::Data(serde_json::to_value(value)?))
    }

    /// Status code the transport should send.
    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Data(_) => StatusCode::OK,
            Reply::NoContent => StatusCode::NO_CONTENT,
            Reply::Http(result) => result.status,
        }
    }

    /// Body to serialize, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Reply::Data(value) => Some(value),
            Reply::NoContent => None,
            Reply::Http(result) => result.body.as_ref(),
        }
    }

    /// Whether this reply carries an explicit status.
    pub fn is_structured(&self) -> bool {
        matches!(self, Reply::Http(_))
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::Data(value)
    }
}

impl From<HttpResult> for Reply {
    fn from(result: HttpResult) -> Self {
        Reply::Http(result)
    }
}

/// A reply that controls the exact status code and headers.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl HttpResult {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Build an error reply with the same JSON shape as unhandled faults.
    pub fn error(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self::new(status).with_body(serde_json::json!({
            "code": code,
            "message": message.into(),
        }))
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header. Invalid header values are rejected as a bad request.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::BadRequest(format!("invalid value for header {name}")))?;
        self.headers.append(name, value);
        Ok(self)
    }
}
