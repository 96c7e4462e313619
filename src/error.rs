//! Error types for restkit.

use axum::http::StatusCode;
use thiserror::Error;

use crate::cache::CacheError;
use crate::dispatch::Verb;

/// Main error type for restkit operations.
///
/// Every fault raised inside a dispatch pipeline is one of these. Handlers
/// return the business variants; the dispatcher itself only ever produces
/// [`Error::UnsupportedVerb`].
#[derive(Error, Debug)]
pub enum Error {
    /// A verb was dispatched to a service that never opted into it.
    ///
    /// This is a wiring mistake, not a runtime condition.
    #[error("{service} does not implement {verb}")]
    UnsupportedVerb { verb: Verb, service: &'static str },

    /// The operation is not valid for the current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The session cookie name cannot be written as a cookie.
    #[error("invalid session cookie name: '{0}'")]
    InvalidCookieName(String),

    /// Failure reported by the cache client.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// A reply body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status used when the fault reaches the transport unhandled.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedVerb { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidOperation(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCookieName(_)
            | Self::Cache(_)
            | Self::Serialization(_)
            | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedVerb { .. } => "UNSUPPORTED_VERB",
            Self::InvalidOperation(_) => "INVALID_OPERATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidCookieName(_) => "INVALID_COOKIE_NAME",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Whether this fault signals a programming error rather than a
    /// business failure.
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, Self::UnsupportedVerb { .. })
    }
}

/// Convenience Result type for restkit operations.
pub type Result<T> = std::result::Result<T, Error>;
