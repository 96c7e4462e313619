//! Conversion of replies and faults into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::ErrorResponse;
use crate::dispatch::Reply;
use crate::Error;

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Data(value) => (StatusCode::OK, Json(value)).into_response(),
            Reply::NoContent => StatusCode::NO_CONTENT.into_response(),
            Reply::Http(result) => match result.body {
                Some(body) => (result.status, result.headers, Json(body)).into_response(),
                None => (result.status, result.headers).into_response(),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (self.status_code(), Json(ErrorResponse::from_error(&self))).into_response()
    }
}
