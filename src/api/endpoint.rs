//! Mounting a [`RestService`] on an axum route.

use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{header::ALLOW, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, MethodRouter},
    Json,
};
use serde::de::DeserializeOwned;

use super::types::ErrorResponse;
use crate::dispatch::{RestService, Verb, VerbDispatch};
use crate::session::{Session, SessionFactory, SessionId};
use crate::{Error, Result};

/// Everything a request type may draw on while being built from HTTP.
pub struct HttpContext<'a> {
    pub verb: Verb,
    pub headers: &'a HeaderMap,
    pub body: &'a Bytes,
    sessions: &'a SessionFactory,
    response_headers: &'a mut HeaderMap,
    session_id: Option<SessionId>,
}

impl<'a> HttpContext<'a> {
    pub fn new(
        verb: Verb,
        headers: &'a HeaderMap,
        body: &'a Bytes,
        sessions: &'a SessionFactory,
        response_headers: &'a mut HeaderMap,
    ) -> Self {
        Self {
            verb,
            headers,
            body,
            sessions,
            response_headers,
            session_id: None,
        }
    }

    /// Resolve the caller's session, issuing a cookie on the response if
    /// the request carries none.
    ///
    /// The identifier is resolved once per exchange; later calls bind to
    /// the same session without issuing another cookie.
    pub fn session(&mut self) -> Session {
        if let Some(id) = &self.session_id {
            return self.sessions.session(id.clone());
        }
        let session = self
            .sessions
            .get_or_create_session(self.headers, &mut *self.response_headers);
        self.session_id = Some(session.id().clone());
        session
    }

    /// Parse the body as JSON. An empty body is `Ok(None)`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(self.body)
            .map(Some)
            .map_err(|e| Error::BadRequest(format!("invalid JSON body: {e}")))
    }
}

/// A request type that can be built from an HTTP exchange.
pub trait FromHttp: Sized {
    fn from_http(ctx: &mut HttpContext<'_>) -> Result<Self>;
}

/// Route all five verbs on a path to `service`.
///
/// Verbs the service does not support still go through the pipeline and
/// surface as `405 Method Not Allowed` with an `Allow` header, unless the
/// service's `handle_exception` converts them. Other methods are rejected
/// before dispatch.
pub fn rest_endpoint<S, R>(service: Arc<S>, sessions: SessionFactory) -> MethodRouter
where
    S: RestService<R> + 'static,
    R: FromHttp + 'static,
{
    any(move |method: Method, headers: HeaderMap, body: Bytes| {
        let service = Arc::clone(&service);
        let sessions = sessions.clone();
        async move { handle::<S, R>(&*service, &sessions, method, headers, body) }
    })
}

/// Build the request, run the dispatch pipeline and shape the response.
pub fn handle<S, R>(
    service: &S,
    sessions: &SessionFactory,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: RestService<R> + ?Sized,
    R: FromHttp,
{
    let Some(verb) = Verb::from_method(&method) else {
        let mut response = (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ErrorResponse::method_not_allowed(method.as_str())),
        )
            .into_response();
        insert_allow::<S, R>(response.headers_mut(), service);
        return response;
    };

    let mut response_headers = HeaderMap::new();
    let result = {
        let mut ctx = HttpContext::new(verb, &headers, &body, sessions, &mut response_headers);
        R::from_http(&mut ctx).and_then(|request| service.dispatch(verb, &request))
    };

    let mut response = match result {
        Ok(reply) => reply.into_response(),
        Err(err) => {
            let unsupported = err.is_programmer_error();
            let mut response = err.into_response();
            if unsupported {
                insert_allow::<S, R>(response.headers_mut(), service);
            }
            response
        }
    };
    response.headers_mut().extend(response_headers);
    response
}

fn insert_allow<S, R>(headers: &mut HeaderMap, service: &S)
where
    S: RestService<R> + ?Sized,
{
    let allow = service
        .supported_verbs()
        .iter()
        .map(Verb::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if let Ok(value) = HeaderValue::from_str(&allow) {
        headers.insert(ALLOW, value);
    }
}
