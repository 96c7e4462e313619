//! Transport-side collaborators used to resolve a session.
//!
//! The session layer only needs two things from the HTTP stack: read a
//! named cookie from the request, and issue a new permanent session cookie
//! on the response. Both are implemented for [`HeaderMap`] so axum handlers
//! can pass request and response headers straight through.

use std::time::Duration;

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};

use super::SessionId;

/// Lifetime of a permanent session cookie.
pub const PERMANENT_COOKIE_MAX_AGE: Duration = Duration::from_secs(20 * 365 * 24 * 60 * 60);

/// Incoming side: read cookie values.
pub trait IncomingContext {
    /// Value of the cookie called `name`, if present.
    fn cookie_value(&self, name: &str) -> Option<String>;
}

/// Outgoing side: issue a new permanent session cookie.
pub trait OutgoingContext {
    /// Generate a session identifier, attach it as a permanent cookie called
    /// `name`, and return it.
    fn create_permanent_session_id(&mut self, name: &str) -> SessionId;
}

/// Whether `name` can be used as a session cookie name.
///
/// Restricted to ASCII alphanumerics plus `-`, `_` and `.`, which are valid
/// both as a cookie token and inside a header value.
pub fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
}

/// Find `name` in one or more `Cookie` header values (`a=1; b=2`).
pub fn parse_cookie<'a>(headers: impl IntoIterator<Item = &'a str>, name: &str) -> Option<String> {
    headers
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}

/// Render a `Set-Cookie` value for a permanent session cookie.
pub fn permanent_cookie(name: &str, id: &SessionId, max_age: Duration) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        name,
        id,
        max_age.as_secs()
    )
}

impl IncomingContext for HeaderMap {
    fn cookie_value(&self, name: &str) -> Option<String> {
        parse_cookie(
            self.get_all(COOKIE).iter().filter_map(|v| v.to_str().ok()),
            name,
        )
    }
}

impl OutgoingContext for HeaderMap {
    fn create_permanent_session_id(&mut self, name: &str) -> SessionId {
        let id = SessionId::generate();
        let cookie = permanent_cookie(name, &id, PERMANENT_COOKIE_MAX_AGE);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                self.append(SET_COOKIE, value);
            }
            Err(_) => tracing::warn!(cookie = name, "cookie name is not a valid header value"),
        }
        id
    }
}

/// Outgoing context that records issued cookies instead of writing headers.
///
/// Useful for non-HTTP transports and tests.
#[derive(Debug, Default)]
pub struct IssuedCookies {
    issued: Vec<(String, SessionId)>,
    next: Vec<SessionId>,
}

impl IssuedCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `ids` in order before falling back to random identifiers.
    pub fn with_ids(ids: impl IntoIterator<Item = SessionId>) -> Self {
        let mut next: Vec<SessionId> = ids.into_iter().collect();
        next.reverse();
        Self {
            issued: Vec::new(),
            next,
        }
    }

    /// Cookies issued so far, as `(name, id)` pairs.
    pub fn issued(&self) -> &[(String, SessionId)] {
        &self.issued
    }
}

impl OutgoingContext for IssuedCookies {
    fn create_permanent_session_id(&mut self, name: &str) -> SessionId {
        let id = self.next.pop().unwrap_or_else(SessionId::generate);
        self.issued.push((name.to_string(), id.clone()));
        id
    }
}
