//! Session identifier type.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque identifier naming one client's session.
///
/// Fresh identifiers are random (UUID v4, 32 lowercase hex digits) and are
/// never derived from request content. Identifiers read back from a cookie
/// are accepted as-is as long as they are non-empty, at most
/// [`SessionId::MAX_LEN`] bytes, and drawn from `[A-Za-z0-9_-]`. That keeps
/// the cache namespace `sess:<id>:` unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Longest identifier accepted from a client.
    pub const MAX_LEN: usize = 128;

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(crate::error::Error::BadRequest(format!(
                "malformed session id: {s:?}"
            )))
        }
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
