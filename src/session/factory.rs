//! Session provisioning.

use std::sync::Arc;

use tracing::{debug, info};

use super::{is_valid_cookie_name, IncomingContext, OutgoingContext, Session, SessionId};
use crate::cache::CacheClient;
use crate::config::SessionSection;
use crate::{Error, Result};

/// Cookie carrying the permanent session identifier.
pub const DEFAULT_SESSION_COOKIE: &str = "ss-pid";

/// Resolves or issues a session identifier and binds a [`Session`] to it.
///
/// Two concurrent first requests from the same client each see no cookie
/// and are issued distinct identifiers; the client keeps whichever cookie
/// it stores last. Nothing here serializes issuance.
#[derive(Clone)]
pub struct SessionFactory {
    cache: Arc<dyn CacheClient>,
    cookie_name: String,
}

impl SessionFactory {
    /// Create a factory issuing cookies called `cookie_name`.
    ///
    /// Fails if the name cannot be written into a `Set-Cookie` header.
    pub fn new(cache: Arc<dyn CacheClient>, cookie_name: impl Into<String>) -> Result<Self> {
        let cookie_name = cookie_name.into();
        if !is_valid_cookie_name(&cookie_name) {
            return Err(Error::InvalidCookieName(cookie_name));
        }
        Ok(Self { cache, cookie_name })
    }

    /// Create a factory using [`DEFAULT_SESSION_COOKIE`].
    pub fn with_default_cookie(cache: Arc<dyn CacheClient>) -> Self {
        Self {
            cache,
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    /// Create a factory using the configured cookie name.
    pub fn from_config(cache: Arc<dyn CacheClient>, config: &SessionSection) -> Result<Self> {
        Self::new(cache, config.cookie_name.clone())
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Bind a session store to an already known identifier.
    pub fn session(&self, id: SessionId) -> Session {
        Session::new(Arc::clone(&self.cache), id)
    }

    /// Resolve the session for a request, issuing a new identifier on the
    /// response if the request carries none.
    ///
    /// A cookie that is present but malformed is treated as absent.
    pub fn get_or_create_session<I, O>(&self, incoming: &I, outgoing: &mut O) -> Session
    where
        I: IncomingContext + ?Sized,
        O: OutgoingContext + ?Sized,
    {
        let existing = incoming
            .cookie_value(&self.cookie_name)
            .and_then(|value| match value.parse::<SessionId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    debug!(cookie = %self.cookie_name, "ignoring malformed session cookie");
                    None
                }
            });

        let id = match existing {
            Some(id) => {
                debug!(session = %id, "resolved existing session");
                id
            }
            None => {
                let id = outgoing.create_permanent_session_id(&self.cookie_name);
                info!(session = %id, "issued new session");
                id
            }
        };

        self.session(id)
    }
}

impl std::fmt::Debug for SessionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFactory")
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}
