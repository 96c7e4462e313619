//! Session management module.
//!
//! A [`SessionFactory`] resolves the client's session identifier from a
//! cookie (issuing one if needed) and hands back a [`Session`]: a typed and
//! untyped key-value view over the cache, namespaced by identifier.

mod factory;
mod id;
mod store;
mod transport;

pub use factory::{SessionFactory, DEFAULT_SESSION_COOKIE};
pub use id::SessionId;
pub use store::{Session, SESSION_KEY_PREFIX};
pub use transport::{
    is_valid_cookie_name, parse_cookie, permanent_cookie, IncomingContext, IssuedCookies, OutgoingContext,
    PERMANENT_COOKIE_MAX_AGE,
};
