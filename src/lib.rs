//! # restkit
//!
//! Verb-dispatch service base and cookie-scoped session store for HTTP
//! services.
//!
//! Two pieces cooperate:
//!
//! - **Verb dispatch** ([`dispatch`]): a service handles one request type
//!   and opts into any subset of GET/PUT/POST/DELETE/PATCH. Every verb runs
//!   through the same `before_execute -> on_<verb> -> after_execute`
//!   pipeline, with a `handle_exception` hook that can turn a fault into a
//!   reply.
//! - **Sessions** ([`session`]): a [`SessionFactory`] resolves the client's
//!   session cookie (issuing one if needed) and returns a [`Session`], a
//!   namespaced key-value view over a [`CacheClient`].
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use restkit::{IssuedCookies, MemoryCacheClient, SessionFactory};
//!
//! let cache = Arc::new(MemoryCacheClient::new());
//! let factory = SessionFactory::new(cache, "ss-pid").unwrap();
//!
//! // No cookie on the request: a new session id is issued.
//! let request = axum::http::HeaderMap::new();
//! let mut response = IssuedCookies::new();
//! let session = factory.get_or_create_session(&request, &mut response);
//!
//! session.set("cart", &vec!["apple"]).unwrap();
//! let cart: Option<Vec<String>> = session.get("cart").unwrap();
//! assert_eq!(cart.unwrap(), vec!["apple"]);
//! assert_eq!(response.issued().len(), 1);
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use cache::{CacheClient, CacheClientExt, CacheError, MemoryCacheClient};
pub use dispatch::{HttpResult, Reply, RestService, Verb, VerbDispatch};
pub use error::{Error, Result};
pub use session::{
    IncomingContext, IssuedCookies, OutgoingContext, Session, SessionFactory, SessionId,
};
