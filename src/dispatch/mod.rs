//! Verb dispatch.
//!
//! A service implements [`RestService`] for one request type and opts into
//! individual verbs through the `Supports*` capability traits. Callers go
//! through [`VerbDispatch`], which gives every service the same pipeline:
//!
//! ```text
//! before_execute -> on_<verb> -> after_execute
//!        \______________|_____________/
//!                       v (fault)
//!               handle_exception -> reply | re-raise
//! ```
//!
//! ## Example
//!
//! ```
//! use restkit::dispatch::{Reply, RestService, SupportsGet, Verb, VerbDispatch};
//! use restkit::{supports_verbs, Error};
//!
//! struct Greeter;
//!
//! impl SupportsGet<String> for Greeter {
//!     fn on_get(&self, name: &String) -> restkit::Result<Reply> {
//!         Ok(Reply::Data(format!("hello {name}").into()))
//!     }
//! }
//!
//! impl RestService<String> for Greeter {
//!     supports_verbs!(String => get);
//! }
//!
//! let reply = Greeter.get(&"ann".to_string()).unwrap();
//! assert_eq!(reply.body().unwrap(), "hello ann");
//!
//! let err = Greeter.dispatch(Verb::Put, &"ann".to_string()).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedVerb { .. }));
//! ```

mod reply;
mod service;
mod verb;

pub use reply::{HttpResult, Reply};
pub use service::{
    RestService, SupportsDelete, SupportsGet, SupportsPatch, SupportsPost, SupportsPut,
    VerbDispatch,
};
pub use verb::Verb;
