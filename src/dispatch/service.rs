//! Service base trait, verb capabilities and the dispatch pipeline.

use tracing::{debug, error, warn};

use super::{Reply, Verb};
use crate::error::{Error, Result};

/// Capability: the service handles GET for `R`.
pub trait SupportsGet<R> {
    fn on_get(&self, request: &R) -> Result<Reply>;
}

/// Capability: the service handles PUT for `R`.
pub trait SupportsPut<R> {
    fn on_put(&self, request: &R) -> Result<Reply>;
}

/// Capability: the service handles POST for `R`.
pub trait SupportsPost<R> {
    fn on_post(&self, request: &R) -> Result<Reply>;
}

/// Capability: the service handles DELETE for `R`.
pub trait SupportsDelete<R> {
    fn on_delete(&self, request: &R) -> Result<Reply>;
}

/// Capability: the service handles PATCH for `R`.
pub trait SupportsPatch<R> {
    fn on_patch(&self, request: &R) -> Result<Reply>;
}

/// Base trait for a service that handles requests of type `R`.
///
/// A service opts into individual verbs by implementing the matching
/// `Supports*` trait and overriding the matching `as_*` query (usually via
/// [`supports_verbs!`](crate::supports_verbs)). Verbs it does not opt into
/// fail with [`Error::UnsupportedVerb`] when dispatched.
///
/// The lifecycle hooks apply uniformly to every verb:
///
/// - [`before_execute`](Self::before_execute) runs first;
/// - the verb handler produces a raw [`Reply`];
/// - [`after_execute`](Self::after_execute) may transform that reply;
/// - if any of the above fails, [`handle_exception`](Self::handle_exception)
///   may convert the fault into a reply. Returning `None` re-raises the
///   original fault unchanged.
pub trait RestService<R>: Send + Sync {
    /// Name used in logs and in unsupported-verb faults.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn before_execute(&self, _request: &R) -> Result<()> {
        Ok(())
    }

    fn after_execute(&self, reply: Reply) -> Result<Reply> {
        Ok(reply)
    }

    fn handle_exception(&self, _request: &R, _error: &Error) -> Option<Reply> {
        None
    }

    fn as_get(&self) -> Option<&dyn SupportsGet<R>> {
        None
    }

    fn as_put(&self) -> Option<&dyn SupportsPut<R>> {
        None
    }

    fn as_post(&self) -> Option<&dyn SupportsPost<R>> {
        None
    }

    fn as_delete(&self) -> Option<&dyn SupportsDelete<R>> {
        None
    }

    fn as_patch(&self) -> Option<&dyn SupportsPatch<R>> {
        None
    }

    /// Whether the service opted into `verb`.
    fn supports(&self, verb: Verb) -> bool {
        match verb {
            Verb::Get => self.as_get().is_some(),
            Verb::Put => self.as_put().is_some(),
            Verb::Post => self.as_post().is_some(),
            Verb::Delete => self.as_delete().is_some(),
            Verb::Patch => self.as_patch().is_some(),
        }
    }

    /// The verbs this service opted into.
    fn supported_verbs(&self) -> Vec<Verb> {
        Verb::ALL
            .into_iter()
            .filter(|verb| self.supports(*verb))
            .collect()
    }
}

/// Declare which verbs a [`RestService`] implementation supports.
///
/// Expands to the `as_*` overrides for the listed verbs; use it inside the
/// `impl RestService<R> for S` block.
///
/// ```
/// use restkit::dispatch::{Reply, RestService, SupportsGet};
/// use restkit::supports_verbs;
///
/// struct Ping;
///
/// impl SupportsGet<()> for Ping {
///     fn on_get(&self, _: &()) -> restkit::Result<Reply> {
///         Ok(Reply::NoContent)
///     }
/// }
///
/// impl RestService<()> for Ping {
///     supports_verbs!(() => get);
/// }
/// ```
#[macro_export]
macro_rules! supports_verbs {
    (@one $req:ty, get) => {
        fn as_get(&self) -> Option<&dyn $crate::dispatch::SupportsGet<$req>> {
            Some(self)
        }
    };
    (@one $req:ty, put) => {
        fn as_put(&self) -> Option<&dyn $crate::dispatch::SupportsPut<$req>> {
            Some(self)
        }
    };
    (@one $req:ty, post) => {
        fn as_post(&self) -> Option<&dyn $crate::dispatch::SupportsPost<$req>> {
            Some(self)
        }
    };
    (@one $req:ty, delete) => {
        fn as_delete(&self) -> Option<&dyn $crate::dispatch::SupportsDelete<$req>> {
            Some(self)
        }
    };
    (@one $req:ty, patch) => {
        fn as_patch(&self) -> Option<&dyn $crate::dispatch::SupportsPatch<$req>> {
            Some(self)
        }
    };
    ($req:ty => $($verb:ident),+ $(,)?) => {
        $( $crate::supports_verbs!(@one $req, $verb); )+
    };
}

/// Public entry points, one per verb.
///
/// Implemented for every [`RestService`]. Each call runs the full pipeline
/// synchronously and returns either a reply or the fault that
/// `handle_exception` declined to handle, never both.
pub trait VerbDispatch<R> {
    fn dispatch(&self, verb: Verb, request: &R) -> Result<Reply>;

    fn get(&self, request: &R) -> Result<Reply> {
        self.dispatch(Verb::Get, request)
    }

    fn put(&self, request: &R) -> Result<Reply> {
        self.dispatch(Verb::Put, request)
    }

    fn post(&self, request: &R) -> Result<Reply> {
        self.dispatch(Verb::Post, request)
    }

    fn delete(&self, request: &R) -> Result<Reply> {
        self.dispatch(Verb::Delete, request)
    }

    fn patch(&self, request: &R) -> Result<Reply> {
        self.dispatch(Verb::Patch, request)
    }
}

impl<R, S> VerbDispatch<R> for S
where
    S: RestService<R> + ?Sized,
{
    fn dispatch(&self, verb: Verb, request: &R) -> Result<Reply> {
        let service = self.name();
        debug!(service, %verb, "dispatching");

        match execute(self, verb, request) {
            Ok(reply) => Ok(reply),
            Err(fault) => match self.handle_exception(request, &fault) {
                Some(reply) => {
                    debug!(service, %verb, error = %fault, "fault converted to reply");
                    Ok(reply)
                }
                None => {
                    warn!(service, %verb, error = %fault, "fault not handled, re-raising");
                    Err(fault)
                }
            },
        }
    }
}

fn execute<R, S>(service: &S, verb: Verb, request: &R) -> Result<Reply>
where
    S: RestService<R> + ?Sized,
{
    service.before_execute(request)?;
    let reply = invoke(service, verb, request)?;
    service.after_execute(reply)
}

fn invoke<R, S>(service: &S, verb: Verb, request: &R) -> Result<Reply>
where
    S: RestService<R> + ?Sized,
{
    let reply = match verb {
        Verb::Get => service.as_get().map(|h| h.on_get(request)),
        Verb::Put => service.as_put().map(|h| h.on_put(request)),
        Verb::Post => service.as_post().map(|h| h.on_post(request)),
        Verb::Delete => service.as_delete().map(|h| h.on_delete(request)),
        Verb::Patch => service.as_patch().map(|h| h.on_patch(request)),
    };

    reply.unwrap_or_else(|| {
        error!(
            service = service.name(),
            %verb,
            "verb dispatched to a service that does not implement it"
        );
        Err(Error::UnsupportedVerb {
            verb,
            service: service.name(),
        })
    })
}
