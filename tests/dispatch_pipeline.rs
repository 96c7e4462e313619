//! Dispatch pipeline integration tests.
//!
//! Exercise the public entry points the way a router would: one service per
//! request type, every verb through `VerbDispatch`.

use std::sync::Mutex;

use axum::http::StatusCode;
use restkit::dispatch::{
    HttpResult, Reply, RestService, SupportsDelete, SupportsGet, SupportsPatch, SupportsPost,
    SupportsPut, Verb, VerbDispatch,
};
use restkit::{supports_verbs, Error, Result};
use serde_json::json;

#[derive(Debug, Clone)]
struct Order {
    id: u32,
}

// ============================================================================
// Full-verb service recording hook order
// ============================================================================

#[derive(Default)]
struct Journal {
    events: Mutex<Vec<String>>,
}

impl Journal {
    fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl SupportsGet<Order> for Journal {
    fn on_get(&self, request: &Order) -> Result<Reply> {
        self.push("on_get");
        Ok(Reply::Data(json!({ "id": request.id })))
    }
}

impl SupportsPut<Order> for Journal {
    fn on_put(&self, _request: &Order) -> Result<Reply> {
        self.push("on_put");
        Ok(Reply::NoContent)
    }
}

impl SupportsPost<Order> for Journal {
    fn on_post(&self, _request: &Order) -> Result<Reply> {
        self.push("on_post");
        Ok(HttpResult::new(StatusCode::CREATED).into())
    }
}

impl SupportsDelete<Order> for Journal {
    fn on_delete(&self, _request: &Order) -> Result<Reply> {
        self.push("on_delete");
        Ok(Reply::NoContent)
    }
}

impl SupportsPatch<Order> for Journal {
    fn on_patch(&self, _request: &Order) -> Result<Reply> {
        self.push("on_patch");
        Ok(Reply::Data(json!("patched")))
    }
}

impl RestService<Order> for Journal {
    supports_verbs!(Order => get, put, post, delete, patch);

    fn before_execute(&self, _request: &Order) -> Result<()> {
        self.push("before_execute");
        Ok(())
    }

    fn after_execute(&self, reply: Reply) -> Result<Reply> {
        self.push("after_execute");
        Ok(reply)
    }

    fn handle_exception(&self, _request: &Order, _error: &Error) -> Option<Reply> {
        self.push("handle_exception");
        None
    }
}

#[test]
fn test_every_verb_runs_hooks_in_order_exactly_once() {
    let service = Journal::default();
    let order = Order { id: 7 };

    for verb in Verb::ALL {
        service.dispatch(verb, &order).unwrap();
        let handler = format!("on_{}", verb.as_str().to_ascii_lowercase());
        assert_eq!(
            service.take(),
            vec!["before_execute".to_string(), handler, "after_execute".to_string()]
        );
    }
}

#[test]
fn test_named_entry_points_match_dispatch() {
    let service = Journal::default();
    let order = Order { id: 1 };

    assert_eq!(service.get(&order).unwrap(), Reply::Data(json!({ "id": 1 })));
    assert_eq!(service.put(&order).unwrap(), Reply::NoContent);
    assert_eq!(service.post(&order).unwrap().status(), StatusCode::CREATED);
    assert_eq!(service.delete(&order).unwrap(), Reply::NoContent);
    assert_eq!(service.patch(&order).unwrap(), Reply::Data(json!("patched")));
}

// ============================================================================
// GET-only service with configurable recovery
// ============================================================================

struct Lookup {
    recover: bool,
}

impl SupportsGet<Order> for Lookup {
    fn on_get(&self, request: &Order) -> Result<Reply> {
        if request.id == 0 {
            return Err(Error::InvalidOperation("order 0 is reserved".into()));
        }
        Ok(Reply::Data(json!(request.id)))
    }
}

impl RestService<Order> for Lookup {
    supports_verbs!(Order => get);

    fn handle_exception(&self, _request: &Order, error: &Error) -> Option<Reply> {
        if !self.recover || error.is_programmer_error() {
            return None;
        }
        Some(HttpResult::error(StatusCode::CONFLICT, error.code(), error.to_string()).into())
    }
}

#[test]
fn test_put_on_get_only_service_is_programmer_error() {
    let service = Lookup { recover: true };

    for id in [0, 1, 42] {
        let err = service.put(&Order { id }).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVerb {
                verb: Verb::Put,
                ..
            }
        ));
    }
}

#[test]
fn test_unrecovered_fault_is_reraised_unchanged() {
    let service = Lookup { recover: false };

    let err = service.get(&Order { id: 0 }).unwrap_err();
    match err {
        Error::InvalidOperation(message) => assert_eq!(message, "order 0 is reserved"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_recovered_fault_returns_exact_reply() {
    let service = Lookup { recover: true };

    let reply = service.get(&Order { id: 0 }).unwrap();
    let expected: Reply = HttpResult::error(
        StatusCode::CONFLICT,
        "INVALID_OPERATION",
        "invalid operation: order 0 is reserved",
    )
    .into();
    assert_eq!(reply, expected);
}

#[test]
fn test_verbs_are_independent() {
    let service = Lookup { recover: false };

    assert!(service.get(&Order { id: 0 }).is_err());
    assert!(service.patch(&Order { id: 5 }).is_err());
    assert_eq!(service.get(&Order { id: 5 }).unwrap(), Reply::Data(json!(5)));
}

// ============================================================================
// after_execute as a transform point
// ============================================================================

struct Envelope;

impl SupportsGet<Order> for Envelope {
    fn on_get(&self, request: &Order) -> Result<Reply> {
        Ok(Reply::Data(json!(request.id)))
    }
}

impl RestService<Order> for Envelope {
    supports_verbs!(Order => get);

    fn after_execute(&self, reply: Reply) -> Result<Reply> {
        match reply {
            Reply::Data(value) => Ok(Reply::Data(json!({ "data": value }))),
            other => Ok(other),
        }
    }
}

#[test]
fn test_after_execute_transforms_reply() {
    let reply = Envelope.get(&Order { id: 9 }).unwrap();
    assert_eq!(reply, Reply::Data(json!({ "data": 9 })));
}

// ============================================================================
// Faults raised by after_execute
// ============================================================================

/// Rejects every reply in `after_execute`; optionally recovers with the code.
struct Auditor {
    recover: bool,
    events: Mutex<Vec<&'static str>>,
}

impl Auditor {
    fn new(recover: bool) -> Self {
        Self {
            recover,
            events: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, event: &'static str) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl SupportsGet<Order> for Auditor {
    fn on_get(&self, request: &Order) -> Result<Reply> {
        self.push("on_get");
        Ok(Reply::Data(json!(request.id)))
    }
}

impl RestService<Order> for Auditor {
    supports_verbs!(Order => get);

    fn before_execute(&self, _request: &Order) -> Result<()> {
        self.push("before_execute");
        Ok(())
    }

    fn after_execute(&self, _reply: Reply) -> Result<Reply> {
        self.push("after_execute");
        Err(Error::NotFound("order was archived".into()))
    }

    fn handle_exception(&self, _request: &Order, error: &Error) -> Option<Reply> {
        self.push("handle_exception");
        self.recover.then(|| Reply::Data(json!(error.code())))
    }
}

#[test]
fn test_after_execute_fault_can_be_recovered() {
    let service = Auditor::new(true);

    let reply = service.get(&Order { id: 3 }).unwrap();
    assert_eq!(reply, Reply::Data(json!("NOT_FOUND")));
    assert_eq!(
        service.events(),
        vec!["before_execute", "on_get", "after_execute", "handle_exception"]
    );
}

#[test]
fn test_after_execute_fault_is_reraised() {
    let service = Auditor::new(false);

    let err = service.get(&Order { id: 3 }).unwrap_err();
    match err {
        Error::NotFound(message) => assert_eq!(message, "order was archived"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        service.events(),
        vec!["before_execute", "on_get", "after_execute", "handle_exception"]
    );
}

#[test]
fn test_services_share_threads() {
    use std::sync::Arc;
    use std::thread;

    let service = Arc::new(Lookup { recover: false });
    let handles: Vec<_> = (1..=8)
        .map(|id| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.get(&Order { id }).unwrap())
        })
        .collect();

    for (id, handle) in (1..=8).zip(handles) {
        assert_eq!(handle.join().unwrap(), Reply::Data(json!(id)));
    }
}
