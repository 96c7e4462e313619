//! Demonstration service: a per-session shopping cart.
//!
//! Supports GET (list), PUT (add) and DELETE (remove one line or clear).
//! POST and PATCH are deliberately not implemented.

use axum::http::StatusCode;
use tracing::debug;

use super::endpoint::{FromHttp, HttpContext};
use super::types::{CartBody, CartItem, CartResponse};
use crate::dispatch::{HttpResult, Reply, RestService, SupportsDelete, SupportsGet, SupportsPut};
use crate::session::Session;
use crate::{Error, Result};

/// Session key holding the cart lines.
pub const CART_KEY: &str = "cart";

/// Session key counting requests seen by the cart.
pub const VISITS_KEY: &str = "visits";

/// A cart request: the caller's session plus an optional body.
#[derive(Debug)]
pub struct CartRequest {
    pub session: Session,
    pub body: CartBody,
}

impl FromHttp for CartRequest {
    fn from_http(ctx: &mut HttpContext<'_>) -> Result<Self> {
        let body = ctx.json::<CartBody>()?.unwrap_or_default();
        Ok(Self {
            session: ctx.session(),
            body,
        })
    }
}

#[derive(Debug, Default)]
pub struct CartService;

impl CartService {
    fn load(session: &Session) -> Result<Vec<CartItem>> {
        Ok(session.get::<Vec<CartItem>>(CART_KEY)?.unwrap_or_default())
    }
}

impl SupportsGet<CartRequest> for CartService {
    fn on_get(&self, request: &CartRequest) -> Result<Reply> {
        let items = Self::load(&request.session)?;
        Reply::data(&CartResponse::new(items))
    }
}

impl SupportsPut<CartRequest> for CartService {
    fn on_put(&self, request: &CartRequest) -> Result<Reply> {
        let sku = request
            .body
            .sku
            .as_deref()
            .filter(|sku| !sku.trim().is_empty())
            .ok_or_else(|| Error::BadRequest("sku is required".into()))?;
        let quantity = request.body.quantity.unwrap_or(1);
        if quantity == 0 {
            return Err(Error::BadRequest("quantity must be positive".into()));
        }

        let mut items = Self::load(&request.session)?;
        match items.iter().position(|item| item.sku == sku) {
            Some(index) => items[index].quantity = items[index].quantity.saturating_add(quantity),
            None => items.push(CartItem {
                sku: sku.to_string(),
                quantity,
            }),
        }
        request.session.set(CART_KEY, &items)?;

        Reply::data(&CartResponse::new(items))
    }
}

impl SupportsDelete<CartRequest> for CartService {
    fn on_delete(&self, request: &CartRequest) -> Result<Reply> {
        let Some(sku) = request.body.sku.as_deref() else {
            request.session.remove(CART_KEY)?;
            return Ok(Reply::NoContent);
        };

        let mut items = Self::load(&request.session)?;
        let before = items.len();
        items.retain(|item| item.sku != sku);
        if items.len() == before {
            return Err(Error::NotFound(format!("sku {sku} is not in the cart")));
        }
        request.session.set(CART_KEY, &items)?;

        Reply::data(&CartResponse::new(items))
    }
}

impl RestService<CartRequest> for CartService {
    crate::supports_verbs!(CartRequest => get, put, delete);

    fn name(&self) -> &'static str {
        "CartService"
    }

    fn before_execute(&self, request: &CartRequest) -> Result<()> {
        let visits = request
            .session
            .get_value(VISITS_KEY)?
            .and_then(|value| value.as_u64())
            .unwrap_or(0);
        request.session.set_value(VISITS_KEY, visits + 1)?;
        debug!(session = %request.session.id(), visits = visits + 1, "cart request");
        Ok(())
    }

    fn handle_exception(&self, _request: &CartRequest, error: &Error) -> Option<Reply> {
        let status = match error {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => return None,
        };
        Some(HttpResult::error(status, error.code(), error.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheClient;
    use crate::dispatch::{Verb, VerbDispatch};
    use std::sync::Arc;

    fn request(body: CartBody) -> CartRequest {
        let cache = Arc::new(MemoryCacheClient::new());
        CartRequest {
            session: Session::new(cache, "abc123".parse().unwrap()),
            body,
        }
    }

    fn put_body(sku: &str, quantity: u32) -> CartBody {
        CartBody {
            sku: Some(sku.to_string()),
            quantity: Some(quantity),
        }
    }

    #[test]
    fn test_supported_verbs() {
        assert_eq!(
            CartService.supported_verbs(),
            vec![Verb::Get, Verb::Put, Verb::Delete]
        );
    }

    #[test]
    fn test_put_merges_quantities() {
        let mut req = request(put_body("A-1", 2));
        CartService.put(&req).unwrap();
        req.body.quantity = Some(3);
        let reply = CartService.put(&req).unwrap();

        let cart: CartResponse = serde_json::from_value(reply.body().unwrap().clone()).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_quantity, 5);
    }

    #[test]
    fn test_put_total_saturates_across_lines() {
        let mut req = request(put_body("A", u32::MAX));
        CartService.put(&req).unwrap();
        req.body = put_body("B", 1);
        let reply = CartService.put(&req).unwrap();

        let cart: CartResponse = serde_json::from_value(reply.body().unwrap().clone()).unwrap();
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_quantity, u32::MAX);
    }

    #[test]
    fn test_put_without_sku_is_400() {
        let req = request(CartBody::default());
        let reply = CartService.put(&req).unwrap();
        assert_eq!(reply.status(), StatusCode::BAD_REQUEST);
        assert_eq!(reply.body().unwrap()["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_delete_clears_cart() {
        let mut req = request(put_body("A-1", 1));
        CartService.put(&req).unwrap();

        req.body = CartBody::default();
        assert_eq!(CartService.delete(&req).unwrap(), Reply::NoContent);

        let cart = CartService.get(&req).unwrap();
        assert_eq!(cart.body().unwrap()["total_quantity"], 0);
    }

    #[test]
    fn test_delete_unknown_sku_is_404() {
        let req = request(put_body("missing", 1));
        let reply = CartService.delete(&req).unwrap();
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_post_is_unsupported() {
        let req = request(CartBody::default());
        let err = CartService.post(&req).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVerb {
                verb: Verb::Post,
                service: "CartService"
            }
        ));
    }

    #[test]
    fn test_visits_counted_per_dispatch() {
        let req = request(CartBody::default());
        CartService.get(&req).unwrap();
        CartService.get(&req).unwrap();
        let _ = CartService.patch(&req);

        assert_eq!(req.session.get::<u64>(VISITS_KEY).unwrap(), Some(3));
    }
}
