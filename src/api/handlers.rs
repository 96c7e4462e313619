//! Shared state and plain handlers.

use std::sync::Arc;

use axum::Json;

use crate::cache::{CacheClient, MemoryCacheClient};
use crate::config::SessionSection;
use crate::session::SessionFactory;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionFactory,
}

impl AppState {
    /// State backed by an in-memory cache and the default session cookie.
    pub fn new() -> Self {
        Self {
            sessions: SessionFactory::with_default_cookie(Arc::new(MemoryCacheClient::new())),
        }
    }

    pub fn with_cache(
        cache: Arc<dyn CacheClient>,
        cookie_name: impl Into<String>,
    ) -> crate::Result<Self> {
        Ok(Self {
            sessions: SessionFactory::new(cache, cookie_name)?,
        })
    }

    pub fn from_config(cache: Arc<dyn CacheClient>, config: &SessionSection) -> crate::Result<Self> {
        Ok(Self {
            sessions: SessionFactory::from_config(cache, config)?,
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "restkit",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
