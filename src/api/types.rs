//! API request and response types.

use serde::{Deserialize, Serialize};

/// Generic API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "UNSUPPORTED_VERB").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn from_error(error: &crate::Error) -> Self {
        Self::new(error.code(), error.to_string())
    }

    pub fn method_not_allowed(method: &str) -> Self {
        Self::new(
            "METHOD_NOT_ALLOWED",
            format!("method {} is not a dispatchable verb", method),
        )
    }
}

/// One line of the demo shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub sku: String,
    pub quantity: u32,
}

/// Body accepted by the cart endpoint. All fields are optional; each verb
/// checks for the ones it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartBody {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Cart contents as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total_quantity: u32,
}

impl CartResponse {
    pub fn new(items: Vec<CartItem>) -> Self {
        let total_quantity = items
            .iter()
            .map(|item| item.quantity)
            .fold(0u32, u32::saturating_add);
        Self {
            items,
            total_quantity,
        }
    }
}
