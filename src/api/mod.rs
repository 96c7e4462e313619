//! axum integration.
//!
//! This module turns [`RestService`](crate::dispatch::RestService)
//! implementations into routes and shapes their replies as HTTP responses.
//! Session cookies are read from the request's `Cookie` header and issued on
//! the response's `Set-Cookie` header.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1/` - API information
//! - `GET|PUT|DELETE /api/v1/cart` - Per-session demo cart
//!
//! ## Example
//!
//! ```no_run
//! use restkit::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> restkit::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 3000);
//!     serve(config).await
//! }
//! ```

pub mod cart;
pub mod endpoint;
pub mod handlers;
mod response;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use cart::{CartRequest, CartService};
pub use endpoint::{handle, rest_endpoint, FromHttp, HttpContext};
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use types::{CartBody, CartItem, CartResponse, ErrorResponse};
