//! # cart-api
//!
//! HTTP API layer for starline-cart-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the session-scoped cart and checkout flow
//! - Product listing proxied from the commerce platform
//! - Static marketing content (testimonials, FAQs, about)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/sessions` | Mint a cart session id |
//! | DELETE | `/api/v1/sessions` | End a session, dropping its cart |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/products/{handle}` | Get product |
//! | GET | `/api/v1/cart` | Cart snapshot |
//! | POST | `/api/v1/cart/items` | Add to cart |
//! | PUT | `/api/v1/cart/items` | Update quantity |
//! | DELETE | `/api/v1/cart/items` | Remove line |
//! | DELETE | `/api/v1/cart` | Clear cart |
//! | POST | `/api/v1/checkout` | Create checkout session |
//! | POST | `/api/v1/contact` | Contact form |

pub mod content;
pub mod handlers;
pub mod routes;
pub mod sessions;
pub mod state;

pub use routes::create_router;
pub use sessions::SessionRegistry;
pub use state::{AppConfig, AppState};
