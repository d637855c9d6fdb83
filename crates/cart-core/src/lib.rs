//! # cart-core
//!
//! Core types and the cart store for the starline-cart storefront engine.
//!
//! This crate provides:
//! - `Cart`, `LineItem`, and `CheckoutSession` for the shopping flow
//! - `CartStore` — the session-scoped source of truth for intended purchases
//! - `CommerceGateway` trait for commerce platform clients
//! - `Product`, `Variant`, `Price` for the externally-fetched catalog
//! - `CartError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{CartStore, LineItem};
//!
//! // Construct a store with an injected gateway (no global state)
//! let store = CartStore::new(gateway);
//!
//! // The add-to-cart guard resolves a purchasable variant first
//! let variant = product.default_variant().ok_or(CartError::VariantUnavailable {
//!     product: product.title.clone(),
//! })?;
//! store.add_item(LineItem::from_variant(&product, variant, 1))?;
//!
//! // Exchange the line items for a hosted checkout URL
//! let session = store.create_checkout().await?;
//! // Redirect visitor to session.checkout_url
//! ```

pub mod cart;
pub mod error;
pub mod gateway;
pub mod product;
pub mod store;

// Re-exports for convenience
pub use cart::{Cart, CheckoutSession, LineItem};
pub use error::{CartError, CartResult};
pub use gateway::{BoxedCommerceGateway, CommerceGateway};
pub use product::{Currency, Price, Product, ProductImage, SelectedOption, Variant};
pub use store::{CartSnapshot, CartStore};
