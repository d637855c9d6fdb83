//! # cart-shopify
//!
//! Shopify Storefront API gateway for starline-cart-rs.
//!
//! Implements `cart_core::CommerceGateway` over the public Storefront
//! GraphQL API:
//!
//! - product listing (`products` query, edges/node connection shape)
//! - checkout initiation (`cartCreate` mutation → hosted `checkoutUrl`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_shopify::StorefrontClient;
//! use cart_core::{CartStore, CommerceGateway};
//! use std::sync::Arc;
//!
//! // Reads SHOPIFY_STORE_DOMAIN / SHOPIFY_STOREFRONT_TOKEN
//! let gateway = Arc::new(StorefrontClient::from_env()?);
//! let store = CartStore::new(gateway);
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::StorefrontClient;
pub use config::StorefrontConfig;
