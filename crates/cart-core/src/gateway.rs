//! # Commerce Gateway Trait
//!
//! Boundary to the external commerce platform. The storefront treats the
//! platform as a black box: it lists products and exchanges line items for a
//! hosted checkout URL; payment, tax, and inventory all happen on the other
//! side of this trait.

use crate::cart::{CheckoutSession, LineItem};
use crate::error::CartResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait implemented by commerce platform clients (Shopify, mock, ...).
///
/// Implementations make a single attempt per call; retry policy belongs to
/// the user re-triggering the action, not to the gateway.
#[async_trait]
pub trait CommerceGateway: Send + Sync {
    /// Fetch the product catalog.
    ///
    /// Returns products with their purchasable variants, pricing, and
    /// images. The shape is consumed, not defined, by this storefront.
    async fn fetch_products(&self) -> CartResult<Vec<crate::product::Product>>;

    /// Create a checkout session for the given line items.
    ///
    /// Only variant id and quantity cross the boundary; the platform owns
    /// pricing at checkout time. Returns the hosted redirect URL on success.
    async fn create_checkout(&self, items: &[LineItem]) -> CartResult<CheckoutSession>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedCommerceGateway = Arc<dyn CommerceGateway>;
