//! # Cart Types
//!
//! Line items and the in-memory cart collection.

use crate::error::{CartError, CartResult};
use crate::product::{Currency, Price, Product, SelectedOption, Variant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product variant plus quantity intended for purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Variant identifier (line identity within a cart)
    pub variant_id: String,

    /// Parent product ID (denormalized for display)
    pub product_id: String,

    /// Parent product title
    pub product_title: String,

    /// Variant title
    pub variant_title: String,

    /// Unit price
    pub unit_price: Price,

    /// Quantity, always >= 1 while the line is present
    pub quantity: u32,

    /// Option values that identify the variant (colour, size, ...)
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl LineItem {
    /// Create a line item from a product and one of its variants
    pub fn from_variant(product: &Product, variant: &Variant, quantity: u32) -> Self {
        Self {
            variant_id: variant.id.clone(),
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            variant_title: variant.title.clone(),
            unit_price: variant.price.clone(),
            quantity,
            selected_options: variant.selected_options.clone(),
            image_url: product.primary_image().map(|img| img.url.clone()),
        }
    }

    /// Total price for this line
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * self.quantity as i64,
            currency: self.unit_price.currency,
        }
    }
}

/// The ordered collection of line items for one browsing session.
///
/// Invariants:
/// - at most one line per variant id (adds merge into the existing line)
/// - every present line has quantity >= 1 (a line reaching zero is removed)
/// - all lines share one currency, pinned by the first add
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a fully-formed line item. If a line with the same variant id is
    /// already present its quantity increases by the incoming quantity
    /// (saturating, so a line never wraps back to zero); otherwise the item
    /// is appended. A line whose currency differs from the cart's is
    /// rejected, leaving the cart unchanged.
    pub fn add(&mut self, item: LineItem) -> CartResult<()> {
        if item.quantity == 0 {
            return Ok(());
        }
        if let Some(first) = self.items.first() {
            if first.unit_price.currency != item.unit_price.currency {
                return Err(CartError::CurrencyMismatch {
                    expected: first.unit_price.currency,
                    got: item.unit_price.currency,
                });
            }
        }
        match self.items.iter_mut().find(|i| i.variant_id == item.variant_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Set the quantity for a variant. A quantity of zero or less removes
    /// the line; values above `u32::MAX` are capped, so a present line
    /// always keeps quantity >= 1. Unknown variant ids are a no-op.
    pub fn set_quantity(&mut self, variant_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(variant_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove the line for a variant; no-op when absent
    pub fn remove(&mut self, variant_id: &str) {
        self.items.retain(|i| i.variant_id != variant_id);
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get the line for a variant, if present
    pub fn get(&self, variant_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.variant_id == variant_id)
    }

    /// All lines in insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Cart total. An empty cart totals zero in the default currency.
    pub fn total(&self) -> Price {
        let currency = self
            .items
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or(Currency::default());
        Price {
            amount: self.items.iter().map(|i| i.total().amount).sum(),
            currency,
        }
    }

    /// Sum of quantities across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A checkout session created on the commerce platform.
/// The storefront only initiates the session and redirects to its URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Platform's session/cart identifier
    pub id: String,

    /// Hosted checkout URL to redirect the visitor to
    pub checkout_url: String,

    /// Provider name (e.g., "shopify")
    pub provider: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Create a new checkout session record
    pub fn new(
        id: impl Into<String>,
        checkout_url: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            checkout_url: checkout_url.into(),
            provider: provider.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(variant_id: &str, pence: i64, quantity: u32) -> LineItem {
        LineItem {
            variant_id: variant_id.to_string(),
            product_id: "gid://shopify/Product/1".to_string(),
            product_title: "Starlight Headliner".to_string(),
            variant_title: "Default".to_string(),
            unit_price: Price::from_minor_units(pence, Currency::GBP),
            quantity,
            selected_options: Vec::new(),
            image_url: None,
        }
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 1)).unwrap();
        cart.add(line("v1", 1000, 2)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("v1").unwrap().quantity, 3);
    }

    #[test]
    fn test_add_appends_distinct_variants() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 1)).unwrap();
        cart.add(line("v2", 2500, 1)).unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 2)).unwrap();

        cart.set_quantity("v1", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 2)).unwrap();

        cart.set_quantity("v1", -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_variant_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 2)).unwrap();

        cart.set_quantity("missing", 5);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("v1").unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_unknown_variant_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 1)).unwrap();

        cart.remove("missing");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total().amount, 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_worked_example_double_add() {
        // start empty -> add(variantA, qty 1, £10.00) twice
        let mut cart = Cart::new();
        cart.add(line("variant-a", 1000, 1)).unwrap();
        cart.add(line("variant-a", 1000, 1)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("variant-a").unwrap().quantity, 2);
        assert_eq!(cart.total().amount, 2000);
        assert_eq!(cart.total().display(), "£20.00");
    }

    #[test]
    fn test_set_quantity_above_u32_max_caps() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 2)).unwrap();

        cart.set_quantity("v1", u32::MAX as i64 + 1);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("v1").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_add_saturates_instead_of_wrapping() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, u32::MAX)).unwrap();
        cart.add(line("v1", 1000, 1)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("v1").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_add_rejects_mismatched_currency() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 1)).unwrap();

        let mut usd = line("v2", 500, 1);
        usd.unit_price = Price::from_minor_units(500, Currency::USD);
        let err = cart.add(usd).unwrap_err();
        assert!(matches!(
            err,
            CartError::CurrencyMismatch {
                expected: Currency::GBP,
                got: Currency::USD
            }
        ));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total().currency, Currency::GBP);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1000, 1)).unwrap();
        cart.add(line("v2", 2000, 3)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total().amount, 0);
    }

    #[test]
    fn test_line_total() {
        let item = line("v1", 1099, 3);
        assert_eq!(item.total().amount, 3297);
    }
}
