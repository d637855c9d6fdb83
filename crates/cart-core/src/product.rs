//! # Product Types
//!
//! Product, variant, and pricing types for the storefront.
//! Products are fetched from the commerce platform, not defined in-repo.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    GBP,
    USD,
    EUR,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Number of decimal places for this currency
    pub fn decimal_places(&self) -> u8 {
        2
    }

    /// Convert a decimal amount to the smallest currency unit (pence, cents)
    pub fn to_minor_units(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_minor_units(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "£",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::GBP
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = crate::error::CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GBP" => Ok(Currency::GBP),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            other => Err(crate::error::CartError::InvalidRequest(format!(
                "Unsupported currency: {}",
                other
            ))),
        }
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (pence for GBP)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_minor_units(amount),
            currency,
        }
    }

    /// Create a price from the smallest unit (pence, cents)
    pub fn from_minor_units(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_minor_units(self.amount)
    }

    /// Format for display (e.g., "£10.00"). Fixed two decimals; locale-aware
    /// formatting is a presentation concern outside this crate.
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.as_decimal())
    }
}

/// A selected option on a variant (e.g., Colour: Midnight Blue)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A product image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// A purchasable configuration of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Variant identifier (unique per purchasable configuration)
    pub id: String,

    /// Variant title (e.g., "128-star / Warm White")
    pub title: String,

    /// Unit price
    pub price: Price,

    /// Whether the variant can currently be purchased
    #[serde(default = "default_true")]
    pub available_for_sale: bool,

    /// Ordered option values that identify this configuration
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

fn default_true() -> bool {
    true
}

/// A product in the storefront catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Platform product identifier
    pub id: String,

    /// URL-safe handle (e.g., "starlight-headliner")
    pub handle: String,

    /// Display title
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Product images
    #[serde(default)]
    pub images: Vec<ProductImage>,

    /// Purchasable variants
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// The variant the add-to-cart action resolves by default: the first
    /// variant that is available for sale. `None` means the product cannot
    /// be added to a cart and the caller must surface a notice instead.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.iter().find(|v| v.available_for_sale)
    }

    /// Find a variant by its identifier
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Lowest variant price, for listing display
    pub fn min_price(&self) -> Option<&Price> {
        self.variants.iter().map(|v| &v.price).min_by_key(|p| p.amount)
    }

    /// First image, for listing display
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}
