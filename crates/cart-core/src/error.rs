//! # Cart Error Types
//!
//! Typed error handling for the storefront cart engine.
//! All cart and gateway operations return `Result<T, CartError>`.

use crate::product::Currency;
use thiserror::Error;

/// Core error type for cart and commerce operations
#[derive(Debug, Error)]
pub enum CartError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in the storefront catalog
    #[error("Product not found: {handle}")]
    ProductNotFound { handle: String },

    /// Product has no purchasable variant (add-to-cart guard)
    #[error("No purchasable variant available for product: {product}")]
    VariantUnavailable { product: String },

    /// Checkout requested for an empty cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Line currency differs from the cart's currency
    #[error("Currency mismatch: cart is {expected}, item is {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    /// A checkout creation call is already in flight for this cart
    #[error("A checkout is already being created for this cart")]
    CheckoutInFlight,

    /// Commerce platform API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with the commerce platform
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Checkout session creation failed
    #[error("Checkout creation failed: {0}")]
    CheckoutCreationFailed(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CartError {
    /// Returns true if retrying the user action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CartError::NetworkError(_)
                | CartError::ProviderError { .. }
                | CartError::CheckoutCreationFailed(_)
                | CartError::CheckoutInFlight
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::Configuration(_) => 500,
            CartError::InvalidRequest(_) => 400,
            CartError::ProductNotFound { .. } => 404,
            CartError::VariantUnavailable { .. } => 422,
            CartError::EmptyCart => 400,
            CartError::CurrencyMismatch { .. } => 400,
            CartError::CheckoutInFlight => 409,
            CartError::ProviderError { .. } => 502,
            CartError::NetworkError(_) => 503,
            CartError::CheckoutCreationFailed(_) => 502,
            CartError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for cart operations
pub type CartResult<T> = Result<T, CartError>;
