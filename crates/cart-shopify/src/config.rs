//! # Storefront Configuration
//!
//! Configuration for the Shopify Storefront API.
//! The access token is loaded from environment variables.

use cart_core::CartError;
use std::env;

/// Shopify Storefront API configuration
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop domain (e.g., "starline-motorworks.myshopify.com")
    pub shop_domain: String,

    /// Public Storefront API access token
    pub access_token: String,

    /// Storefront API version
    pub api_version: String,

    /// API base URL (for testing/mocking); defaults to https://{shop_domain}
    pub api_base_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `SHOPIFY_STORE_DOMAIN`
    /// - `SHOPIFY_STOREFRONT_TOKEN`
    pub fn from_env() -> Result<Self, CartError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let shop_domain = env::var("SHOPIFY_STORE_DOMAIN").map_err(|_| {
            CartError::Configuration("SHOPIFY_STORE_DOMAIN not set".to_string())
        })?;

        let access_token = env::var("SHOPIFY_STOREFRONT_TOKEN").map_err(|_| {
            CartError::Configuration("SHOPIFY_STOREFRONT_TOKEN not set".to_string())
        })?;

        if !shop_domain.contains('.') {
            return Err(CartError::Configuration(
                "SHOPIFY_STORE_DOMAIN must be a full domain, e.g. shop.myshopify.com"
                    .to_string(),
            ));
        }

        if access_token.trim().is_empty() {
            return Err(CartError::Configuration(
                "SHOPIFY_STOREFRONT_TOKEN must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_base_url: format!("https://{}", shop_domain),
            shop_domain,
            access_token,
            api_version: default_api_version(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(shop_domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        let shop_domain: String = shop_domain.into();
        Self {
            api_base_url: format!("https://{}", shop_domain),
            shop_domain,
            access_token: access_token.into(),
            api_version: default_api_version(),
        }
    }

    /// The GraphQL endpoint URL
    pub fn graphql_endpoint(&self) -> String {
        format!("{}/api/{}/graphql.json", self.api_base_url, self.api_version)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
}

fn default_api_version() -> String {
    "2024-10".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_endpoint() {
        let config = StorefrontConfig::new("starline.myshopify.com", "tok_abc");
        assert_eq!(
            config.graphql_endpoint(),
            "https://starline.myshopify.com/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn test_base_url_override() {
        let config = StorefrontConfig::new("starline.myshopify.com", "tok_abc")
            .with_api_base_url("http://127.0.0.1:9999");
        assert_eq!(
            config.graphql_endpoint(),
            "http://127.0.0.1:9999/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn test_from_env_missing_domain() {
        env::remove_var("SHOPIFY_STORE_DOMAIN");

        let result = StorefrontConfig::from_env();
        assert!(result.is_err());
    }
}
