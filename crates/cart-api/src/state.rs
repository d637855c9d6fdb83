//! # Application State
//!
//! Shared state for the Axum application: the commerce gateway, the
//! per-session cart registry, and static site content.

use crate::content::SiteContent;
use crate::sessions::SessionRegistry;
use cart_core::BoxedCommerceGateway;
use cart_shopify::StorefrontClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Commerce platform gateway
    pub gateway: BoxedCommerceGateway,
    /// Per-session cart stores
    pub sessions: Arc<SessionRegistry>,
    /// Static marketing content
    pub content: Arc<SiteContent>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state backed by the Shopify Storefront API
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let gateway: BoxedCommerceGateway = Arc::new(
            StorefrontClient::from_env()
                .map_err(|e| anyhow::anyhow!("Failed to initialize Storefront client: {}", e))?,
        );

        let content = load_site_content()?;

        Ok(Self::with_gateway(gateway, content, config))
    }

    /// Create state with an injected gateway (tests, alternative providers)
    pub fn with_gateway(
        gateway: BoxedCommerceGateway,
        content: SiteContent,
        config: AppConfig,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(gateway.clone())),
            gateway,
            content: Arc::new(content),
            config,
        }
    }
}

/// Load site content from config file
fn load_site_content() -> anyhow::Result<SiteContent> {
    let config_paths = [
        "config/content.toml",
        "../config/content.toml",
        "../../config/content.toml",
    ];

    for path in config_paths {
        if let Ok(raw) = std::fs::read_to_string(path) {
            let content = SiteContent::from_toml(&raw)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded site content from {}: {} testimonials, {} FAQs",
                path,
                content.testimonials.len(),
                content.faqs.len()
            );
            return Ok(content);
        }
    }

    tracing::warn!("No content file found, serving empty site content");
    Ok(SiteContent::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
