//! # Starline Cart
//!
//! Storefront cart and checkout API for Starline Motorworks.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export SHOPIFY_STORE_DOMAIN=starline-motorworks.myshopify.com
//! export SHOPIFY_STOREFRONT_TOKEN=...
//!
//! # Run the server
//! starline-cart
//! ```

use cart_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Commerce provider: {}", state.gateway.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Starline Cart listening on http://{}", addr);

    if !is_prod {
        info!("Products: GET http://{}/api/v1/products", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
