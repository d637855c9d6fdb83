//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/v1/sessions - Mint a cart session id
/// - DELETE /api/v1/sessions - End the session named in the header
/// - GET  /api/v1/products - List products
/// - GET  /api/v1/products/{handle} - Get product by handle
/// - GET  /api/v1/cart - Cart snapshot
/// - POST /api/v1/cart/items - Add to cart
/// - PUT  /api/v1/cart/items - Update line quantity
/// - DELETE /api/v1/cart/items - Remove a line
/// - DELETE /api/v1/cart - Clear the cart
/// - POST /api/v1/checkout - Create a checkout session
/// - GET  /api/v1/content/* - Testimonials, FAQs, about copy
/// - POST /api/v1/contact - Contact form (accepted + logged)
pub fn create_router(state: AppState) -> Router {
    // The storefront is a public browser client; allow any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cart_routes = Router::new()
        .route("/", get(handlers::get_cart).delete(handlers::clear_cart))
        .route(
            "/items",
            post(handlers::add_item)
                .put(handlers::update_quantity)
                .delete(handlers::remove_item),
        );

    let content_routes = Router::new()
        .route("/testimonials", get(handlers::list_testimonials))
        .route("/faqs", get(handlers::list_faqs))
        .route("/about", get(handlers::about));

    let api_routes = Router::new()
        .route(
            "/sessions",
            post(handlers::create_session).delete(handlers::end_session),
        )
        .route("/products", get(handlers::list_products))
        .route("/products/{handle}", get(handlers::get_product))
        .route("/checkout", post(handlers::create_checkout))
        .route("/contact", post(handlers::contact))
        .nest("/cart", cart_routes)
        .nest("/content", content_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
