//! # Request Handlers
//!
//! Axum request handlers for the storefront API. Cart routes act on the
//! cart owned by the session named in the `x-cart-session` header.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use cart_core::{CartError, CartSnapshot, LineItem};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Header naming the browsing session a cart belongs to
pub const SESSION_HEADER: &str = "x-cart-session";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add-to-cart request. The variant is resolved server-side: the named one
/// if given, otherwise the product's default purchasable variant.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Product handle (e.g., "starlight-headliner")
    pub product: String,
    /// Specific variant id (optional)
    #[serde(default)]
    pub variant_id: Option<String>,
    /// Quantity to add
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Quantity update request. Variant ids contain slashes
/// (`gid://shopify/ProductVariant/...`) so they travel in the body,
/// not the path.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub variant_id: String,
    /// New quantity; zero or less removes the line
    pub quantity: i64,
}

/// Line removal request
#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub variant_id: String,
}

/// Contact form submission
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Session creation response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
}

/// Checkout creation response
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub checkout_url: String,
    pub provider: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            retryable: false,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn cart_error_to_response(err: CartError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse {
        error: err.to_string(),
        code,
        retryable: err.is_retryable(),
    };
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Read the session id from the request headers
fn session_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    format!("Missing {} header", SESSION_HEADER),
                    400,
                )),
            )
        })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "starline-cart",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Mint a new browsing-session id. The cart itself is created lazily on
/// the first cart operation for that session.
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions.mint_session_id();
    info!(%session_id, "minted cart session");
    (
        StatusCode::CREATED,
        Json(SessionResponse { session_id }),
    )
}

/// End a browsing session, dropping its cart. Sessions are held in memory,
/// so clients that are done should release theirs; idempotent for unknown
/// session ids.
pub async fn end_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let session = session_id(&headers)?;
    state.sessions.remove(&session);
    info!(%session, "ended cart session");
    Ok(StatusCode::NO_CONTENT)
}

/// List products from the commerce platform
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .gateway
        .fetch_products()
        .await
        .map_err(cart_error_to_response)?;

    let count = products.len();
    Ok(Json(serde_json::json!({
        "products": products,
        "count": count
    })))
}

/// Get a single product by handle
#[instrument(skip(state), fields(handle = %handle))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .gateway
        .fetch_products()
        .await
        .map_err(cart_error_to_response)?;

    let product = products
        .into_iter()
        .find(|p| p.handle == handle)
        .ok_or_else(|| cart_error_to_response(CartError::ProductNotFound { handle }))?;

    Ok(Json(product))
}

/// Current cart snapshot for the session
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartSnapshot>, ApiError> {
    let session = session_id(&headers)?;
    Ok(Json(state.sessions.cart(&session).snapshot()))
}

/// Add a product to the cart.
///
/// Resolves the variant server-side and enforces the add-to-cart guard:
/// a product with no purchasable variant is rejected with 422 and the cart
/// is not touched.
#[instrument(skip(state, headers, request), fields(product = %request.product))]
pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartSnapshot>), ApiError> {
    let session = session_id(&headers)?;

    if request.quantity == 0 {
        return Err(cart_error_to_response(CartError::InvalidRequest(
            "Quantity must be at least 1".to_string(),
        )));
    }

    let products = state
        .gateway
        .fetch_products()
        .await
        .map_err(cart_error_to_response)?;

    let product = products
        .iter()
        .find(|p| p.handle == request.product)
        .ok_or_else(|| {
            cart_error_to_response(CartError::ProductNotFound {
                handle: request.product.clone(),
            })
        })?;

    let variant = match request.variant_id.as_deref() {
        Some(id) => product.variant(id),
        None => product.default_variant(),
    }
    .ok_or_else(|| {
        cart_error_to_response(CartError::VariantUnavailable {
            product: product.title.clone(),
        })
    })?;

    let cart = state.sessions.cart(&session);
    cart.add_item(LineItem::from_variant(product, variant, request.quantity))
        .map_err(cart_error_to_response)?;

    info!(variant_id = %variant.id, quantity = request.quantity, "added to cart");
    Ok((StatusCode::CREATED, Json(cart.snapshot())))
}

/// Set a line's quantity; zero or less removes the line
pub async fn update_quantity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartSnapshot>, ApiError> {
    let session = session_id(&headers)?;
    let cart = state.sessions.cart(&session);
    cart.update_quantity(&request.variant_id, request.quantity);
    Ok(Json(cart.snapshot()))
}

/// Remove a line from the cart
pub async fn remove_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveItemRequest>,
) -> Result<Json<CartSnapshot>, ApiError> {
    let session = session_id(&headers)?;
    let cart = state.sessions.cart(&session);
    cart.remove_item(&request.variant_id);
    Ok(Json(cart.snapshot()))
}

/// Empty the cart
pub async fn clear_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartSnapshot>, ApiError> {
    let session = session_id(&headers)?;
    let cart = state.sessions.cart(&session);
    cart.clear();
    Ok(Json(cart.snapshot()))
}

/// Create a checkout session for the cart and return the hosted URL
#[instrument(skip(state, headers))]
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let session = session_id(&headers)?;
    let cart = state.sessions.cart(&session);

    let checkout = cart.create_checkout().await.map_err(|e| {
        error!("Failed to create checkout: {}", e);
        cart_error_to_response(e)
    })?;

    Ok(Json(CheckoutResponse {
        session_id: checkout.id,
        checkout_url: checkout.checkout_url,
        provider: checkout.provider,
    }))
}

/// Customer testimonials
pub async fn list_testimonials(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "testimonials": state.content.testimonials,
        "count": state.content.testimonials.len()
    }))
}

/// Frequently asked questions
pub async fn list_faqs(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "faqs": state.content.faqs,
        "count": state.content.faqs.len()
    }))
}

/// About copy
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "about": state.content.about }))
}

/// Contact form submission. Accepted and logged only — there is no mail
/// delivery behind this endpoint.
pub async fn contact(
    Json(request): Json<ContactRequest>,
) -> Result<StatusCode, ApiError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.message.trim().is_empty()
    {
        return Err(cart_error_to_response(CartError::InvalidRequest(
            "name, email, and message are required".to_string(),
        )));
    }

    if !request.email.contains('@') {
        return Err(cart_error_to_response(CartError::InvalidRequest(
            "email address is not valid".to_string(),
        )));
    }

    info!(
        name = %request.name,
        email = %request.email,
        "contact form submission received"
    );

    Ok(StatusCode::ACCEPTED)
}
