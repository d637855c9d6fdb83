//! # Storefront Client
//!
//! Shopify Storefront API gateway. Two calls cross this boundary: the
//! product listing query and the cart-create mutation that yields the hosted
//! checkout URL. Everything else (payment, tax, inventory) stays on
//! Shopify's side.

use crate::config::StorefrontConfig;
use async_trait::async_trait;
use cart_core::{
    CartError, CartResult, CheckoutSession, CommerceGateway, Currency, LineItem, Price,
    Product, ProductImage, SelectedOption, Variant,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, instrument};

const PRODUCTS_QUERY: &str = r#"
query Products($first: Int!) {
  products(first: $first) {
    edges {
      node {
        id
        handle
        title
        description
        images(first: 5) {
          edges { node { url altText } }
        }
        variants(first: 20) {
          edges {
            node {
              id
              title
              availableForSale
              price { amount currencyCode }
              selectedOptions { name value }
            }
          }
        }
      }
    }
  }
}
"#;

const CART_CREATE_MUTATION: &str = r#"
mutation CartCreate($lines: [CartLineInput!]!) {
  cartCreate(input: { lines: $lines }) {
    cart {
      id
      checkoutUrl
    }
    userErrors {
      field
      message
    }
  }
}
"#;

/// Shopify Storefront API client
///
/// Uses the public Storefront token; this client never sees payment
/// credentials. One attempt per call, no retry.
pub struct StorefrontClient {
    config: StorefrontConfig,
    client: Client,
    /// How many products the listing query requests
    page_size: u32,
}

impl StorefrontClient {
    /// Create a new Storefront client
    pub fn new(config: StorefrontConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            page_size: 50,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> CartResult<Self> {
        let config = StorefrontConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Builder: set listing page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// POST a GraphQL document and unwrap the response envelope
    async fn execute<T: for<'de> Deserialize<'de>>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> CartResult<T> {
        let response = self
            .client
            .post(self.config.graphql_endpoint())
            .header("X-Shopify-Storefront-Access-Token", &self.config.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| CartError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CartError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Storefront API error: status={}, body={}", status, body);
            return Err(CartError::ProviderError {
                provider: "shopify".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let envelope: GraphQlResponse<T> = serde_json::from_str(&body).map_err(|e| {
            CartError::Serialization(format!("Failed to parse Storefront response: {}", e))
        })?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> =
                envelope.errors.into_iter().map(|e| e.message).collect();
            error!("Storefront GraphQL errors: {}", messages.join("; "));
            return Err(CartError::ProviderError {
                provider: "shopify".to_string(),
                message: messages.join("; "),
            });
        }

        envelope.data.ok_or_else(|| {
            CartError::Serialization("Storefront response had no data".to_string())
        })
    }
}

#[async_trait]
impl CommerceGateway for StorefrontClient {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> CartResult<Vec<Product>> {
        let data: ProductsData = self
            .execute(PRODUCTS_QUERY, json!({ "first": self.page_size }))
            .await?;

        let products: Vec<Product> = data
            .products
            .edges
            .into_iter()
            .map(|edge| edge.node.into_product())
            .collect::<CartResult<_>>()?;

        debug!("Fetched {} products from Storefront API", products.len());
        Ok(products)
    }

    #[instrument(skip(self, items), fields(lines = items.len()))]
    async fn create_checkout(&self, items: &[LineItem]) -> CartResult<CheckoutSession> {
        if items.is_empty() {
            return Err(CartError::EmptyCart);
        }

        // Only variant id + quantity cross the boundary; Shopify owns pricing
        let lines: Vec<serde_json::Value> = items
            .iter()
            .map(|item| {
                json!({
                    "merchandiseId": item.variant_id,
                    "quantity": item.quantity,
                })
            })
            .collect();

        let data: CartCreateData = self
            .execute(CART_CREATE_MUTATION, json!({ "lines": lines }))
            .await?;

        let payload = data.cart_create.ok_or_else(|| {
            CartError::Serialization("cartCreate missing from response".to_string())
        })?;

        if !payload.user_errors.is_empty() {
            let messages: Vec<String> = payload
                .user_errors
                .into_iter()
                .map(|e| e.message)
                .collect();
            return Err(CartError::CheckoutCreationFailed(messages.join("; ")));
        }

        let cart = payload.cart.ok_or_else(|| {
            CartError::CheckoutCreationFailed(
                "cartCreate returned neither a cart nor errors".to_string(),
            )
        })?;

        info!(
            "Created Shopify checkout: id={}, url={}",
            cart.id, cart.checkout_url
        );

        Ok(CheckoutSession::new(cart.id, cart.checkout_url, "shopify"))
    }

    fn provider_name(&self) -> &'static str {
        "shopify"
    }
}

// =============================================================================
// Storefront API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    handle: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    images: Connection<ImageNode>,
    #[serde(default)]
    variants: Connection<VariantNode>,
}

impl ProductNode {
    fn into_product(self) -> CartResult<Product> {
        let images = self
            .images
            .edges
            .into_iter()
            .map(|edge| ProductImage {
                url: edge.node.url,
                alt_text: edge.node.alt_text,
            })
            .collect();

        let variants = self
            .variants
            .edges
            .into_iter()
            .map(|edge| edge.node.into_variant())
            .collect::<CartResult<_>>()?;

        Ok(Product {
            id: self.id,
            handle: self.handle,
            title: self.title,
            description: self.description,
            images,
            variants,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageNode {
    url: String,
    #[serde(default)]
    alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantNode {
    id: String,
    title: String,
    price: MoneyNode,
    #[serde(default = "default_true")]
    available_for_sale: bool,
    #[serde(default)]
    selected_options: Vec<OptionNode>,
}

fn default_true() -> bool {
    true
}

impl VariantNode {
    fn into_variant(self) -> CartResult<Variant> {
        Ok(Variant {
            id: self.id,
            title: self.title,
            price: self.price.into_price()?,
            available_for_sale: self.available_for_sale,
            selected_options: self
                .selected_options
                .into_iter()
                .map(|o| SelectedOption {
                    name: o.name,
                    value: o.value,
                })
                .collect(),
        })
    }
}

/// Storefront money values arrive as a decimal string plus currency code
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyNode {
    amount: String,
    currency_code: String,
}

impl MoneyNode {
    fn into_price(self) -> CartResult<Price> {
        let currency: Currency = self.currency_code.parse()?;
        let amount: f64 = self.amount.parse().map_err(|_| {
            CartError::Serialization(format!("Invalid money amount: {}", self.amount))
        })?;
        Ok(Price::new(amount, currency))
    }
}

#[derive(Debug, Deserialize)]
struct OptionNode {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct CartCreateData {
    #[serde(rename = "cartCreate")]
    cart_create: Option<CartCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreatePayload {
    cart: Option<CartNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartNode {
    id: String,
    checkout_url: String,
}

#[derive(Debug, Deserialize)]
struct UserError {
    message: String,
}
