//! # Cart Store
//!
//! Single source of truth for one visitor's intended purchases and checkout
//! status. Explicitly constructed and handed to callers (no global state);
//! share it with `Arc<CartStore>`.
//!
//! All mutations are synchronous in-memory edits except `create_checkout`,
//! which makes one call to the commerce gateway. Observers registered with
//! [`CartStore::subscribe`] receive a snapshot after every state change.

use crate::cart::{Cart, CheckoutSession, LineItem};
use crate::error::{CartError, CartResult};
use crate::gateway::BoxedCommerceGateway;
use crate::product::Price;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Read-only view of the store, handed to subscribers and API responses
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    pub total: Price,
    pub item_count: u32,
}

/// Observer callback invoked after each state change
pub type Subscriber = Box<dyn Fn(&CartSnapshot) + Send + Sync>;

#[derive(Debug, Default)]
struct CartState {
    cart: Cart,
    is_loading: bool,
    checkout_url: Option<String>,
}

/// The cart store for one browsing session.
pub struct CartStore {
    state: Mutex<CartState>,
    gateway: BoxedCommerceGateway,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl CartStore {
    /// Create an empty store backed by the given gateway
    pub fn new(gateway: BoxedCommerceGateway) -> Self {
        Self {
            state: Mutex::new(CartState::default()),
            gateway,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().expect("cart state lock poisoned")
    }

    /// Register an observer. Called with a snapshot after every mutation.
    pub fn subscribe(&self, f: impl Fn(&CartSnapshot) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push(Box::new(f));
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
        for subscriber in subscribers.iter() {
            subscriber(&snapshot);
        }
    }

    /// Current state of the cart
    pub fn snapshot(&self) -> CartSnapshot {
        let state = self.lock_state();
        CartSnapshot {
            items: state.cart.items().to_vec(),
            is_loading: state.is_loading,
            checkout_url: state.checkout_url.clone(),
            total: state.cart.total(),
            item_count: state.cart.item_count(),
        }
    }

    /// Add a fully-formed line item (merging by variant id).
    ///
    /// Variant resolution and the no-variant guard happen at the caller.
    /// A line in a different currency than the cart's is rejected and
    /// subscribers are not notified.
    pub fn add_item(&self, item: LineItem) -> CartResult<()> {
        debug!(variant_id = %item.variant_id, quantity = item.quantity, "adding line item");
        self.lock_state().cart.add(item)?;
        self.notify();
        Ok(())
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn update_quantity(&self, variant_id: &str, quantity: i64) {
        debug!(variant_id, quantity, "updating quantity");
        self.lock_state().cart.set_quantity(variant_id, quantity);
        self.notify();
    }

    /// Remove a line; no-op when absent
    pub fn remove_item(&self, variant_id: &str) {
        debug!(variant_id, "removing line item");
        self.lock_state().cart.remove(variant_id);
        self.notify();
    }

    /// Empty the cart (used after a successful checkout hand-off)
    pub fn clear(&self) {
        self.lock_state().cart.clear();
        self.notify();
    }

    /// Exchange the current line items for a hosted checkout URL.
    ///
    /// Single attempt, no retry. The loading flag is set for the duration of
    /// the gateway call and cleared on every exit path. A second call while
    /// one is in flight is rejected with [`CartError::CheckoutInFlight`].
    /// On failure the line items are left untouched.
    pub async fn create_checkout(&self) -> CartResult<CheckoutSession> {
        let items = {
            let mut state = self.lock_state();
            if state.is_loading {
                warn!("checkout requested while another is in flight");
                return Err(CartError::CheckoutInFlight);
            }
            if state.cart.is_empty() {
                return Err(CartError::EmptyCart);
            }
            state.is_loading = true;
            state.cart.items().to_vec()
        };
        self.notify();

        let result = self.gateway.create_checkout(&items).await;

        {
            let mut state = self.lock_state();
            state.is_loading = false;
            if let Ok(ref session) = result {
                state.checkout_url = Some(session.checkout_url.clone());
            }
        }
        self.notify();

        match result {
            Ok(session) => {
                info!(session_id = %session.id, "checkout session created");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "checkout creation failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::CommerceGateway;
    use crate::product::{Currency, Product};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn line(variant_id: &str, pence: i64, quantity: u32) -> LineItem {
        LineItem {
            variant_id: variant_id.to_string(),
            product_id: "gid://shopify/Product/1".to_string(),
            product_title: "Ambient Lighting Kit".to_string(),
            variant_title: "Default".to_string(),
            unit_price: Price::from_minor_units(pence, Currency::GBP),
            quantity,
            selected_options: Vec::new(),
            image_url: None,
        }
    }

    struct StubGateway {
        fail: bool,
        calls: AtomicU32,
    }

    impl StubGateway {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                calls: AtomicU32::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl CommerceGateway for StubGateway {
        async fn fetch_products(&self) -> CartResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn create_checkout(&self, _items: &[LineItem]) -> CartResult<CheckoutSession> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CartError::NetworkError("connection reset".into()))
            } else {
                Ok(CheckoutSession::new(
                    "cart-123",
                    "https://checkout.example.com/c/cart-123",
                    "stub",
                ))
            }
        }

        fn provider_name(&self) -> &'static str {
            "stub"
        }
    }

    struct BlockingGateway {
        gate: Notify,
    }

    #[async_trait]
    impl CommerceGateway for BlockingGateway {
        async fn fetch_products(&self) -> CartResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn create_checkout(&self, _items: &[LineItem]) -> CartResult<CheckoutSession> {
            self.gate.notified().await;
            Ok(CheckoutSession::new(
                "cart-blocked",
                "https://checkout.example.com/c/cart-blocked",
                "stub",
            ))
        }

        fn provider_name(&self) -> &'static str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_successful_checkout_stores_url_and_clears_loading() {
        let store = CartStore::new(StubGateway::ok());
        store.add_item(line("v1", 1000, 1)).unwrap();

        let session = store.create_checkout().await.unwrap();
        assert_eq!(
            session.checkout_url,
            "https://checkout.example.com/c/cart-123"
        );

        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(
            snapshot.checkout_url.as_deref(),
            Some("https://checkout.example.com/c/cart-123")
        );
        // line items are not altered by checkout
        assert_eq!(snapshot.items.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_checkout_leaves_items_and_clears_loading() {
        let store = CartStore::new(StubGateway::failing());
        store.add_item(line("v1", 1000, 2)).unwrap();
        store.add_item(line("v2", 2500, 1)).unwrap();

        let err = store.create_checkout().await.unwrap_err();
        assert!(matches!(err, CartError::NetworkError(_)));

        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        assert!(snapshot.checkout_url.is_none());
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.total.amount, 4500);
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_rejected() {
        let gateway = StubGateway::ok();
        let store = CartStore::new(gateway.clone());

        let err = store.create_checkout().await.unwrap_err();
        assert!(matches!(err, CartError::EmptyCart));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_checkout_rejected_while_in_flight() {
        let gateway = Arc::new(BlockingGateway {
            gate: Notify::new(),
        });
        let store = Arc::new(CartStore::new(gateway.clone()));
        store.add_item(line("v1", 1000, 1)).unwrap();

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.create_checkout().await })
        };

        // let the first call reach the gateway and set the loading flag
        while !store.snapshot().is_loading {
            tokio::task::yield_now().await;
        }

        let err = store.create_checkout().await.unwrap_err();
        assert!(matches!(err, CartError::CheckoutInFlight));

        gateway.gate.notify_one();
        let session = first.await.unwrap().unwrap();
        assert_eq!(session.id, "cart-blocked");
        assert!(!store.snapshot().is_loading);
    }

    #[tokio::test]
    async fn test_subscribers_observe_mutations() {
        let store = CartStore::new(StubGateway::ok());
        let seen = Arc::new(AtomicU32::new(0));

        let counter = seen.clone();
        store.subscribe(move |snapshot| {
            counter.store(snapshot.item_count, Ordering::SeqCst);
        });

        store.add_item(line("v1", 1000, 2)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        store.update_quantity("v1", 5);
        assert_eq!(seen.load(Ordering::SeqCst), 5);

        store.remove_item("v1");
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_merge_and_zero_removal() {
        let store = CartStore::new(StubGateway::ok());
        store.add_item(line("v1", 1000, 1)).unwrap();
        store.add_item(line("v1", 1000, 2)).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 3);

        store.update_quantity("v1", 0);
        assert!(store.snapshot().items.is_empty());
    }
}
