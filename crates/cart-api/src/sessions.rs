//! # Session Registry
//!
//! Maps browsing-session ids to cart stores. Each session owns its cart
//! exclusively; carts are created lazily on first use and live for the
//! lifetime of the process (no durable persistence — by design the cart
//! does not survive a restart).

use cart_core::{BoxedCommerceGateway, CartStore};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Registry of per-session cart stores
pub struct SessionRegistry {
    gateway: BoxedCommerceGateway,
    carts: RwLock<HashMap<String, Arc<CartStore>>>,
}

impl SessionRegistry {
    /// Create an empty registry; carts it mints share the given gateway
    pub fn new(gateway: BoxedCommerceGateway) -> Self {
        Self {
            gateway,
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a fresh session id
    pub fn mint_session_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Get the cart for a session, creating an empty one on first use
    pub fn cart(&self, session_id: &str) -> Arc<CartStore> {
        if let Some(cart) = self
            .carts
            .read()
            .expect("session registry lock poisoned")
            .get(session_id)
        {
            return cart.clone();
        }

        let mut carts = self.carts.write().expect("session registry lock poisoned");
        carts
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(CartStore::new(self.gateway.clone())))
            .clone()
    }

    /// Check whether a session already has a cart
    pub fn has_session(&self, session_id: &str) -> bool {
        self.carts
            .read()
            .expect("session registry lock poisoned")
            .contains_key(session_id)
    }

    /// Drop a session's cart
    pub fn remove(&self, session_id: &str) {
        self.carts
            .write()
            .expect("session registry lock poisoned")
            .remove(session_id);
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.carts
            .read()
            .expect("session registry lock poisoned")
            .len()
    }

    /// Check if no sessions exist
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cart_core::{
        CartResult, CheckoutSession, CommerceGateway, LineItem, Product,
    };

    struct NullGateway;

    #[async_trait]
    impl CommerceGateway for NullGateway {
        async fn fetch_products(&self) -> CartResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn create_checkout(&self, _items: &[LineItem]) -> CartResult<CheckoutSession> {
            Ok(CheckoutSession::new("c1", "https://example.com/c1", "null"))
        }

        fn provider_name(&self) -> &'static str {
            "null"
        }
    }

    #[test]
    fn test_cart_created_lazily_and_reused() {
        let registry = SessionRegistry::new(Arc::new(NullGateway));
        assert!(registry.is_empty());

        let a = registry.cart("sess-a");
        let a_again = registry.cart("sess-a");
        assert!(Arc::ptr_eq(&a, &a_again));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sessions_do_not_share_carts() {
        let registry = SessionRegistry::new(Arc::new(NullGateway));

        let a = registry.cart("sess-a");
        let b = registry.cart("sess-b");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_session() {
        let registry = SessionRegistry::new(Arc::new(NullGateway));
        registry.cart("sess-a");
        assert!(registry.has_session("sess-a"));

        registry.remove("sess-a");
        assert!(!registry.has_session("sess-a"));
    }

    #[test]
    fn test_mint_session_ids_unique() {
        let registry = SessionRegistry::new(Arc::new(NullGateway));
        assert_ne!(registry.mint_session_id(), registry.mint_session_id());
    }
}
