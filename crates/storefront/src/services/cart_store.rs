//! Cart persistence behind a `load`/`save` contract.
//!
//! The cart lives as a single JSON blob under one session key. `load`
//! never fails: an absent or malformed blob yields an empty cart. `save`
//! overwrites the whole slot; last writer wins, with no merge across
//! concurrent writers.
//!
//! The contract is a trait so the request handlers use the session-backed
//! store while tests substitute [`MemoryCartStore`], which can also seed
//! the slot with a raw (possibly malformed) blob.

use std::sync::{Mutex, PoisonError};

use tower_sessions::Session;

use tamarind_table_core::{Cart, LineItem};

use crate::models::session::keys;

/// Errors writing the cart slot.
#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    /// The session backend rejected the write.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The cart could not be serialized.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save contract for the cart's persistence slot.
#[allow(async_fn_in_trait)] // callers are generic, never boxed
pub trait CartStore {
    /// Load the cart, treating absent or malformed state as empty.
    async fn load(&self) -> Cart;

    /// Overwrite the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError>;
}

/// Cart store backed by the visitor's session.
pub struct SessionCartStore<'a> {
    session: &'a Session,
}

impl<'a> SessionCartStore<'a> {
    /// Wrap a request's session as a cart store.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore<'_> {
    async fn load(&self) -> Cart {
        match self.session.get::<String>(keys::CART).await {
            Ok(Some(blob)) => Cart::from_json(&blob),
            Ok(None) => Cart::default(),
            Err(e) => {
                tracing::debug!("unreadable cart slot, starting empty: {e}");
                Cart::default()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let blob = cart.to_json()?;
        self.session.insert(keys::CART, blob).await?;
        Ok(())
    }
}

/// In-memory cart store holding the raw blob.
///
/// Substituted for the session store in tests; `set_raw` seeds the slot
/// directly so malformed-blob handling can be exercised.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    blob: Mutex<Option<String>>,
}

impl MemoryCartStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with a raw blob, bypassing serialization.
    pub fn set_raw(&self, blob: impl Into<String>) {
        let mut slot = self.blob.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(blob.into());
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Cart {
        let slot = self.blob.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_deref().map(Cart::from_json).unwrap_or_default()
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let blob = cart.to_json()?;
        let mut slot = self.blob.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(blob);
        Ok(())
    }
}

/// Add one unit of an item with a full load-mutate-save cycle.
///
/// Each call re-reads the slot; there is no long-lived in-memory cart.
///
/// # Errors
///
/// Returns an error if the save fails.
pub async fn add_to_cart<S: CartStore>(store: &S, item: LineItem) -> Result<Cart, CartStoreError> {
    let cart = store.load().await.add(item);
    store.save(&cart).await?;
    Ok(cart)
}

/// Remove every line with the given name with a full load-mutate-save cycle.
///
/// # Errors
///
/// Returns an error if the save fails.
pub async fn remove_from_cart<S: CartStore>(
    store: &S,
    name: &str,
) -> Result<Cart, CartStoreError> {
    let cart = store.load().await.remove(name);
    store.save(&cart).await?;
    Ok(cart)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tamarind_table_core::Price;

    use super::*;

    fn burger() -> LineItem {
        LineItem::new(
            "Burger",
            Price::from_cents(850),
            "/static/images/menu/burger.jpg",
            "Flame-grilled beef",
        )
    }

    #[tokio::test]
    async fn test_load_without_prior_save_is_empty() {
        let store = MemoryCartStore::new();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryCartStore::new();
        let cart = Cart::default().add(burger());
        store.save(&cart).await.unwrap();
        assert_eq!(store.load().await, cart);
    }

    #[tokio::test]
    async fn test_malformed_blob_loads_as_empty() {
        let store = MemoryCartStore::new();
        store.set_raw("{{{ definitely not json");
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_merges_by_name() {
        let store = MemoryCartStore::new();
        add_to_cart(&store, burger()).await.unwrap();
        let cart = add_to_cart(&store, burger()).await.unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        // The returned cart is what was persisted
        assert_eq!(store.load().await, cart);
    }

    #[tokio::test]
    async fn test_remove_from_cart_drops_the_line() {
        let store = MemoryCartStore::new();
        add_to_cart(&store, burger()).await.unwrap();
        add_to_cart(&store, burger()).await.unwrap();

        let cart = remove_from_cart(&store, "Burger").await.unwrap();
        assert!(cart.is_empty());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_recovers_from_malformed_blob() {
        let store = MemoryCartStore::new();
        store.set_raw("[not json");

        let cart = add_to_cart(&store, burger()).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
    }
}
