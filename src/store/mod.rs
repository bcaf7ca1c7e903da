//! Persistence seam for baskets.
//!
//! The engine treats persistence as an external collaborator behind
//! the [`BasketStore`] trait: look a basket up by session key, create
//! it (assigning identity before any line item can reference it), and
//! save the whole aggregate in one call. [`MemoryStore`] is the
//! in-process reference implementation, with JSON snapshots so a
//! process restart can pick up where it left off.

use crate::model::Basket;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by basket stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `save` called for a basket that was never created.
    #[error("basket has no persisted identity; create it first")]
    MissingIdentity,

    /// Snapshot serialization or deserialization failed.
    #[error("snapshot failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Storage interface the engine commits through.
///
/// Implementations are expected to make `save` atomic per basket: a
/// reader sees either the previous aggregate or the new one, never a
/// partial write. The engine performs no locking of its own; callers
/// serialize transitions per basket key.
pub trait BasketStore {
    /// Fetch a basket by its session key.
    fn find_by_key(&self, key: &str) -> Result<Option<Basket>, StoreError>;

    /// Persist a new basket, assigning its identity. Must run before
    /// any line items are persisted against it.
    fn create(&mut self, basket: &mut Basket) -> Result<(), StoreError>;

    /// Persist the basket aggregate (state, TTL, line items, log) as
    /// one unit.
    fn save(&mut self, basket: &Basket) -> Result<(), StoreError>;
}

/// In-memory basket store keyed by session key.
///
/// # Example
///
/// ```rust
/// use hamper::{Basket, BasketStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// let mut basket = Basket::new("s1");
/// store.create(&mut basket).unwrap();
/// assert!(basket.id().is_some());
///
/// let snapshot = store.snapshot().unwrap();
/// let restored = MemoryStore::restore(&snapshot).unwrap();
/// assert!(restored.get("s1").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    baskets: HashMap<String, Basket>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored baskets.
    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    /// True when no basket is stored.
    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    /// Read access to a stored basket.
    pub fn get(&self, key: &str) -> Option<&Basket> {
        self.baskets.get(key)
    }

    /// Seed a basket directly, bypassing the engine. Useful for tests
    /// and for migrating externally created baskets.
    pub fn insert(&mut self, basket: Basket) {
        self.baskets.insert(basket.key().to_string(), basket);
    }

    /// Serialize every basket to a JSON snapshot.
    pub fn snapshot(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.baskets)?)
    }

    /// Rebuild a store from a snapshot produced by [`snapshot`].
    ///
    /// [`snapshot`]: MemoryStore::snapshot
    pub fn restore(snapshot: &str) -> Result<Self, StoreError> {
        let baskets: HashMap<String, Basket> = serde_json::from_str(snapshot)?;
        Ok(Self { baskets })
    }
}

impl BasketStore for MemoryStore {
    fn find_by_key(&self, key: &str) -> Result<Option<Basket>, StoreError> {
        Ok(self.baskets.get(key).cloned())
    }

    fn create(&mut self, basket: &mut Basket) -> Result<(), StoreError> {
        basket.assign_id(Uuid::new_v4());
        self.baskets
            .insert(basket.key().to_string(), basket.clone());
        Ok(())
    }

    fn save(&mut self, basket: &Basket) -> Result<(), StoreError> {
        if basket.id().is_none() {
            return Err(StoreError::MissingIdentity);
        }
        self.baskets
            .insert(basket.key().to_string(), basket.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_missing_key_returns_none() {
        let store = MemoryStore::new();
        assert!(store.find_by_key("s1").unwrap().is_none());
    }

    #[test]
    fn create_assigns_identity() {
        let mut store = MemoryStore::new();
        let mut basket = Basket::new("s1");
        assert!(basket.id().is_none());

        store.create(&mut basket).unwrap();

        assert!(basket.id().is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("s1").unwrap().id(), basket.id());
    }

    #[test]
    fn save_requires_identity() {
        let mut store = MemoryStore::new();
        let basket = Basket::new("s1");

        let err = store.save(&basket).unwrap_err();
        assert!(matches!(err, StoreError::MissingIdentity));
        assert!(store.is_empty());
    }

    #[test]
    fn save_overwrites_existing_aggregate() {
        let mut store = MemoryStore::new();
        let mut basket = Basket::new("s1");
        store.create(&mut basket).unwrap();

        basket.user = Some("alice".to_string());
        store.save(&basket).unwrap();

        assert_eq!(
            store.get("s1").unwrap().user.as_deref(),
            Some("alice")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut store = MemoryStore::new();
        let mut basket = Basket::new("s1");
        store.create(&mut basket).unwrap();
        let mut other = Basket::new("s2");
        store.create(&mut other).unwrap();

        let snapshot = store.snapshot().unwrap();
        let restored = MemoryStore::restore(&snapshot).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get("s1"), store.get("s1"));
        assert_eq!(restored.get("s2"), store.get("s2"));
    }

    #[test]
    fn restore_rejects_garbage() {
        let err = MemoryStore::restore("not json").unwrap_err();
        assert!(matches!(err, StoreError::Snapshot(_)));
    }
}
