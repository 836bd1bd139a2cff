//! Bounded, deduplicated recently-viewed list.

use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, Storage};
use tracing::{debug, warn};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{decimal, Money};

/// Storage key for the list outside any session namespace.
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewed";

/// Number of entries kept by default.
pub const DEFAULT_CAPACITY: usize = 3;

/// Summary of a viewed product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedEntry {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "decimal")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Product> for RecentlyViewedEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image.clone(),
        }
    }
}

/// Tracks the most recently viewed products.
///
/// The list lives in storage only; every call reads it fresh. Storage
/// problems degrade to an empty list.
pub struct RecentlyViewed<S> {
    cache: Cache<S>,
    key: String,
    capacity: usize,
}

impl<S: Storage> RecentlyViewed<S> {
    /// Track the list stored under `key` with [`DEFAULT_CAPACITY`].
    pub fn new(cache: Cache<S>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Override the number of entries kept.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Move `entry` to the front, dropping any older entry with the same id
    /// and anything past capacity. Returns the resulting list.
    pub fn record_view(&self, entry: RecentlyViewedEntry) -> Vec<RecentlyViewedEntry> {
        let mut entries = self.load();
        entries.retain(|e| e.id != entry.id);
        debug!(product = %entry.id, "recorded product view");
        entries.insert(0, entry);
        entries.truncate(self.capacity);

        if let Err(e) = self.cache.set(&self.key, &entries) {
            warn!(key = %self.key, error = %e, "failed to persist recently viewed");
        }
        entries
    }

    /// The stored list, capped at capacity.
    pub fn list(&self) -> Vec<RecentlyViewedEntry> {
        let mut entries = self.load();
        entries.truncate(self.capacity);
        entries
    }

    /// The stored list without `current_id`, capped at capacity.
    pub fn list_excluding(&self, current_id: &ProductId) -> Vec<RecentlyViewedEntry> {
        self.load()
            .into_iter()
            .filter(|e| &e.id != current_id)
            .take(self.capacity)
            .collect()
    }

    fn load(&self) -> Vec<RecentlyViewedEntry> {
        match self.cache.get::<Vec<RecentlyViewedEntry>>(&self.key) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "recently viewed unavailable");
                Vec::new()
            }
        }
    }
}

impl<S> std::fmt::Debug for RecentlyViewed<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentlyViewed")
            .field("key", &self.key)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storefront_cache::{MemoryStore, UnavailableStore};

    fn entry(id: &str) -> RecentlyViewedEntry {
        RecentlyViewedEntry {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Money::new(1000),
            image_url: None,
        }
    }

    fn ids(entries: &[RecentlyViewedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    fn tracker() -> (Arc<MemoryStore>, RecentlyViewed<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let recent = RecentlyViewed::new(Cache::new(Arc::clone(&store)), RECENTLY_VIEWED_KEY);
        (store, recent)
    }

    #[test]
    fn test_most_recent_first_capped() {
        let (_, recent) = tracker();
        for id in ["A", "B", "C", "D"] {
            recent.record_view(entry(id));
        }
        assert_eq!(ids(&recent.list()), ["D", "C", "B"]);

        let after = recent.record_view(entry("B"));
        assert_eq!(ids(&after), ["B", "D", "C"]);
        assert_eq!(ids(&recent.list()), ["B", "D", "C"]);
    }

    #[test]
    fn test_revisit_does_not_duplicate() {
        let (_, recent) = tracker();
        recent.record_view(entry("A"));
        recent.record_view(entry("A"));
        assert_eq!(ids(&recent.list()), ["A"]);
    }

    #[test]
    fn test_list_excluding_current() {
        let (_, recent) = tracker();
        for id in ["A", "B", "C"] {
            recent.record_view(entry(id));
        }
        assert_eq!(ids(&recent.list_excluding(&ProductId::new("B"))), ["C", "A"]);
        assert_eq!(ids(&recent.list_excluding(&ProductId::new("Z"))), ["C", "B", "A"]);
    }

    #[test]
    fn test_list_excluding_recaps_oversized_state() {
        let (store, recent) = tracker();
        let oversized: Vec<_> = ["A", "B", "C", "D", "E"].into_iter().map(entry).collect();
        store
            .set(RECENTLY_VIEWED_KEY, serde_json::to_value(&oversized).unwrap())
            .unwrap();

        assert_eq!(ids(&recent.list_excluding(&ProductId::new("A"))), ["B", "C", "D"]);
        assert_eq!(recent.list().len(), 3);
    }

    #[test]
    fn test_numeric_ids_match_string_ids() {
        let (store, recent) = tracker();
        store
            .set(
                RECENTLY_VIEWED_KEY,
                serde_json::json!([{"id": 1, "name": "Shirt", "price": 19.99}]),
            )
            .unwrap();

        assert!(recent.list_excluding(&ProductId::new("1")).is_empty());
    }

    #[test]
    fn test_custom_capacity() {
        let (store, _) = tracker();
        let recent = RecentlyViewed::new(Cache::new(store), "recent").with_capacity(2);
        for id in ["A", "B", "C"] {
            recent.record_view(entry(id));
        }
        assert_eq!(ids(&recent.list()), ["C", "B"]);
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let recent = RecentlyViewed::new(Cache::new(Arc::new(UnavailableStore)), RECENTLY_VIEWED_KEY);
        assert!(recent.list().is_empty());
        assert!(recent.list_excluding(&ProductId::new("1")).is_empty());

        let after = recent.record_view(entry("A"));
        assert_eq!(ids(&after), ["A"]);
    }

    #[test]
    fn test_entry_from_product() {
        let product = Product::new("4", "Wireless Headphones", Money::new(14999))
            .with_image("/images/headphones.jpg");
        let entry = RecentlyViewedEntry::from(&product);
        assert_eq!(entry.id.as_str(), "4");
        assert_eq!(entry.image_url.as_deref(), Some("/images/headphones.jpg"));
    }
}
