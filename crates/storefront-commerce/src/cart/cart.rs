//! Cart lines and the aggregator that owns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, Storage};
use tracing::{debug, warn};

use crate::cart::CartTotals;
use crate::catalog::{Product, DEFAULT_COLOR};
use crate::ids::{LineId, ProductId};
use crate::money::{decimal, Money};

/// Storage key for the cart outside any session namespace.
pub const CART_KEY: &str = "cart";

/// Size recorded when a line is added without one.
pub const DEFAULT_SIZE: &str = "One Size";

/// Image recorded when the product has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-product.jpg";

/// One row in the cart: a product/color/size combination and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Derived from (product, color, size).
    pub id: LineId,
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time; later catalog changes do not affect it.
    #[serde(with = "decimal")]
    pub price: Money,
    pub color: String,
    pub size: String,
    /// Always at least 1.
    pub quantity: i64,
    pub image_url: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CartLine {
    /// A fresh line with quantity 1, snapshotting the product.
    pub fn new(product: &Product, color: &str, size: &str) -> Self {
        Self {
            id: LineId::derive(&product.id, color, size),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            color: color.to_string(),
            size: size.to_string(),
            quantity: 1,
            image_url: product
                .image_for(color)
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
            added_at: Utc::now(),
            last_updated: None,
        }
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }
}

/// Owns the cart lines of one session and writes them through to storage.
///
/// Storage problems never surface to the caller: an unreadable cart opens
/// empty and a failed write is logged while the in-memory lines stay
/// authoritative.
pub struct CartAggregator<S> {
    cache: Cache<S>,
    key: String,
    lines: Vec<CartLine>,
}

impl<S: Storage> CartAggregator<S> {
    /// Load the cart stored under `key`.
    pub fn open(cache: Cache<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = match cache.get::<Vec<CartLine>>(&key) {
            Ok(Some(mut lines)) => {
                lines.retain(|line| line.quantity >= 1);
                lines
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "cart storage unavailable, starting empty");
                Vec::new()
            }
        };

        debug!(key = %key, lines = lines.len(), "opened cart");
        Self { cache, key, lines }
    }

    /// Add one unit of `product` in `color`/`size`.
    ///
    /// An existing line for the same triple has its quantity incremented;
    /// otherwise a new line is appended. No validation happens here; run the
    /// selection through the variant selector first. Empty color or size are
    /// recorded as [`DEFAULT_COLOR`] / [`DEFAULT_SIZE`].
    pub fn add_to_cart(&mut self, product: &Product, color: &str, size: &str) -> LineId {
        let color = if color.is_empty() { DEFAULT_COLOR } else { color };
        let size = if size.is_empty() { DEFAULT_SIZE } else { size };
        let id = LineId::derive(&product.id, color, size);

        let existing = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id && l.color == color && l.size == size);
        if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(1);
            line.last_updated = Some(Utc::now());
            debug!(line = %id, quantity = line.quantity, "incremented cart line");
        } else {
            self.lines.push(CartLine::new(product, color, size));
            debug!(line = %id, "added cart line");
        }

        self.persist();
        id
    }

    /// Set the quantity of a line.
    ///
    /// Quantities below 1 are ignored; removal is [`Self::remove_from_cart`].
    /// Returns whether a line was updated.
    pub fn update_quantity(&mut self, line_id: &LineId, quantity: i64) -> bool {
        if quantity < 1 {
            debug!(line = %line_id, quantity, "ignored quantity below 1");
            return false;
        }

        let Some(line) = self.lines.iter_mut().find(|l| &l.id == line_id) else {
            return false;
        };
        line.quantity = quantity;
        line.last_updated = Some(Utc::now());
        debug!(line = %line_id, quantity, "updated cart line");

        self.persist();
        true
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove_from_cart(&mut self, line_id: &LineId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != line_id);
        let removed = self.lines.len() < len_before;
        if removed {
            debug!(line = %line_id, "removed cart line");
            self.persist();
        }
        removed
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        debug!(key = %self.key, "cleared cart");
        self.persist();
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.totals().items
    }

    /// Sum of `price * quantity`, formatted with two decimals.
    pub fn total_price(&self) -> String {
        self.totals().price_string()
    }

    /// Item count and subtotal together.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get_line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn unique_line_count(&self) -> usize {
        self.lines.len()
    }

    /// Storage key the lines are written to.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.lines) {
            warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

impl<S> std::fmt::Debug for CartAggregator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartAggregator")
            .field("key", &self.key)
            .field("lines", &self.lines)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variant;
    use std::sync::Arc;
    use storefront_cache::{MemoryStore, UnavailableStore};

    fn shirt() -> Product {
        Product::new("1", "Shirt", Money::new(1999))
            .with_image("/images/shirt.jpg")
            .with_variants(vec![
                Variant::new("White", ["M", "L"]),
                Variant::new("Black", ["M"]).with_image("/images/shirt-black.jpg"),
            ])
    }

    fn jeans() -> Product {
        Product::new("2", "Jeans", Money::new(4999))
    }

    fn memory_cart() -> (Arc<MemoryStore>, CartAggregator<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cart = CartAggregator::open(Cache::new(Arc::clone(&store)), CART_KEY);
        (store, cart)
    }

    #[test]
    fn test_add_same_triple_merges() {
        let (_, mut cart) = memory_cart();
        let product = shirt();

        let first = cart.add_to_cart(&product, "White", "M");
        let second = cart.add_to_cart(&product, "White", "M");
        let third = cart.add_to_cart(&product, "White", "M");

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(cart.unique_line_count(), 1);
        assert_eq!(cart.get_line(&first).unwrap().quantity, 3);
        assert!(cart.get_line(&first).unwrap().last_updated.is_some());
    }

    #[test]
    fn test_distinct_triples_get_distinct_lines() {
        let (_, mut cart) = memory_cart();
        let product = shirt();

        cart.add_to_cart(&product, "White", "M");
        cart.add_to_cart(&product, "White", "L");
        cart.add_to_cart(&product, "Black", "M");

        assert_eq!(cart.unique_line_count(), 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_dashed_labels_do_not_merge() {
        let (_, mut cart) = memory_cart();
        let product = shirt();

        let a = cart.add_to_cart(&product, "Off-White", "L");
        let b = cart.add_to_cart(&product, "Off", "White-L");

        assert_ne!(a, b);
        assert_eq!(cart.unique_line_count(), 2);
        assert_eq!(cart.get_line(&a).unwrap().color, "Off-White");
        assert_eq!(cart.get_line(&b).unwrap().size, "White-L");
    }

    #[test]
    fn test_whitespace_in_size_is_significant() {
        let (_, mut cart) = memory_cart();
        let product = shirt();

        let plain = cart.add_to_cart(&product, "White", "M");
        let padded = cart.add_to_cart(&product, "White", "M ");

        assert_ne!(plain, padded);
        assert_eq!(cart.unique_line_count(), 2);
        assert_eq!(cart.get_line(&plain).unwrap().quantity, 1);
        assert_eq!(cart.get_line(&padded).unwrap().size, "M ");
    }

    #[test]
    fn test_price_snapshot_not_live() {
        let (_, mut cart) = memory_cart();
        let mut product = shirt();
        let id = cart.add_to_cart(&product, "White", "M");

        product.price = Money::new(100);
        product.name = "Renamed".to_string();
        cart.add_to_cart(&product, "White", "M");

        let line = cart.get_line(&id).unwrap();
        assert_eq!(line.price.amount_cents, 1999);
        assert_eq!(line.name, "Shirt");
        assert_eq!(cart.total_price(), "39.98");
    }

    #[test]
    fn test_image_snapshot() {
        let (_, mut cart) = memory_cart();
        let white = cart.add_to_cart(&shirt(), "White", "M");
        let black = cart.add_to_cart(&shirt(), "Black", "M");
        let plain = cart.add_to_cart(&jeans(), "Blue", "32");

        assert_eq!(cart.get_line(&white).unwrap().image_url, "/images/shirt.jpg");
        assert_eq!(cart.get_line(&black).unwrap().image_url, "/images/shirt-black.jpg");
        assert_eq!(cart.get_line(&plain).unwrap().image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_empty_color_and_size_use_defaults() {
        let (_, mut cart) = memory_cart();
        let id = cart.add_to_cart(&jeans(), "", "");
        assert_eq!(id.as_str(), "2-Default-One Size");

        let line = cart.get_line(&id).unwrap();
        assert_eq!(line.color, DEFAULT_COLOR);
        assert_eq!(line.size, DEFAULT_SIZE);
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let (store, mut cart) = memory_cart();
        let id = cart.add_to_cart(&shirt(), "White", "M");
        let before = store.get(CART_KEY).unwrap();

        assert!(!cart.update_quantity(&id, 0));
        assert!(!cart.update_quantity(&id, -1));

        assert_eq!(cart.get_line(&id).unwrap().quantity, 1);
        assert_eq!(store.get(CART_KEY).unwrap(), before);
    }

    #[test]
    fn test_update_quantity() {
        let (_, mut cart) = memory_cart();
        let id = cart.add_to_cart(&shirt(), "White", "M");

        assert!(cart.update_quantity(&id, 5));
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), "99.95");
    }

    #[test]
    fn test_update_unknown_line_is_noop() {
        let (_, mut cart) = memory_cart();
        cart.add_to_cart(&shirt(), "White", "M");

        assert!(!cart.update_quantity(&LineId::new("nope"), 4));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_subtracts_line_quantity() {
        let (_, mut cart) = memory_cart();
        let keep = cart.add_to_cart(&shirt(), "White", "M");
        let gone = cart.add_to_cart(&jeans(), "Blue", "32");
        cart.update_quantity(&gone, 3);
        cart.update_quantity(&keep, 2);

        let before = cart.total_items();
        let removed_quantity = cart.get_line(&gone).unwrap().quantity;
        assert!(cart.remove_from_cart(&gone));
        assert_eq!(cart.total_items(), before - removed_quantity);

        assert!(!cart.remove_from_cart(&gone));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_clear_cart() {
        let (store, mut cart) = memory_cart();
        cart.add_to_cart(&shirt(), "White", "M");
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), "0.00");
        assert_eq!(store.get(CART_KEY).unwrap(), Some(serde_json::json!([])));
    }

    #[test]
    fn test_every_mutation_persists() {
        let (store, mut cart) = memory_cart();
        let id = cart.add_to_cart(&shirt(), "White", "M");
        cart.update_quantity(&id, 4);

        let reopened = CartAggregator::open(Cache::new(Arc::clone(&store)), CART_KEY);
        assert_eq!(reopened.lines(), cart.lines());
        assert_eq!(reopened.total_items(), 4);
    }

    #[test]
    fn test_persisted_shape() {
        let (store, mut cart) = memory_cart();
        cart.add_to_cart(&shirt(), "White", "M");

        let value = store.get(CART_KEY).unwrap().unwrap();
        let line = &value[0];
        assert_eq!(line["id"], "1-White-M");
        assert_eq!(line["productId"], "1");
        assert_eq!(line["price"], 19.99);
        assert_eq!(line["quantity"], 1);
        assert!(line.get("addedAt").is_some());
    }

    #[test]
    fn test_invalid_persisted_lines_dropped() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = CartAggregator::open(Cache::new(Arc::clone(&store)), CART_KEY);
        let id = cart.add_to_cart(&shirt(), "White", "M");

        let mut value = store.get(CART_KEY).unwrap().unwrap();
        value[0]["quantity"] = serde_json::json!(0);
        store.set(CART_KEY, value).unwrap();

        let reopened = CartAggregator::open(Cache::new(store), CART_KEY);
        assert!(reopened.get_line(&id).is_none());
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut cart = CartAggregator::open(Cache::new(Arc::new(UnavailableStore)), CART_KEY);
        assert!(cart.is_empty());

        let id = cart.add_to_cart(&shirt(), "White", "M");
        assert_eq!(cart.get_line(&id).unwrap().quantity, 1);
        assert_eq!(cart.total_price(), "19.99");
    }

    #[test]
    fn test_corrupt_storage_degrades() {
        let store = Arc::new(MemoryStore::new());
        store.set(CART_KEY, serde_json::json!({"not": "a list"})).unwrap();

        let cart = CartAggregator::open(Cache::new(store), CART_KEY);
        assert!(cart.is_empty());
    }
}
