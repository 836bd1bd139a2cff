//! Per-session storefront state.
//!
//! A [`StorefrontSession`] bundles the cart and the recently-viewed list of
//! one shopper. Both are namespaced under the session id in the shared
//! store, so two sessions never see each other's state.

use std::sync::Arc;

use storefront_cache::{Cache, SessionId, Storage};
use tracing::debug;

use crate::cart::{CartAggregator, CART_KEY};
use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::{LineId, ProductId};
use crate::recent::{RecentlyViewed, RecentlyViewedEntry, RECENTLY_VIEWED_KEY};
use crate::selection::Selection;

/// Cart and recently-viewed state for one session.
pub struct StorefrontSession<S> {
    id: SessionId,
    cart: CartAggregator<S>,
    recent: RecentlyViewed<S>,
}

impl<S: Storage> StorefrontSession<S> {
    /// Start (or resume) the session `id` against `store`.
    pub fn start(store: Arc<S>, id: SessionId) -> Self {
        let cache = Cache::new(store);
        let cart = CartAggregator::open(cache.clone(), id.key(CART_KEY));
        let recent = RecentlyViewed::new(cache, id.key(RECENTLY_VIEWED_KEY));

        debug!(session = %id, "session started");
        Self { id, cart, recent }
    }

    /// Keep `capacity` recently-viewed entries instead of the default.
    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent = self.recent.with_capacity(capacity);
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn cart(&self) -> &CartAggregator<S> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartAggregator<S> {
        &mut self.cart
    }

    pub fn recently_viewed(&self) -> &RecentlyViewed<S> {
        &self.recent
    }

    /// Look up a product for its detail view and record the view.
    pub fn view_product<'c>(
        &self,
        catalog: &'c Catalog,
        id: &ProductId,
    ) -> Result<&'c Product, CommerceError> {
        let product = catalog.get(id)?;
        self.recent.record_view(RecentlyViewedEntry::from(product));
        Ok(product)
    }

    /// Validate the selection and add it to the cart.
    ///
    /// On success the selected size is cleared while the color is kept,
    /// ready for the next pick. On failure nothing changes.
    pub fn add_selection(
        &mut self,
        product: &Product,
        selection: &mut Selection,
    ) -> Result<LineId, CommerceError> {
        selection.validate(product)?;
        let line = self
            .cart
            .add_to_cart(product, selection.color(), selection.size());
        selection.reset_size();
        Ok(line)
    }

    /// End the session. Cart writes happen on every mutation, so this only
    /// drops in-memory state.
    pub fn end(self) {
        debug!(session = %self.id, lines = self.cart.unique_line_count(), "session ended");
    }
}

impl<S> std::fmt::Debug for StorefrontSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontSession")
            .field("id", &self.id)
            .field("cart", &self.cart)
            .field("recent", &self.recent)
            .finish()
    }
}
