//! Storefront domain state: catalog, variant selection, cart and
//! recently-viewed products.
//!
//! - **Catalog**: products with flat or per-color size options
//! - **Selection**: color/size choice and add-to-cart validation
//! - **Cart**: quantity-merging lines with snapshotted prices
//! - **Recent**: bounded, most-recent-first list of viewed products
//!
//! Cart and recently-viewed state are written through a
//! [`storefront_cache::Storage`] backend under per-session keys.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_cache::{MemoryStore, SessionId};
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::seed();
//! let mut session = StorefrontSession::start(Arc::new(MemoryStore::new()), SessionId::default());
//!
//! let shirt = session.view_product(&catalog, &ProductId::new("1")).unwrap();
//! let mut selection = Selection::for_product(shirt);
//! selection.select_size("M");
//! session.add_selection(shirt, &mut selection).unwrap();
//!
//! assert_eq!(session.cart().total_items(), 1);
//! assert_eq!(session.cart().total_price(), "19.99");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod recent;
pub mod selection;
pub mod session;

pub use error::{CatalogError, CommerceError, ValidationError};
pub use ids::*;
pub use money::Money;
pub use session::StorefrontSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product, ProductOptions, Variant};

    // Selection
    pub use crate::selection::{available_sizes_for_color, validate_selection, Selection};

    // Cart
    pub use crate::cart::{CartAggregator, CartLine, CartTotals};

    // Recently viewed
    pub use crate::recent::{RecentlyViewed, RecentlyViewedEntry};

    pub use crate::session::StorefrontSession;
}
