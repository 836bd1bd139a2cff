//! Type-safe key-value storage adapter for the storefront.
//!
//! State such as the cart and the recently-viewed list is persisted as JSON
//! blobs under string keys. The backend is pluggable through the [`Storage`]
//! trait; [`Cache`] layers automatic (de)serialization on top.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//! use std::sync::Arc;
//!
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//! cache.set("cart", &vec!["1-White-M"]).unwrap();
//!
//! let cart: Option<Vec<String>> = cache.get("cart").unwrap();
//! assert_eq!(cart, Some(vec!["1-White-M".to_string()]));
//! ```

mod error;
mod file;
mod kv;
mod session;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
pub use session::SessionId;
pub use store::{MemoryStore, Storage, UnavailableStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, SessionId, Storage};
}
