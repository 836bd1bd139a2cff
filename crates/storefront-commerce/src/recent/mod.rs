//! Recently-viewed products.
//!
//! A short, most-recent-first list of product summaries with LRU eviction.

mod tracker;

pub use tracker::{RecentlyViewed, RecentlyViewedEntry, DEFAULT_CAPACITY, RECENTLY_VIEWED_KEY};
