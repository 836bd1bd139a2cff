//! Shopping cart module.
//!
//! Contains cart lines, the aggregator that owns them, and totals.

mod cart;
mod pricing;

pub use cart::{CartAggregator, CartLine, CART_KEY, DEFAULT_SIZE, PLACEHOLDER_IMAGE};
pub use pricing::CartTotals;
