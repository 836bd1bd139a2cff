//! Product catalog module.
//!
//! Contains products, their color variants, and the immutable catalog
//! they are looked up in.

mod catalog;
mod product;
mod seed;

pub use catalog::Catalog;
pub use product::{Product, ProductOptions, RawProduct, Variant, DEFAULT_COLOR};
