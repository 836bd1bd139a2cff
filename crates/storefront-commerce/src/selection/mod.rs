//! Variant selection.
//!
//! Pure functions over product data deciding which sizes a color offers
//! and whether a color/size pair is ready for add-to-cart.

mod selector;

pub use selector::{available_sizes_for_color, validate_selection, Selection};
