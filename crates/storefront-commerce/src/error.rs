//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The current selection cannot be added to the cart.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Catalog data could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A color/size selection that is not ready for add-to-cart.
///
/// These are recovered locally by the caller and shown to the shopper as a
/// corrective prompt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No color has been chosen.
    #[error("Please select a color")]
    MissingColor,

    /// The chosen color is sized and no size has been chosen.
    #[error("Please select a size")]
    MissingSize,
}

/// Errors raised while resolving raw catalog records.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Price was negative or not a number.
    #[error("Invalid price for product {id}: {value}")]
    InvalidPrice { id: ProductId, value: String },

    /// Nested variant list breaks a shape rule.
    #[error("Invalid variants for product {id}: {reason}")]
    InvalidVariants { id: ProductId, reason: String },

    /// Two records share the same id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// Catalog JSON could not be parsed.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
