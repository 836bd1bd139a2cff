//! Size availability and selection validation.

use crate::catalog::Product;
use crate::error::ValidationError;

/// Sizes offered by `product` in `color`.
///
/// Empty when `color` is empty or no variant has that exact color.
pub fn available_sizes_for_color<'a>(product: &'a Product, color: &str) -> &'a [String] {
    if color.is_empty() {
        return &[];
    }
    product.sizes_for(color).unwrap_or(&[])
}

/// Check a color/size pair before it is added to the cart.
///
/// Unsized colors (accessories) accept an empty size.
pub fn validate_selection(
    product: &Product,
    color: &str,
    size: &str,
) -> Result<(), ValidationError> {
    if color.is_empty() {
        return Err(ValidationError::MissingColor);
    }
    if size.is_empty() && !available_sizes_for_color(product, color).is_empty() {
        return Err(ValidationError::MissingSize);
    }
    Ok(())
}

/// The shopper's in-progress color/size choice on a product page.
///
/// Choosing a color always clears the size, so a size picked for one color
/// is never carried over to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    color: String,
    size: String,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection with the product's first color preselected.
    pub fn for_product(product: &Product) -> Self {
        Self {
            color: product
                .colors()
                .first()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            size: String::new(),
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    /// Choose a color. Clears the size.
    pub fn select_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
        self.size.clear();
    }

    /// Choose a size for the current color.
    pub fn select_size(&mut self, size: impl Into<String>) {
        self.size = size.into();
    }

    /// Clear the size, keeping the color.
    pub fn reset_size(&mut self) {
        self.size.clear();
    }

    /// Sizes offered for the current color.
    pub fn available_sizes<'a>(&self, product: &'a Product) -> &'a [String] {
        available_sizes_for_color(product, &self.color)
    }

    /// Validate the current choice against `product`.
    pub fn validate(&self, product: &Product) -> Result<(), ValidationError> {
        validate_selection(product, &self.color, &self.size)
    }

    /// Check if the current choice is ready for add-to-cart.
    pub fn is_complete(&self, product: &Product) -> bool {
        self.validate(product).is_ok()
    }
}
