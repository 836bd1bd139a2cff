//! Built-in sample catalog.

use crate::catalog::{Catalog, Product, ProductOptions};
use crate::money::Money;

const NO_SIZES: [&str; 0] = [];

impl Catalog {
    /// The six sample products the storefront ships with.
    pub fn seed() -> Self {
        let usd = Money::new;

        let products = vec![
            Product::new("1", "Classic White T-Shirt", usd(1999))
                .with_description("A comfortable and stylish white t-shirt for everyday wear.")
                .with_image("/images/white-tshirt.jpg")
                .with_category("Clothing")
                .with_options(ProductOptions::from_flat(
                    ["White", "Black", "Gray"],
                    ["S", "M", "L", "XL"],
                )),
            Product::new("2", "Blue Jeans", usd(4999))
                .with_description("Classic blue denim jeans with a comfortable fit.")
                .with_image("/images/blue-jeans.jpg")
                .with_category("Clothing")
                .with_options(ProductOptions::from_flat(
                    ["Blue", "Black", "Gray"],
                    ["28", "30", "32", "34", "36"],
                )),
            Product::new("3", "Running Shoes", usd(8999))
                .with_description("High-performance running shoes for athletes.")
                .with_image("/images/running-shoes.jpg")
                .with_category("Footwear")
                .with_options(ProductOptions::from_flat(
                    ["Black", "White", "Red", "Blue"],
                    ["7", "8", "9", "10", "11", "12"],
                )),
            Product::new("4", "Wireless Headphones", usd(14999))
                .with_description("Premium wireless headphones with noise cancellation.")
                .with_image("/images/headphones.jpg")
                .with_category("Electronics")
                .with_options(ProductOptions::from_flat(["Black", "White", "Blue"], NO_SIZES)),
            Product::new("5", "Smart Watch", usd(19999))
                .with_description("Feature-rich smartwatch with health tracking.")
                .with_image("/images/smart-watch.jpg")
                .with_category("Electronics")
                .with_options(ProductOptions::from_flat(["Black", "Silver", "Gold"], NO_SIZES)),
            Product::new("6", "Backpack", usd(3999))
                .with_description("Durable backpack with multiple compartments.")
                .with_image("/images/backpack.jpg")
                .with_category("Accessories")
                .with_options(ProductOptions::from_flat(["Black", "Blue", "Gray"], NO_SIZES)),
        ];

        Self { products }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_contents() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 6);

        let ids: Vec<&str> = catalog.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_accessories_have_no_sizes() {
        let catalog = Catalog::seed();
        let backpack = &catalog.list()[5];
        assert!(backpack.has_variants());
        assert!(backpack.sizes_for("Gray").unwrap().is_empty());
    }
}
