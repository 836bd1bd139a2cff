//! Immutable, ordered product catalog.

use std::collections::HashSet;

use crate::catalog::{Product, RawProduct};
use crate::error::{CatalogError, CommerceError};
use crate::ids::ProductId;

/// An ordered sequence of products, queried by id.
///
/// Ids are canonicalized at construction, so lookups tolerate both the
/// numeric and string form of the same id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub(super) products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of product records in either catalog shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawProduct> = serde_json::from_str(json)?;
        let products = raw
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(products)
    }

    /// Find a product by id.
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Get a product by id, or `ProductNotFound`.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find_by_id(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.clone()))
    }

    /// All products, in catalog order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
