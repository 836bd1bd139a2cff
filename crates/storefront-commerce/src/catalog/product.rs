//! Product and variant types.
//!
//! Catalog records come in two shapes: a flat one (`colors` and `sizes`
//! arrays on the product) and a nested one (`variants: [{color, sizes,
//! image}]`). Both are resolved once, at deserialization, into
//! [`ProductOptions`] so nothing downstream has to sniff shapes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::money::Money;

/// Color reported for products that carry no color choice.
pub const DEFAULT_COLOR: &str = "Default";

/// A color-specific version of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Color, unique within the product.
    pub color: String,
    /// Sizes offered in this color, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Optional image override for this color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Variant {
    /// Create a variant with the given sizes and no image override.
    pub fn new<I, S>(color: impl Into<String>, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            color: color.into(),
            sizes: sizes.into_iter().map(Into::into).collect(),
            image: None,
        }
    }

    /// Set the image override.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// The purchasable options of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductOptions {
    /// No color choice; one shared size list (possibly empty).
    Simple { sizes: Vec<String> },
    /// One entry per color.
    Variants(Vec<Variant>),
}

impl ProductOptions {
    /// Resolve the flat `colors` x `sizes` shape.
    ///
    /// Every color becomes a variant sharing the same size list.
    pub fn from_flat<C, S>(colors: C, sizes: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let sizes: Vec<String> = sizes.into_iter().map(Into::into).collect();
        let variants: Vec<Variant> = colors
            .into_iter()
            .map(|color| Variant {
                color: color.into(),
                sizes: sizes.clone(),
                image: None,
            })
            .collect();

        if variants.is_empty() {
            ProductOptions::Simple { sizes }
        } else {
            ProductOptions::Variants(variants)
        }
    }
}

impl Default for ProductOptions {
    fn default() -> Self {
        ProductOptions::Simple { sizes: Vec::new() }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct", into = "RawProduct")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Base image reference.
    pub image: Option<String>,
    /// Category used for grouping listings.
    pub category: Option<String>,
    /// Colors and sizes on offer.
    pub options: ProductOptions,
}

impl Product {
    /// Create a product with no colors or sizes.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: None,
            category: None,
            options: ProductOptions::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_options(mut self, options: ProductOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_variants(self, variants: Vec<Variant>) -> Self {
        self.with_options(ProductOptions::Variants(variants))
    }

    /// Check if the product offers a color choice.
    pub fn has_variants(&self) -> bool {
        matches!(self.options, ProductOptions::Variants(_))
    }

    /// Colors on offer, in catalog order.
    ///
    /// A product without variants reports the single [`DEFAULT_COLOR`].
    pub fn colors(&self) -> Vec<&str> {
        match &self.options {
            ProductOptions::Simple { .. } => vec![DEFAULT_COLOR],
            ProductOptions::Variants(variants) => {
                variants.iter().map(|v| v.color.as_str()).collect()
            }
        }
    }

    /// The variant for `color` (case-sensitive exact match).
    pub fn variant(&self, color: &str) -> Option<&Variant> {
        match &self.options {
            ProductOptions::Simple { .. } => None,
            ProductOptions::Variants(variants) => variants.iter().find(|v| v.color == color),
        }
    }

    /// Sizes offered in `color`, or `None` when the color is not offered.
    pub fn sizes_for(&self, color: &str) -> Option<&[String]> {
        match &self.options {
            ProductOptions::Simple { sizes } if color == DEFAULT_COLOR => Some(sizes.as_slice()),
            ProductOptions::Simple { .. } => None,
            ProductOptions::Variants(_) => self.variant(color).map(|v| v.sizes.as_slice()),
        }
    }

    /// Image to show for `color`: the variant override, else the base image.
    pub fn image_for(&self, color: &str) -> Option<&str> {
        self.variant(color)
            .and_then(|v| v.image.as_deref())
            .or(self.image.as_deref())
    }
}

/// Product record as it appears in catalog JSON.
///
/// Accepts both the flat and nested shapes; serializes the nested one (or
/// the flat `sizes` list for products without colors).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: serde_json::Value,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
}

impl TryFrom<RawProduct> for Product {
    type Error = CatalogError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let price = parse_price(&raw.id, &raw.price)?;

        let options = match raw.variants {
            Some(variants) if !variants.is_empty() => {
                check_variants(&raw.id, &variants)?;
                ProductOptions::Variants(variants)
            }
            _ => {
                let colors = raw.colors.unwrap_or_default();
                if let Some(dup) = first_duplicate(&colors) {
                    return Err(CatalogError::InvalidVariants {
                        id: raw.id,
                        reason: format!("duplicate color {dup:?}"),
                    });
                }
                ProductOptions::from_flat(colors, raw.sizes.unwrap_or_default())
            }
        };

        Ok(Product {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            price,
            image: raw.image,
            category: raw.category,
            options,
        })
    }
}

impl From<Product> for RawProduct {
    fn from(product: Product) -> Self {
        let (sizes, variants) = match product.options {
            ProductOptions::Simple { sizes } => (Some(sizes), None),
            ProductOptions::Variants(variants) => (None, Some(variants)),
        };

        RawProduct {
            id: product.id,
            name: product.name,
            description: product.description,
            price: serde_json::Value::from(product.price.to_decimal()),
            image: product.image,
            category: product.category,
            colors: None,
            sizes,
            variants,
        }
    }
}

fn parse_price(id: &ProductId, value: &serde_json::Value) -> Result<Money, CatalogError> {
    let money = match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(Money::from_decimal),
        serde_json::Value::String(s) => Money::parse_decimal(s),
        _ => None,
    };

    match money {
        Some(m) if !m.is_negative() => Ok(m),
        _ => Err(CatalogError::InvalidPrice {
            id: id.clone(),
            value: value.to_string(),
        }),
    }
}

fn first_duplicate(colors: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    colors.iter().find(|c| !seen.insert(c.as_str())).cloned()
}

fn check_variants(id: &ProductId, variants: &[Variant]) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidVariants {
        id: id.clone(),
        reason,
    };

    let mut seen = HashSet::new();
    for variant in variants {
        if variant.color.is_empty() {
            return Err(invalid("variant with empty color".to_string()));
        }
        if !seen.insert(variant.color.as_str()) {
            return Err(invalid(format!("duplicate color {:?}", variant.color)));
        }
        if variant.sizes.is_empty() {
            return Err(invalid(format!("color {:?} has no sizes", variant.color)));
        }
    }
    Ok(())
}
