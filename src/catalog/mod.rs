//! Catalog
//!
//! Typed product and category records, plus the in-memory store the row grid
//! and fixtures read from. Records enter through [`ingest`], which defaults
//! every malformed upstream field, so nothing downstream re-checks payload
//! shape.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

pub mod ingest;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Option lists (sizes, thicknesses, colors) rarely exceed a handful.
pub type OptionList = SmallVec<[String; 4]>;

/// A fully-defaulted catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// External catalog id.
    pub id: String,

    /// Stock-keeping unit.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Top-level category name.
    pub category: String,

    /// Subcategory name.
    pub sub: String,

    /// Available sizes; empty when the product has no size axis.
    pub sizes: OptionList,

    /// Available thicknesses; empty when the product has no thickness axis.
    pub thicknesses: OptionList,

    /// Available colors; empty when the product has no color axis.
    pub colors: OptionList,

    /// Pieces per box.
    pub pcs_per_box: u32,

    /// Weight of one box in kilograms.
    pub box_kg: Decimal,

    /// Volume of one box in cubic metres.
    pub box_m3: Decimal,

    /// Optional image reference.
    pub thumbnail: Option<String>,
}

/// A display-grouping category. Never consulted by the cart core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// External catalog id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// URL-safe slug.
    pub slug: String,
}

/// Product store keyed by [`ProductKey`], with an external-id index and
/// stable display order.
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    by_id: FxHashMap<String, ProductKey>,
    order: Vec<ProductKey>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, replacing any earlier record with the same external
    /// id. A replaced record keeps its key and display position.
    pub fn insert(&mut self, product: Product) -> ProductKey {
        if let Some(&existing) = self.by_id.get(&product.id)
            && let Some(slot) = self.products.get_mut(existing)
        {
            *slot = product;
            return existing;
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.by_id.insert(id, key);
        self.order.push(key);

        key
    }

    /// Look up a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Look up a product by its external catalog id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<(ProductKey, &Product)> {
        let key = *self.by_id.get(id)?;
        let product = self.products.get(key)?;

        Some((key, product))
    }

    /// Iterate products in display (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.order
            .iter()
            .filter_map(|&key| self.products.get(key).map(|product| (key, product)))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replace the category list used for display grouping.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Categories in catalog order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}
