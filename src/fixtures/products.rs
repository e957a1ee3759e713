//! Product Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{catalog::Product, fixtures::FixtureError};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product ref -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// External catalog id
    pub id: String,

    /// Stock-keeping unit
    #[serde(default)]
    pub sku: String,

    /// Product name
    pub name: String,

    /// Category name
    #[serde(default)]
    pub category: String,

    /// Subcategory name
    #[serde(default)]
    pub sub: String,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Available thicknesses
    #[serde(default)]
    pub thicknesses: Vec<String>,

    /// Available colors
    #[serde(default)]
    pub colors: Vec<String>,

    /// Pieces per box
    pub pcs_per_box: u32,

    /// Per-box weight (e.g., "28.6 kg")
    pub box_kg: String,

    /// Per-box volume (e.g., "0.052 m3")
    pub box_m3: String,

    /// Optional image reference
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let box_kg = parse_quantity(&fixture.box_kg, "kg")?;
        let box_m3 = parse_quantity(&fixture.box_m3, "m3")?;

        Ok(Product {
            id: fixture.id,
            sku: fixture.sku,
            name: fixture.name,
            category: fixture.category,
            sub: fixture.sub,
            sizes: fixture.sizes.into_iter().collect(),
            thicknesses: fixture.thicknesses.into_iter().collect(),
            colors: fixture.colors.into_iter().collect(),
            pcs_per_box: fixture.pcs_per_box,
            box_kg,
            box_m3,
            thumbnail: fixture.thumbnail,
        })
    }
}

/// Parse a unit-suffixed quantity string (e.g., "28.6 kg") into a decimal,
/// checking the unit.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT UNIT", if the
/// amount cannot be parsed as a decimal, or if the unit does not match.
pub fn parse_quantity(s: &str, unit: &str) -> Result<Decimal, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidQuantity(format!(
            "Expected format 'AMOUNT {unit}', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidQuantity(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidQuantity(s.to_string()))?;

    let found_unit = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidQuantity(s.to_string()))?;

    if *found_unit != unit {
        return Err(FixtureError::InvalidQuantity(format!(
            "Expected unit '{unit}', got: {s}"
        )));
    }

    Ok(amount)
}
