//! Catalog Ingest Example
//!
//! This example parses a raw catalog payload the way an admin-panel import
//! would: loosely-shaped records with aliased and missing fields are coerced
//! into products, warnings are reported per field, and the resulting catalog
//! is used to commit one order line.
//!
//! Run with: `cargo run --example ingest_catalog`

use std::io;

use anyhow::{Result, anyhow};
use pallet::{
    cart::Cart, catalog::ingest::parse_products, containers::ContainerSpec, rows::RowStates,
    summary::OrderSummary,
};

const PAYLOAD: &str = r#"{
    "products": [
        {
            "productId": "P-7001",
            "sku": "DECK-LARCH",
            "title": "Siberian Larch Decking",
            "category": "Timber",
            "sub": "Decking",
            "size": ["28x142x4000"],
            "colors": ["Natural", "Brushed Grey"],
            "pcsPerBox": 4,
            "boxKg": "31.5",
            "boxM3": 0.064
        },
        {
            "productId": "P-7002",
            "title": "Deck Fixing Kit",
            "category": "Timber",
            "pcsPerBox": 1,
            "boxKg": 2.4
        },
        {
            "title": "Orphan row with no id"
        }
    ]
}"#;

/// Catalog Ingest Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let (catalog, warnings) = parse_products(PAYLOAD)?.into_catalog();

    println!("Ingested {} products", catalog.len());

    for warning in &warnings {
        println!("  warning: {warning}");
    }

    let (key, product) = catalog.by_id("P-7001").ok_or(anyhow!("product not found"))?;

    let mut rows = RowStates::new();
    let mut cart = Cart::new();

    {
        let state = rows.state_mut(key).ok_or(anyhow!("row not found"))?;

        state.size = product.sizes.first().cloned();
        state.color = product.colors.first().cloned();
        state.set_boxes(18);
    }

    rows.commit(&catalog, key, &mut cart)?;

    let containers = ContainerSpec::builtins();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    OrderSummary::new(cart.items(), &containers).write_to(&mut handle)?;

    Ok(())
}
