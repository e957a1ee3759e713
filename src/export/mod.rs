//! Order Exports
//!
//! Serializers for the committed cart: a CSV writer and a print-ready
//! document renderer. Both consume a line snapshot as-is, never the store,
//! and share one column set and one row projection so the formats cannot
//! drift apart.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CartItem;

pub mod csv;
pub mod document;

/// Column headers shared by every export format, in order.
pub const COLUMNS: [&str; 13] = [
    "Category",
    "Name",
    "Size",
    "Thickness",
    "Color",
    "Pcs/Box",
    "Boxes",
    "Total Pcs",
    "Box/Kg",
    "Box/m3",
    "Total Kg",
    "Total m3",
    "SKU",
];

/// Export Errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("failed to serialize CSV: {0}")]
    Csv(#[from] ::csv::Error),

    /// The underlying writer failed.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// One export row projected from a committed line, with the derived totals
/// every format shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    /// Top-level category name.
    pub category: String,

    /// Display name.
    pub name: String,

    /// Selected size, or empty when the product has no size axis.
    pub size: String,

    /// Selected thickness, or empty.
    pub thickness: String,

    /// Selected color, or empty.
    pub color: String,

    /// Pieces per box.
    pub pcs_per_box: u32,

    /// Ordered boxes.
    pub boxes: u32,

    /// `boxes x pcs_per_box`.
    pub total_pcs: u64,

    /// Weight of one box in kilograms.
    pub box_kg: Decimal,

    /// Volume of one box in cubic metres.
    pub box_m3: Decimal,

    /// `boxes x box_kg`.
    pub total_kg: Decimal,

    /// `boxes x box_m3`.
    pub total_m3: Decimal,

    /// Stock-keeping unit.
    pub sku: String,
}

impl OrderRow {
    /// Project a committed line into the shared export shape.
    #[must_use]
    pub fn from_item(item: &CartItem) -> Self {
        OrderRow {
            category: item.category.clone(),
            name: item.name.clone(),
            size: item.size.clone().unwrap_or_default(),
            thickness: item.thickness.clone().unwrap_or_default(),
            color: item.color.clone().unwrap_or_default(),
            pcs_per_box: item.pcs_per_box,
            boxes: item.qty_boxes,
            total_pcs: item.total_pcs(),
            box_kg: item.box_kg,
            box_m3: item.box_m3,
            total_kg: item.total_kg(),
            total_m3: item.total_m3(),
            sku: item.sku.clone(),
        }
    }

    /// The row as display strings, in [`COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [String; 13] {
        [
            self.category.clone(),
            self.name.clone(),
            self.size.clone(),
            self.thickness.clone(),
            self.color.clone(),
            self.pcs_per_box.to_string(),
            self.boxes.to_string(),
            self.total_pcs.to_string(),
            format_quantity(self.box_kg),
            format_quantity(self.box_m3),
            format_quantity(self.total_kg),
            format_quantity(self.total_m3),
            self.sku.clone(),
        ]
    }
}

/// Renders a decimal quantity without trailing zeros ("15", "0.3").
#[must_use]
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}
