//! Order Totals

use rust_decimal::Decimal;

use crate::cart::CartItem;

/// Aggregate rollup across committed cart lines.
///
/// Derived, never stored: recompute from the current lines on every use and
/// the figures can never drift from the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Total boxes across all lines.
    pub boxes: u64,

    /// Total pieces (`boxes x pcs_per_box` summed per line).
    pub pcs: u64,

    /// Total weight in kilograms.
    pub kg: Decimal,

    /// Total volume in cubic metres.
    pub m3: Decimal,
}

impl Totals {
    /// Whether every figure is zero (the empty-cart rollup).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.boxes == 0 && self.pcs == 0 && self.kg.is_zero() && self.m3.is_zero()
    }
}

/// Sum boxes, pieces, kilograms and cubic metres over a snapshot of lines.
///
/// Pure: reads only the slice it is given, never a store. An empty slice
/// yields all zeros.
#[must_use]
pub fn cart_totals(items: &[CartItem]) -> Totals {
    items.iter().fold(Totals::default(), |acc, item| {
        let boxes = u64::from(item.qty_boxes);
        let boxes_dec = Decimal::from(item.qty_boxes);

        Totals {
            boxes: acc.boxes.saturating_add(boxes),
            pcs: acc
                .pcs
                .saturating_add(boxes.saturating_mul(u64::from(item.pcs_per_box))),
            kg: acc.kg.saturating_add(item.box_kg.saturating_mul(boxes_dec)),
            m3: acc.m3.saturating_add(item.box_m3.saturating_mul(boxes_dec)),
        }
    })
}
