//! Catalog Rows
//!
//! Transient per-product selection state and the validation gate every row
//! passes through before it can reach the cart. Row state lives only in
//! session memory and is never persisted.

use slotmap::SecondaryMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartItem},
    catalog::{Catalog, ProductKey},
    variant::VariantKey,
};

/// Why a row could not be committed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RowError {
    /// The product is no longer in the catalog.
    #[error("product is not in the catalog")]
    UnknownProduct,

    /// The box count is zero.
    #[error("box count must be greater than zero")]
    NoQuantity,

    /// The product has colors but none was selected.
    #[error("color selection is required")]
    ColorRequired,

    /// The product has sizes but none was selected.
    #[error("size selection is required")]
    SizeRequired,

    /// The product has thicknesses but none was selected.
    #[error("thickness selection is required")]
    ThicknessRequired,
}

/// Selection state for one catalog row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowState {
    /// Selected size, if any.
    pub size: Option<String>,

    /// Selected thickness, if any.
    pub thickness: Option<String>,

    /// Selected color, if any.
    pub color: Option<String>,

    boxes: u32,
}

impl RowState {
    /// Current box count.
    #[must_use]
    pub fn boxes(&self) -> u32 {
        self.boxes
    }

    /// Set the box count from raw input, clamping negatives to zero.
    ///
    /// The clamp lives here at the input boundary so the store itself never
    /// sees an out-of-range count.
    pub fn set_boxes(&mut self, boxes: i64) {
        self.boxes = u32::try_from(boxes.max(0)).unwrap_or(u32::MAX);
    }

    /// Stepper increment, saturating.
    pub fn step_up(&mut self) {
        self.boxes = self.boxes.saturating_add(1);
    }

    /// Stepper decrement, stopping at zero.
    pub fn step_down(&mut self) {
        self.boxes = self.boxes.saturating_sub(1);
    }
}

/// Per-product row states, created lazily on first interaction.
#[derive(Debug, Default)]
pub struct RowStates {
    rows: SecondaryMap<ProductKey, RowState>,
}

impl RowStates {
    /// Create an empty state set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The state for a row, if it has been touched.
    #[must_use]
    pub fn state(&self, key: ProductKey) -> Option<&RowState> {
        self.rows.get(key)
    }

    /// The state for a row, created empty on first touch.
    ///
    /// Returns `None` only for a key no slot map ever issued (null or long
    /// since recycled).
    pub fn state_mut(&mut self, key: ProductKey) -> Option<&mut RowState> {
        self.rows
            .entry(key)
            .map(|entry| entry.or_insert_with(RowState::default))
    }

    /// Validate a row and commit it to the cart.
    ///
    /// The gate in front of the store: the box count must be positive, and a
    /// color, size or thickness must be selected whenever the product defines
    /// a non-empty list for that axis. On failure nothing is created or
    /// updated and no subscriber fires. On success the fully-populated line
    /// is upserted and the row's box count resets for the next entry; the
    /// selections stay put.
    ///
    /// # Errors
    ///
    /// Returns the [`RowError`] for the first failed check.
    pub fn commit(
        &mut self,
        catalog: &Catalog,
        key: ProductKey,
        cart: &mut Cart,
    ) -> Result<VariantKey, RowError> {
        let product = catalog.get(key).ok_or(RowError::UnknownProduct)?;
        let row = self.rows.get(key).cloned().unwrap_or_default();

        if row.boxes == 0 {
            return Err(RowError::NoQuantity);
        }

        if !product.colors.is_empty() && row.color.is_none() {
            return Err(RowError::ColorRequired);
        }

        if !product.sizes.is_empty() && row.size.is_none() {
            return Err(RowError::SizeRequired);
        }

        if !product.thicknesses.is_empty() && row.thickness.is_none() {
            return Err(RowError::ThicknessRequired);
        }

        let item = CartItem::from_product(
            product,
            row.color.as_deref(),
            row.size.as_deref(),
            row.thickness.as_deref(),
            row.boxes,
        );

        let variant = cart.upsert(item);

        if let Some(state) = self.rows.get_mut(key) {
            state.boxes = 0;
        }

        debug!(product = %product.id, variant = %variant, "row committed");

        Ok(variant)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;
    use crate::catalog::Product;

    fn catalog_with_tile() -> (Catalog, ProductKey) {
        let mut catalog = Catalog::new();

        let key = catalog.insert(Product {
            id: "P-1001".to_string(),
            sku: "TIL-ICE-6060".to_string(),
            name: "Porcelain Tile Ice".to_string(),
            category: "Tiles".to_string(),
            sub: "Porcelain".to_string(),
            sizes: smallvec!["60x60".to_string(), "60x120".to_string()],
            thicknesses: smallvec!["9mm".to_string()],
            colors: smallvec!["Ice White".to_string(), "Storm Grey".to_string()],
            pcs_per_box: 10,
            box_kg: Decimal::from(5),
            box_m3: Decimal::new(1, 1),
            thumbnail: None,
        });

        (catalog, key)
    }

    fn catalog_with_bulk_bag() -> (Catalog, ProductKey) {
        let mut catalog = Catalog::new();

        let key = catalog.insert(Product {
            id: "P-2001".to_string(),
            sku: "SAND-25".to_string(),
            name: "Kiln Dried Sand".to_string(),
            category: "Aggregates".to_string(),
            sub: String::new(),
            sizes: smallvec![],
            thicknesses: smallvec![],
            colors: smallvec![],
            pcs_per_box: 1,
            box_kg: Decimal::from(25),
            box_m3: Decimal::new(2, 2),
            thumbnail: None,
        });

        (catalog, key)
    }

    fn select_all(rows: &mut RowStates, key: ProductKey, boxes: i64) -> TestResult {
        let state = rows.state_mut(key).ok_or("missing row")?;

        state.color = Some("Ice White".to_string());
        state.size = Some("60x60".to_string());
        state.thickness = Some("9mm".to_string());
        state.set_boxes(boxes);

        Ok(())
    }

    #[test]
    fn set_boxes_clamps_negative_input_to_zero() {
        let mut state = RowState::default();

        state.set_boxes(-5);
        assert_eq!(state.boxes(), 0);

        state.set_boxes(12);
        assert_eq!(state.boxes(), 12);
    }

    #[test]
    fn steppers_saturate_at_both_ends() {
        let mut state = RowState::default();

        state.step_down();
        assert_eq!(state.boxes(), 0, "decrement stops at zero");

        state.step_up();
        state.step_up();
        assert_eq!(state.boxes(), 2);
    }

    #[test]
    fn commit_requires_a_positive_box_count() -> TestResult {
        let (catalog, key) = catalog_with_tile();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        select_all(&mut rows, key, 0)?;

        assert_eq!(rows.commit(&catalog, key, &mut cart), Err(RowError::NoQuantity));
        assert!(cart.is_empty(), "failed commits never touch the cart");

        Ok(())
    }

    #[test]
    fn commit_requires_each_defined_axis() -> TestResult {
        let (catalog, key) = catalog_with_tile();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        rows.state_mut(key).ok_or("missing row")?.set_boxes(3);
        assert_eq!(rows.commit(&catalog, key, &mut cart), Err(RowError::ColorRequired));

        rows.state_mut(key).ok_or("missing row")?.color = Some("Ice White".to_string());
        assert_eq!(rows.commit(&catalog, key, &mut cart), Err(RowError::SizeRequired));

        rows.state_mut(key).ok_or("missing row")?.size = Some("60x60".to_string());
        assert_eq!(rows.commit(&catalog, key, &mut cart), Err(RowError::ThicknessRequired));

        assert!(cart.is_empty(), "no partial selection may reach the cart");

        Ok(())
    }

    #[test]
    fn products_without_axes_need_only_a_quantity() -> TestResult {
        let (catalog, key) = catalog_with_bulk_bag();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        rows.state_mut(key).ok_or("missing row")?.set_boxes(4);

        let variant = rows.commit(&catalog, key, &mut cart)?;

        assert_eq!(cart.get(&variant).map(|item| item.qty_boxes), Some(4));
        assert_eq!(cart.totals().kg, Decimal::from(100));

        Ok(())
    }

    #[test]
    fn successful_commit_upserts_and_resets_the_count() -> TestResult {
        let (catalog, key) = catalog_with_tile();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        select_all(&mut rows, key, 3)?;

        let variant = rows.commit(&catalog, key, &mut cart)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&variant).map(|item| item.qty_boxes), Some(3));

        let state = rows.state(key).ok_or("missing row")?;

        assert_eq!(state.boxes(), 0, "count resets for the next entry");
        assert_eq!(state.color.as_deref(), Some("Ice White"), "selections stay put");

        Ok(())
    }

    #[test]
    fn recommitting_the_same_selection_replaces_the_line() -> TestResult {
        let (catalog, key) = catalog_with_tile();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        select_all(&mut rows, key, 3)?;
        rows.commit(&catalog, key, &mut cart)?;

        select_all(&mut rows, key, 7)?;
        rows.commit(&catalog, key, &mut cart)?;

        assert_eq!(cart.len(), 1, "same variant replaces, never duplicates");
        assert_eq!(cart.totals().boxes, 7);

        Ok(())
    }

    #[test]
    fn different_selections_commit_as_separate_lines() -> TestResult {
        let (catalog, key) = catalog_with_tile();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        select_all(&mut rows, key, 2)?;
        rows.commit(&catalog, key, &mut cart)?;

        select_all(&mut rows, key, 5)?;
        rows.state_mut(key).ok_or("missing row")?.color = Some("Storm Grey".to_string());
        rows.commit(&catalog, key, &mut cart)?;

        assert_eq!(cart.len(), 2, "a different color is a different variant");
        assert_eq!(cart.totals().boxes, 7);

        Ok(())
    }

    #[test]
    fn commit_rejects_stale_product_keys() {
        let (catalog, _key) = catalog_with_tile();
        let mut rows = RowStates::new();
        let mut cart = Cart::new();

        let result = rows.commit(&catalog, ProductKey::default(), &mut cart);

        assert_eq!(result, Err(RowError::UnknownProduct));
    }
}
