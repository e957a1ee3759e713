//! Cart
//!
//! The session-scoped order cart: committed lines keyed by variant, plus the
//! subscriber set the row grid, panel and exports observe. Construct one per
//! session and hand it by reference to whatever needs it; mutations are
//! synchronous and every applied mutation notifies every subscriber with the
//! full current line list.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::{
    catalog::Product,
    totals::{Totals, cart_totals},
    variant::VariantKey,
};

new_key_type! {
    /// Subscriber Key
    pub struct SubscriberKey;
}

/// Callback invoked with the full current line list after every applied
/// mutation. Never a diff.
type Subscriber = Box<dyn FnMut(&[CartItem])>;

/// A committed order line.
///
/// Denormalized from the product at commit time, so lines keep rendering and
/// exporting correctly even if the catalog is refreshed underneath them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Line identity; a cart holds at most one line per distinct key.
    pub variant: VariantKey,

    /// External product id.
    pub product_id: String,

    /// Stock-keeping unit.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Top-level category name.
    pub category: String,

    /// Subcategory name.
    pub sub: String,

    /// Selected color, when the product has a color axis.
    pub color: Option<String>,

    /// Selected size, when the product has a size axis.
    pub size: Option<String>,

    /// Selected thickness, when the product has a thickness axis.
    pub thickness: Option<String>,

    /// Ordered boxes.
    pub qty_boxes: u32,

    /// Pieces per box.
    pub pcs_per_box: u32,

    /// Weight of one box in kilograms.
    pub box_kg: Decimal,

    /// Volume of one box in cubic metres.
    pub box_m3: Decimal,

    /// Optional image reference.
    pub thumbnail: Option<String>,

    /// When the line was first committed.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Build a line from a catalog product and a validated selection.
    #[must_use]
    pub fn from_product(
        product: &Product,
        color: Option<&str>,
        size: Option<&str>,
        thickness: Option<&str>,
        qty_boxes: u32,
    ) -> Self {
        CartItem {
            variant: VariantKey::build(&product.id, color, size, thickness),
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            sub: product.sub.clone(),
            color: color.map(ToString::to_string),
            size: size.map(ToString::to_string),
            thickness: thickness.map(ToString::to_string),
            qty_boxes,
            pcs_per_box: product.pcs_per_box,
            box_kg: product.box_kg,
            box_m3: product.box_m3,
            thumbnail: product.thumbnail.clone(),
            added_at: Utc::now(),
        }
    }

    /// Pieces on this line.
    #[must_use]
    pub fn total_pcs(&self) -> u64 {
        u64::from(self.qty_boxes).saturating_mul(u64::from(self.pcs_per_box))
    }

    /// Weight of this line in kilograms.
    #[must_use]
    pub fn total_kg(&self) -> Decimal {
        self.box_kg.saturating_mul(Decimal::from(self.qty_boxes))
    }

    /// Volume of this line in cubic metres.
    #[must_use]
    pub fn total_m3(&self) -> Decimal {
        self.box_m3.saturating_mul(Decimal::from(self.qty_boxes))
    }
}

/// Quantity patch for [`Cart::update`].
///
/// Identity fields are deliberately absent: a different selection produces a
/// different variant key, and therefore a different line, never an edit of
/// this one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartItemPatch {
    /// New box count; `None` leaves the current count untouched.
    pub qty_boxes: Option<u32>,
}

impl CartItemPatch {
    /// Patch that sets the box count.
    #[must_use]
    pub fn qty(qty_boxes: u32) -> Self {
        CartItemPatch {
            qty_boxes: Some(qty_boxes),
        }
    }
}

/// Session-scoped cart store.
///
/// Owns the committed lines and the subscriber set. Single-threaded by
/// construction; callers that need the cart in two places share it the usual
/// ways (`&mut` scopes or `Rc<RefCell<..>>`), not through a global.
#[derive(Default)]
pub struct Cart {
    items: Vec<CartItem>,
    subscribers: SlotMap<SubscriberKey, Subscriber>,
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Cart {
    /// Create an empty cart with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by its variant key.
    #[must_use]
    pub fn get(&self, variant: &VariantKey) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.variant == variant)
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals for the current lines.
    #[must_use]
    pub fn totals(&self) -> Totals {
        cart_totals(&self.items)
    }

    /// Insert a line, or replace the box count of the line already carrying
    /// the same variant key.
    ///
    /// Replacement is last-write, not additive: committing the same variant
    /// twice leaves the second commit's quantity. The original line keeps its
    /// position and added-at time. Notifies subscribers.
    pub fn upsert(&mut self, item: CartItem) -> VariantKey {
        let variant = item.variant.clone();

        match self
            .items
            .iter_mut()
            .find(|existing| existing.variant == variant)
        {
            Some(existing) => {
                existing.qty_boxes = item.qty_boxes;
                debug!(variant = %variant, qty_boxes = existing.qty_boxes, "cart line replaced");
            }
            None => {
                debug!(variant = %variant, qty_boxes = item.qty_boxes, "cart line added");
                self.items.push(item);
            }
        }

        self.notify();

        variant
    }

    /// Merge a patch into the line with the given key.
    ///
    /// Returns `false`, and notifies nobody, when no line carries the key:
    /// operations on unknown keys are silent no-ops, not errors.
    pub fn update(&mut self, variant: &VariantKey, patch: CartItemPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.variant == variant) else {
            return false;
        };

        if let Some(qty_boxes) = patch.qty_boxes {
            item.qty_boxes = qty_boxes;
        }

        debug!(variant = %variant, "cart line updated");
        self.notify();

        true
    }

    /// Remove the line with the given key.
    ///
    /// Returns `false`, and notifies nobody, when no line carries the key.
    pub fn remove(&mut self, variant: &VariantKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.variant != variant);

        if self.items.len() == before {
            return false;
        }

        debug!(variant = %variant, "cart line removed");
        self.notify();

        true
    }

    /// Drop every line. Notifies subscribers unless the cart was already
    /// empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }

        self.items.clear();
        debug!("cart cleared");
        self.notify();
    }

    /// Register a mutation listener.
    ///
    /// The callback receives the full current line list after every applied
    /// mutation. Registration itself does not invoke it; multiple listeners
    /// may be active at once.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&[CartItem]) + 'static) -> SubscriberKey {
        self.subscribers.insert(Box::new(subscriber))
    }

    /// Remove a listener. Returns `false` when the key was already gone.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        self.subscribers.remove(key).is_some()
    }

    fn notify(&mut self) {
        for subscriber in self.subscribers.values_mut() {
            subscriber(&self.items);
        }
    }
}
