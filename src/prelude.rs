//! Pallet prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartItem, CartItemPatch, SubscriberKey},
    catalog::{
        Catalog, Category, Product, ProductKey,
        ingest::{Ingest, IngestError, IngestWarning, WarningKind, parse_categories, parse_products},
    },
    containers::{ContainerFit, ContainerSpec, pct},
    export::{ExportError, OrderRow, csv::write_order, document::render_order},
    fixtures::{Fixture, FixtureError},
    rows::{RowError, RowState, RowStates},
    summary::{OrderSummary, SummaryError},
    totals::{Totals, cart_totals},
    variant::VariantKey,
};
