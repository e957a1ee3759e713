//! Pallet
//!
//! Pallet is a cart and order-aggregation engine for wholesale building-materials catalogs: variant-keyed cart lines, box/weight/volume rollups, container-fill gauges and order exports.

pub mod cart;
pub mod catalog;
pub mod containers;
pub mod export;
pub mod fixtures;
pub mod prelude;
pub mod rows;
pub mod summary;
pub mod totals;
pub mod utils;
pub mod variant;
