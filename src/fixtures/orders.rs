//! Order Fixtures

use serde::Deserialize;

/// Wrapper for an order script in YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Lines to replay through the row-state gate, in order
    pub lines: Vec<OrderLineFixture>,
}

/// Order Line Fixture
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineFixture {
    /// Product ref (key into the products fixture)
    pub product: String,

    /// Color selection
    #[serde(default)]
    pub color: Option<String>,

    /// Size selection
    #[serde(default)]
    pub size: Option<String>,

    /// Thickness selection
    #[serde(default)]
    pub thickness: Option<String>,

    /// Boxes to order
    pub boxes: u32,
}
