//! Fixtures
//!
//! YAML fixture sets for demos and integration tests: a product catalog, a
//! container list, and an order script that is replayed through the row-state
//! gate exactly the way an operator would enter it.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{Catalog, Product, ProductKey},
    containers::ContainerSpec,
    fixtures::{
        containers::ContainersFixture,
        orders::{OrderFixture, OrderLineFixture},
        products::ProductsFixture,
    },
    rows::{RowError, RowStates},
};

pub mod containers;
pub mod orders;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid quantity format
    #[error("Invalid quantity format: {0}")]
    InvalidQuantity(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Container not found
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    /// No order lines loaded
    #[error("No order lines loaded; cannot fill a cart")]
    NoOrderLines,

    /// Not enough order lines in fixture
    #[error("Not enough order lines in fixture, available: {available}, requested: {requested}")]
    NotEnoughLines {
        /// Number of lines defined in the fixture
        available: usize,
        /// Number of lines requested
        requested: usize,
    },

    /// An order line failed row validation
    #[error("Order line for '{product}' failed validation: {source}")]
    InvalidOrderLine {
        /// Product ref of the failing line
        product: String,
        /// The row validation error
        source: RowError,
    },
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded products
    catalog: Catalog,

    /// String ref -> catalog key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Loaded container specs, in fixture order
    containers: Vec<ContainerSpec>,

    /// Loaded order lines, in fixture order
    order_lines: Vec<OrderLineFixture>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            product_keys: FxHashMap::default(),
            containers: Vec::new(),
            order_lines: Vec::new(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// quantity string is malformed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product: Product = product_fixture.try_into()?;
            let product_key = self.catalog.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load container specs from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// capacity string is malformed.
    pub fn load_containers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("containers")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: ContainersFixture = serde_norway::from_str(&contents)?;

        for container_fixture in fixture.containers {
            self.containers.push(container_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Load an order script from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrderFixture = serde_norway::from_str(&contents)?;

        self.order_lines.extend(fixture.lines);

        Ok(self)
    }

    /// Load a complete fixture set (products, containers and orders sharing
    /// one name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_containers(name)?
            .load_orders(name)?;

        Ok(fixture)
    }

    /// The catalog built from the loaded products
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a product by its fixture ref
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        let product_key = self.product_key(key)?;

        self.catalog
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a catalog key by its fixture ref
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// All loaded container specs
    #[must_use]
    pub fn containers(&self) -> &[ContainerSpec] {
        &self.containers
    }

    /// Get a container spec by its short code
    ///
    /// # Errors
    ///
    /// Returns an error if no loaded container carries the code.
    pub fn container(&self, code: &str) -> Result<&ContainerSpec, FixtureError> {
        self.containers
            .iter()
            .find(|spec| spec.code == code)
            .ok_or_else(|| FixtureError::ContainerNotFound(code.to_string()))
    }

    /// All loaded order lines
    #[must_use]
    pub fn order_lines(&self) -> &[OrderLineFixture] {
        &self.order_lines
    }

    /// Replay the loaded order lines through the row-state gate into a fresh
    /// cart.
    ///
    /// Each line selects its options, sets its box count and commits exactly
    /// as an operator would; the returned row states keep the selections the
    /// replay left behind.
    ///
    /// # Errors
    ///
    /// Returns an error if no lines are loaded, more lines are requested than
    /// exist, a line references an unknown product, or a line fails row
    /// validation.
    pub fn fill_cart(&self, n: Option<usize>) -> Result<(Cart, RowStates), FixtureError> {
        if self.order_lines.is_empty() {
            return Err(FixtureError::NoOrderLines);
        }

        if let Some(n) = n
            && n > self.order_lines.len()
        {
            return Err(FixtureError::NotEnoughLines {
                available: self.order_lines.len(),
                requested: n,
            });
        }

        let mut cart = Cart::new();
        let mut rows = RowStates::new();
        let count = n.unwrap_or(self.order_lines.len());

        for line in self.order_lines.iter().take(count) {
            let key = self.product_key(&line.product)?;

            let state = rows
                .state_mut(key)
                .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

            state.color = line.color.clone();
            state.size = line.size.clone();
            state.thickness = line.thickness.clone();
            state.set_boxes(i64::from(line.boxes));

            rows.commit(&self.catalog, key, &mut cart)
                .map_err(|source| FixtureError::InvalidOrderLine {
                    product: line.product.clone(),
                    source,
                })?;
        }

        Ok((cart, rows))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
