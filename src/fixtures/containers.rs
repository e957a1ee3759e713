//! Container Fixtures

use serde::Deserialize;

use crate::{
    containers::ContainerSpec,
    fixtures::{FixtureError, products::parse_quantity},
};

/// Wrapper for container specs in YAML
#[derive(Debug, Deserialize)]
pub struct ContainersFixture {
    /// Container specs, smallest first
    pub containers: Vec<ContainerFixture>,
}

/// Container Fixture
#[derive(Debug, Deserialize)]
pub struct ContainerFixture {
    /// Short code ("20", "40")
    pub code: String,

    /// Display label
    pub label: String,

    /// Payload weight capacity (e.g., "28000 kg")
    pub capacity_kg: String,

    /// Payload volume capacity (e.g., "68 m3")
    pub capacity_m3: String,
}

impl TryFrom<ContainerFixture> for ContainerSpec {
    type Error = FixtureError;

    fn try_from(fixture: ContainerFixture) -> Result<Self, Self::Error> {
        let capacity_kg = parse_quantity(&fixture.capacity_kg, "kg")?;
        let capacity_m3 = parse_quantity(&fixture.capacity_m3, "m3")?;

        Ok(ContainerSpec {
            code: fixture.code,
            label: fixture.label,
            capacity_kg,
            capacity_m3,
        })
    }
}
