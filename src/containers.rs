//! Containers
//!
//! Shipping-container payload specs and the bounded fill arithmetic behind
//! the order summary's capacity gauges.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::totals::Totals;

/// Bounded percent points from a part/whole ratio.
///
/// `round(100 * part / whole)`, half away from zero, clamped to `[0, 100]`.
/// Returns 0 whenever `whole` or `part` is zero or negative: a fill gauge
/// must never divide by zero or escape its bounds, whatever the inputs.
#[must_use]
pub fn pct(part: Decimal, whole: Decimal) -> u8 {
    bounded_points(ratio(part, whole))
}

/// Raw part/whole ratio, 0 when either side is unusable.
fn ratio(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO || part <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    part / whole
}

/// Converts a fill ratio to clamped percent points for display.
fn bounded_points(ratio: Decimal) -> u8 {
    let points = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if points <= Decimal::ZERO {
        return 0;
    }

    points.to_u8().map_or(100, |points| points.min(100))
}

/// A named shipping container and its payload capacities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Short code ("20", "40").
    pub code: String,

    /// Display label.
    pub label: String,

    /// Maximum payload weight in kilograms.
    pub capacity_kg: Decimal,

    /// Maximum payload volume in cubic metres.
    pub capacity_m3: Decimal,
}

impl ContainerSpec {
    /// The stock 20-foot container.
    #[must_use]
    pub fn twenty_foot() -> Self {
        ContainerSpec {
            code: "20".to_string(),
            label: "20' Container".to_string(),
            capacity_kg: Decimal::from(28_000),
            capacity_m3: Decimal::from(33),
        }
    }

    /// The stock 40-foot container.
    #[must_use]
    pub fn forty_foot() -> Self {
        ContainerSpec {
            code: "40".to_string(),
            label: "40' Container".to_string(),
            capacity_kg: Decimal::from(28_000),
            capacity_m3: Decimal::from(68),
        }
    }

    /// Look up a stock container by its short code.
    #[must_use]
    pub fn builtin(code: &str) -> Option<Self> {
        match code {
            "20" => Some(Self::twenty_foot()),
            "40" => Some(Self::forty_foot()),
            _ => None,
        }
    }

    /// Both stock containers, smallest first.
    #[must_use]
    pub fn builtins() -> [Self; 2] {
        [Self::twenty_foot(), Self::forty_foot()]
    }

    /// Gauge aggregated totals against this container's capacities.
    #[must_use]
    pub fn fit(&self, totals: &Totals) -> ContainerFit {
        let kg_ratio = ratio(totals.kg, self.capacity_kg);
        let m3_ratio = ratio(totals.m3, self.capacity_m3);

        ContainerFit {
            kg_percent: bounded_points(kg_ratio),
            m3_percent: bounded_points(m3_ratio),
            kg_fill: Percentage::from(kg_ratio),
            m3_fill: Percentage::from(m3_ratio),
        }
    }
}

/// How much of one container the current totals consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerFit {
    /// Weight fill as an unbounded fraction (1.0 is exactly full; overweight
    /// orders exceed it).
    pub kg_fill: Percentage,

    /// Volume fill as an unbounded fraction.
    pub m3_fill: Percentage,

    /// Weight fill in clamped percent points, ready for a gauge.
    pub kg_percent: u8,

    /// Volume fill in clamped percent points, ready for a gauge.
    pub m3_percent: u8,
}

impl ContainerFit {
    /// Whether either axis is at or beyond capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.kg_percent >= 100 || self.m3_percent >= 100
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn pct_is_zero_for_unusable_inputs() {
        assert_eq!(pct(Decimal::from(10), Decimal::ZERO), 0, "zero capacity never divides");
        assert_eq!(pct(Decimal::from(10), Decimal::from(-5)), 0);
        assert_eq!(pct(Decimal::ZERO, Decimal::from(100)), 0);
        assert_eq!(pct(Decimal::from(-3), Decimal::from(100)), 0);
    }

    #[test]
    fn pct_rounds_half_away_from_zero() {
        assert_eq!(pct(Decimal::from(1), Decimal::from(200)), 1, "0.5 rounds up");
        assert_eq!(pct(Decimal::from(1), Decimal::from(250)), 0, "0.4 rounds down");
        assert_eq!(pct(Decimal::from(1), Decimal::from(8)), 13, "12.5 rounds up");
    }

    #[test]
    fn pct_clamps_to_one_hundred() {
        assert_eq!(pct(Decimal::from(150), Decimal::from(100)), 100);
        assert_eq!(pct(Decimal::from(1_000_000), Decimal::from(1)), 100);
        assert_eq!(pct(Decimal::from(100), Decimal::from(100)), 100);
    }

    #[test]
    fn tiny_orders_round_down_to_zero() -> TestResult {
        // 15 kg and 0.3 m3 in a 40' container are both well under half a point.
        assert_eq!(pct(Decimal::from(15), Decimal::from(28_000)), 0);
        assert_eq!(pct("0.3".parse()?, Decimal::from(68)), 0);

        Ok(())
    }

    #[test]
    fn builtin_lookup_knows_both_stock_containers() {
        let twenty = ContainerSpec::builtin("20");
        let forty = ContainerSpec::builtin("40");

        assert_eq!(twenty, Some(ContainerSpec::twenty_foot()));
        assert_eq!(forty, Some(ContainerSpec::forty_foot()));
        assert_eq!(ContainerSpec::builtin("53"), None);
        assert_eq!(ContainerSpec::builtins().len(), 2);
    }

    #[test]
    fn fit_gauges_both_axes_independently() -> TestResult {
        let totals = Totals {
            boxes: 3,
            pcs: 30,
            kg: Decimal::from(14_000),
            m3: "16.5".parse()?,
        };

        let fit = ContainerSpec::twenty_foot().fit(&totals);

        assert_eq!(fit.kg_percent, 50);
        assert_eq!(fit.m3_percent, 50);
        assert_eq!(fit.kg_fill, Percentage::from(0.5));
        assert!(!fit.is_full());

        Ok(())
    }

    #[test]
    fn overweight_orders_report_full() -> TestResult {
        let totals = Totals {
            boxes: 10_000,
            pcs: 10_000,
            kg: Decimal::from(56_000),
            m3: "1.0".parse()?,
        };

        let fit = ContainerSpec::forty_foot().fit(&totals);

        assert_eq!(fit.kg_percent, 100, "200% clamps to 100");
        assert_eq!(fit.m3_percent, 1);
        assert!(fit.is_full());

        Ok(())
    }

    #[test]
    fn empty_totals_gauge_to_zero() {
        let fit = ContainerSpec::forty_foot().fit(&Totals::default());

        assert_eq!(fit.kg_percent, 0);
        assert_eq!(fit.m3_percent, 0);
        assert_eq!(fit.kg_fill, Percentage::from(0.0));
    }
}
