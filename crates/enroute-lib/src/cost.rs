//! Energy-to-cost inference.
//!
//! A [`CostFunction`] maps the residual energies of an edge's endpoints to the
//! routing cost stored on that edge. Higher energy means a cheaper edge, so
//! least-cost paths prefer well-charged nodes.
//!
//! Two implementations ship with the crate:
//!
//! - [`CostTable`] - the reference step table evaluated as a first-match
//!   cascade over the average energy.
//! - [`FuzzyCost`] - a zero-order Takagi-Sugeno inference over low, medium and
//!   high energy bands.
//!
//! Any `Fn(f64, f64) -> f64 + Send + Sync` closure is also a cost function.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

/// Pure, deterministic mapping from a pair of energies to a routing cost.
///
/// Implementations must be total: every pair of inputs, including negative
/// energies, yields a defined value. Output should not increase as the
/// average of the two energies increases.
pub trait CostFunction: Send + Sync {
    /// Cost of an edge whose endpoints hold `energy_a` and `energy_b`.
    fn derive_cost(&self, energy_a: f64, energy_b: f64) -> f64;

    /// Short label used in logs and reports.
    fn label(&self) -> &'static str {
        "custom"
    }
}

impl<F> CostFunction for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn derive_cost(&self, energy_a: f64, energy_b: f64) -> f64 {
        self(energy_a, energy_b)
    }
}

fn average(energy_a: f64, energy_b: f64) -> f64 {
    (energy_a + energy_b) / 2.0
}

/// One row of a [`CostTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBand {
    /// Lower bound on the average energy for this band.
    pub threshold: f64,
    /// Whether an average equal to `threshold` belongs to this band.
    pub inclusive: bool,
    /// Cost assigned when the band matches.
    pub cost: f64,
}

impl CostBand {
    pub const fn at_least(threshold: f64, cost: f64) -> Self {
        Self {
            threshold,
            inclusive: true,
            cost,
        }
    }

    pub const fn above(threshold: f64, cost: f64) -> Self {
        Self {
            threshold,
            inclusive: false,
            cost,
        }
    }

    fn matches(&self, avg: f64) -> bool {
        if self.inclusive {
            avg >= self.threshold
        } else {
            avg > self.threshold
        }
    }
}

/// Step table evaluated from the highest energy band to the lowest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostTable {
    bands: Vec<CostBand>,
    fallback: f64,
}

/// Cost used by the default table when no band matches (average energy at or
/// below zero, or not a number).
pub const WORST_COST: f64 = 100.0;

impl Default for CostTable {
    fn default() -> Self {
        Self {
            bands: vec![
                CostBand::at_least(90.0, 10.0),
                CostBand::at_least(80.0, 20.0),
                CostBand::at_least(70.0, 30.0),
                CostBand::at_least(60.0, 40.0),
                CostBand::at_least(50.0, 50.0),
                CostBand::above(20.0, 80.0),
                CostBand::above(0.0, WORST_COST),
            ],
            fallback: WORST_COST,
        }
    }
}

impl CostTable {
    /// Build a custom table.
    ///
    /// Bands must be ordered by strictly decreasing threshold with
    /// non-decreasing cost, and `fallback` must be at least the last band's
    /// cost. All costs must be finite and non-negative.
    pub fn new(bands: Vec<CostBand>, fallback: f64) -> Result<Self> {
        if bands.is_empty() {
            return Err(Error::InvalidCostTable {
                message: "table must contain at least one band".to_string(),
            });
        }

        for band in &bands {
            if !band.threshold.is_finite() {
                return Err(Error::InvalidCostTable {
                    message: format!("threshold {} is not finite", band.threshold),
                });
            }
        }

        for cost in bands.iter().map(|band| band.cost).chain([fallback]) {
            if !cost.is_finite() || cost < 0.0 {
                return Err(Error::InvalidCostTable {
                    message: format!("cost {cost} must be finite and non-negative"),
                });
            }
        }

        for pair in bands.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                return Err(Error::InvalidCostTable {
                    message: format!(
                        "threshold {} must be below preceding threshold {}",
                        pair[1].threshold, pair[0].threshold
                    ),
                });
            }
            if pair[1].cost < pair[0].cost {
                return Err(Error::InvalidCostTable {
                    message: format!(
                        "cost {} for threshold {} is lower than cost {} of a higher band",
                        pair[1].cost, pair[1].threshold, pair[0].cost
                    ),
                });
            }
        }

        let last = bands[bands.len() - 1].cost;
        if fallback < last {
            return Err(Error::InvalidCostTable {
                message: format!("fallback {fallback} is lower than last band cost {last}"),
            });
        }

        Ok(Self { bands, fallback })
    }

    pub fn bands(&self) -> &[CostBand] {
        &self.bands
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Cost for a given average energy.
    pub fn cost_for_average(&self, avg: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| band.matches(avg))
            .map(|band| band.cost)
            .unwrap_or(self.fallback)
    }
}

impl CostFunction for CostTable {
    fn derive_cost(&self, energy_a: f64, energy_b: f64) -> f64 {
        self.cost_for_average(average(energy_a, energy_b))
    }

    fn label(&self) -> &'static str {
        "table"
    }
}

/// Degree of membership of an average energy in each band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyMemberships {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Fuzzy inference over three energy bands.
///
/// `low` is a left shoulder (full membership up to `lower`, none from
/// `centre`), `medium` a triangle over `lower..upper` peaking at `centre`, and
/// `high` a right shoulder (none up to `centre`, full from `upper`). The three
/// memberships sum to one everywhere, so the weighted average of the rule
/// outputs is defined for every input and never rises with energy as long as
/// `low_weight >= medium_weight >= high_weight`, which [`FuzzyCost::new`]
/// enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuzzyCost {
    lower: f64,
    centre: f64,
    upper: f64,
    /// Output weight of the rule "energy is low".
    low_weight: f64,
    /// Output weight of the rule "energy is medium".
    medium_weight: f64,
    /// Output weight of the rule "energy is high".
    high_weight: f64,
}

impl Default for FuzzyCost {
    fn default() -> Self {
        Self {
            lower: 25.0,
            centre: 50.0,
            upper: 75.0,
            low_weight: 100.0,
            medium_weight: 50.0,
            high_weight: 10.0,
        }
    }
}

impl FuzzyCost {
    /// Build a custom controller.
    ///
    /// `breakpoints` are `[lower, centre, upper]` and must be finite and
    /// strictly increasing. `weights` are the rule outputs for low, medium and
    /// high energy; they must be finite, non-negative and non-increasing.
    pub fn new(breakpoints: [f64; 3], weights: [f64; 3]) -> Result<Self> {
        let [lower, centre, upper] = breakpoints;
        if breakpoints.iter().any(|value| !value.is_finite()) {
            return Err(Error::InvalidCostTable {
                message: format!("fuzzy breakpoints {breakpoints:?} must be finite"),
            });
        }
        if !(lower < centre && centre < upper) {
            return Err(Error::InvalidCostTable {
                message: format!(
                    "fuzzy breakpoints must increase strictly, got {lower}, {centre}, {upper}"
                ),
            });
        }

        let [low_weight, medium_weight, high_weight] = weights;
        for weight in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidCostTable {
                    message: format!("fuzzy weight {weight} must be finite and non-negative"),
                });
            }
        }
        if low_weight < medium_weight || medium_weight < high_weight {
            return Err(Error::InvalidCostTable {
                message: format!(
                    "fuzzy weights must not rise with energy, got {low_weight}, {medium_weight}, {high_weight}"
                ),
            });
        }

        Ok(Self {
            lower,
            centre,
            upper,
            low_weight,
            medium_weight,
            high_weight,
        })
    }

    /// Band breakpoints as `[lower, centre, upper]`.
    pub fn breakpoints(&self) -> [f64; 3] {
        [self.lower, self.centre, self.upper]
    }

    /// Rule outputs for low, medium and high energy.
    pub fn weights(&self) -> [f64; 3] {
        [self.low_weight, self.medium_weight, self.high_weight]
    }

    /// Evaluate the three band memberships for `avg`.
    pub fn memberships(&self, avg: f64) -> EnergyMemberships {
        EnergyMemberships {
            low: left_shoulder(avg, self.lower, self.centre),
            medium: triangular(avg, self.lower, self.centre, self.upper),
            high: right_shoulder(avg, self.centre, self.upper),
        }
    }

    /// Defuzzified cost for a given average energy.
    pub fn cost_for_average(&self, avg: f64) -> f64 {
        if avg.is_nan() {
            return self.low_weight;
        }

        let m = self.memberships(avg);
        let strength = m.low + m.medium + m.high;
        if strength <= 0.0 {
            return self.low_weight;
        }

        (m.low * self.low_weight + m.medium * self.medium_weight + m.high * self.high_weight)
            / strength
    }
}

impl CostFunction for FuzzyCost {
    fn derive_cost(&self, energy_a: f64, energy_b: f64) -> f64 {
        self.cost_for_average(average(energy_a, energy_b))
    }

    fn label(&self) -> &'static str {
        "fuzzy"
    }
}

fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= a || x >= c {
        0.0
    } else if x <= b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

fn left_shoulder(x: f64, full: f64, zero: f64) -> f64 {
    if x <= full {
        1.0
    } else if x >= zero {
        0.0
    } else {
        (zero - x) / (zero - full)
    }
}

fn right_shoulder(x: f64, zero: f64, full: f64) -> f64 {
    if x >= full {
        1.0
    } else if x <= zero {
        0.0
    } else {
        (x - zero) / (full - zero)
    }
}

/// Built-in cost functions selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Reference step table.
    #[default]
    Table,
    /// Three-band fuzzy inference.
    Fuzzy,
}

impl CostModel {
    pub fn build(self) -> Arc<dyn CostFunction> {
        match self {
            CostModel::Table => Arc::new(CostTable::default()),
            CostModel::Fuzzy => Arc::new(FuzzyCost::default()),
        }
    }
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CostModel::Table => "table",
            CostModel::Fuzzy => "fuzzy",
        };
        f.write_str(value)
    }
}

impl FromStr for CostModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "step" => Ok(CostModel::Table),
            "fuzzy" => Ok(CostModel::Fuzzy),
            other => Err(format!("unknown cost model '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_reference_bands() {
        let table = CostTable::default();
        let cases = [
            (95.0, 10.0),
            (90.0, 10.0),
            (89.9, 20.0),
            (80.0, 20.0),
            (70.0, 30.0),
            (60.0, 40.0),
            (50.0, 50.0),
            (49.0, 80.0),
            (20.5, 80.0),
            (20.0, 100.0),
            (0.1, 100.0),
        ];
        for (avg, expected) in cases {
            assert_eq!(table.cost_for_average(avg), expected, "avg {avg}");
        }
    }

    #[test]
    fn non_positive_average_falls_back_to_worst_cost() {
        let table = CostTable::default();
        assert_eq!(table.cost_for_average(0.0), WORST_COST);
        assert_eq!(table.cost_for_average(-40.0), WORST_COST);
        assert_eq!(table.cost_for_average(f64::NAN), WORST_COST);
        assert_eq!(table.derive_cost(-20.0, 10.0), WORST_COST);
    }

    #[test]
    fn derive_cost_uses_average_of_both_energies() {
        let table = CostTable::default();
        assert_eq!(table.derive_cost(80.0, 80.0), 20.0);
        assert_eq!(table.derive_cost(98.0, 60.0), 20.0);
        assert_eq!(table.derive_cost(40.0, 80.0), 40.0);
    }

    #[test]
    fn custom_table_rejects_non_monotone_costs() {
        let err = CostTable::new(
            vec![CostBand::at_least(50.0, 40.0), CostBand::at_least(10.0, 5.0)],
            100.0,
        )
        .expect_err("cost decreases with energy");
        assert!(err.to_string().contains("lower than cost"));
    }

    #[test]
    fn custom_table_rejects_unordered_thresholds() {
        let err = CostTable::new(
            vec![CostBand::at_least(10.0, 5.0), CostBand::at_least(50.0, 40.0)],
            100.0,
        )
        .expect_err("thresholds out of order");
        assert!(err.to_string().contains("must be below preceding threshold"));
    }

    #[test]
    fn custom_table_rejects_low_fallback_and_empty_bands() {
        assert!(CostTable::new(vec![CostBand::above(0.0, 10.0)], 5.0).is_err());
        assert!(CostTable::new(Vec::new(), 5.0).is_err());
    }

    #[test]
    fn custom_table_evaluates_bands() {
        let table = CostTable::new(
            vec![CostBand::at_least(50.0, 1.0), CostBand::above(0.0, 5.0)],
            9.0,
        )
        .expect("valid table");
        assert_eq!(table.derive_cost(60.0, 40.0), 1.0);
        assert_eq!(table.derive_cost(10.0, 10.0), 5.0);
        assert_eq!(table.derive_cost(0.0, 0.0), 9.0);
    }

    #[test]
    fn fuzzy_memberships_partition_unity() {
        let fuzzy = FuzzyCost::default();
        for avg in [-10.0, 0.0, 12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 99.0, 150.0] {
            let m = fuzzy.memberships(avg);
            assert!((m.low + m.medium + m.high - 1.0).abs() < 1e-12, "avg {avg}");
        }
    }

    #[test]
    fn fuzzy_cost_hits_rule_weights_at_band_cores() {
        let fuzzy = FuzzyCost::default();
        assert_eq!(fuzzy.cost_for_average(10.0), 100.0);
        assert_eq!(fuzzy.cost_for_average(50.0), 50.0);
        assert_eq!(fuzzy.cost_for_average(90.0), 10.0);
        assert_eq!(fuzzy.cost_for_average(37.5), 75.0);
        assert_eq!(fuzzy.cost_for_average(f64::NAN), 100.0);
    }

    #[test]
    fn fuzzy_new_rejects_rising_weights() {
        let err = FuzzyCost::new([25.0, 50.0, 75.0], [10.0, 50.0, 100.0])
            .expect_err("weights rise with energy");
        assert!(matches!(err, Error::InvalidCostTable { .. }));
        assert!(err.to_string().contains("must not rise"));
        assert!(FuzzyCost::new([25.0, 50.0, 75.0], [100.0, -1.0, -2.0]).is_err());
    }

    #[test]
    fn fuzzy_new_rejects_unordered_breakpoints() {
        assert!(FuzzyCost::new([50.0, 25.0, 75.0], [100.0, 50.0, 10.0]).is_err());
        assert!(FuzzyCost::new([25.0, 50.0, 50.0], [100.0, 50.0, 10.0]).is_err());
        assert!(FuzzyCost::new([f64::NAN, 50.0, 75.0], [100.0, 50.0, 10.0]).is_err());
    }

    #[test]
    fn fuzzy_new_builds_a_monotone_controller() {
        let fuzzy = FuzzyCost::new([0.0, 40.0, 80.0], [90.0, 30.0, 0.0]).expect("valid");
        assert_eq!(fuzzy.breakpoints(), [0.0, 40.0, 80.0]);
        assert_eq!(fuzzy.weights(), [90.0, 30.0, 0.0]);
        assert_eq!(fuzzy.cost_for_average(-5.0), 90.0);
        assert_eq!(fuzzy.cost_for_average(40.0), 30.0);
        assert_eq!(fuzzy.cost_for_average(100.0), 0.0);

        let mut previous = f64::INFINITY;
        for step in -10..=110 {
            let cost = fuzzy.cost_for_average(step as f64);
            assert!(cost <= previous + 1e-12, "cost rose at {step}");
            previous = cost;
        }
    }

    #[test]
    fn default_fuzzy_passes_its_own_validation() {
        let default = FuzzyCost::default();
        let rebuilt = FuzzyCost::new(default.breakpoints(), default.weights()).expect("valid");
        assert_eq!(rebuilt, default);
    }

    #[test]
    fn closures_are_cost_functions() {
        let flat = |_: f64, _: f64| 7.0;
        assert_eq!(flat.derive_cost(1.0, 2.0), 7.0);
        assert_eq!(flat.label(), "custom");
    }

    #[test]
    fn cost_model_parses_names() {
        assert_eq!("table".parse::<CostModel>(), Ok(CostModel::Table));
        assert_eq!("Fuzzy".parse::<CostModel>(), Ok(CostModel::Fuzzy));
        assert!("mamdani".parse::<CostModel>().is_err());
        assert_eq!(CostModel::Fuzzy.build().label(), "fuzzy");
        assert_eq!(CostModel::Table.to_string(), "table");
    }
}
