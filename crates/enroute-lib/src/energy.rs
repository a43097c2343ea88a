//! Residual energy model for network nodes.
//!
//! Every node starts from the same baseline and loses the sum of its CPU and
//! radio power draw exactly once, when it is first added to a topology.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Starting energy applied uniformly to every node at creation.
pub const BASE_ENERGY: f64 = 100.0;

/// Stated power draw of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerDraw {
    /// Power consumed by computation.
    pub cpu: f64,
    /// Power consumed by the wireless radio.
    pub radio: f64,
}

impl PowerDraw {
    pub fn new(cpu: f64, radio: f64) -> Self {
        Self { cpu, radio }
    }

    /// Validate that both draws are finite and non-negative.
    ///
    /// `node` is only used to label the error.
    pub fn validate(&self, node: &str) -> Result<()> {
        for (label, value) in [("cpu", self.cpu), ("radio", self.radio)] {
            if !value.is_finite() {
                return Err(Error::InvalidPowerDraw {
                    node: node.to_string(),
                    message: format!("{label} power draw must be finite, got {value}"),
                });
            }
            if value < 0.0 {
                return Err(Error::InvalidPowerDraw {
                    node: node.to_string(),
                    message: format!("{label} power draw must be non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Combined draw of CPU and radio.
    pub fn total(&self) -> f64 {
        self.cpu + self.radio
    }
}

/// Energy left after subtracting both power draws from `base_energy`.
///
/// Negative results are returned unchanged.
pub fn compute_residual_energy(base_energy: f64, cpu_power_draw: f64, radio_power_draw: f64) -> f64 {
    base_energy - cpu_power_draw - radio_power_draw
}
