//! Calibration table for the throughput model
//!
//! All literal constants of the reference study live here: the acceptance range
//! of each named quantity, the centred regression terms of the per-unit time
//! formula, the oven-cure base time, and the batch-size set. Swapping in a
//! different study means supplying a different [`Calibration`].

use crate::sampling::{QuantityRange, EXPONENTIAL_TAIL_PROBABILITY};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::NamedQuantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seconds in one day; downtime durations are scaled against this
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Seconds in one (non-leap) year
pub const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

/// One centred, scaled term of the per-unit time regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionTerm {
    /// Signed coefficient
    pub coefficient: f64,
    /// Centring constant subtracted from the sampled value
    pub center: f64,
    /// Scale the centred value is divided by
    pub scale: f64,
}

impl RegressionTerm {
    /// Create a term
    pub const fn new(coefficient: f64, center: f64, scale: f64) -> Self {
        Self { coefficient, center, scale }
    }

    /// `coefficient * (value - center) / scale`
    pub fn contribution(&self, value: f64) -> f64 {
        self.coefficient * (value - self.center) / self.scale
    }
}

/// Calibration constants of one reference study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Acceptance range of each named quantity
    pub ranges: BTreeMap<NamedQuantity, QuantityRange>,
    /// Regression term of each named quantity in the per-unit time formula
    pub unit_time_terms: BTreeMap<NamedQuantity, RegressionTerm>,
    /// Oven-cure cycle time, the intercept of the per-unit time formula (seconds)
    pub oven_cure_cycle_time: f64,
    /// Per-unit time added per unit of batch size
    pub batch_size_coefficient: f64,
    /// Batch sizes chosen uniformly per evaluation
    pub batch_sizes: Vec<u32>,
    /// Period downtime durations are expressed against (seconds)
    pub downtime_period: f64,
    /// Tail probability used to calibrate exponential rates
    pub exponential_tail_probability: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::reference_study()
    }
}

impl Calibration {
    /// The published semiconductor assembly line study
    ///
    /// The line has three die attach, four oven cure, nine wire bond and three
    /// pre-cap inspection machines.
    pub fn reference_study() -> Self {
        use NamedQuantity::*;

        let ranges = BTreeMap::from([
            (CycleTimeWireBond, QuantityRange::new(6.0902, 6.4609)),
            (CycleTimeDieAttach, QuantityRange::new(2.8072, 2.9460)),
            (CycleTimePreCap, QuantityRange::new(0.9882, 1.0498)),
            (DowntimeDurationDieAttach, QuantityRange::new(2141.0, 4391.0)),
            (DowntimeDurationWireBond, QuantityRange::new(1364.0, 2797.0)),
            (DowntimeFrequencyDieAttach, QuantityRange::new(1066.0, 2187.0)),
            (DowntimeFrequencyWireBond, QuantityRange::new(1421.0, 2193.0)),
            (SetupTimeDieAttach, QuantityRange::new(2957.0, 6063.0)),
            (SetupTimeWireBond, QuantityRange::new(1324.0, 2714.0)),
        ]);

        let unit_time_terms = BTreeMap::from([
            (CycleTimeDieAttach, RegressionTerm::new(387.1239, 2.8766, 0.0694)),
            (CycleTimeWireBond, RegressionTerm::new(1008.0011, 6.2756, 0.1854)),
            (CycleTimePreCap, RegressionTerm::new(157.9690, 1.019, 0.0308)),
            (DowntimeDurationDieAttach, RegressionTerm::new(9.5167, 3266.0, 1125.0)),
            (DowntimeDurationWireBond, RegressionTerm::new(3.9325, 2080.5, 716.5)),
            (DowntimeFrequencyDieAttach, RegressionTerm::new(2.4477, 1626.5, 560.5)),
            (DowntimeFrequencyWireBond, RegressionTerm::new(-0.1807, 1807.0, 386.0)),
            (SetupTimeDieAttach, RegressionTerm::new(-2.6148, 4510.0, 1553.0)),
            (SetupTimeWireBond, RegressionTerm::new(24.3713, 2019.0, 695.0)),
        ]);

        Self {
            ranges,
            unit_time_terms,
            oven_cure_cycle_time: 7200.0,
            batch_size_coefficient: 10.1729,
            batch_sizes: vec![2200, 3080, 11264],
            downtime_period: SECONDS_PER_DAY,
            exponential_tail_probability: EXPONENTIAL_TAIL_PROBABILITY,
        }
    }

    /// Acceptance range of `quantity`
    pub fn range(&self, quantity: NamedQuantity) -> SimulationResult<QuantityRange> {
        self.ranges
            .get(&quantity)
            .copied()
            .ok_or(SimulationError::MissingCalibration { table: "range", quantity })
    }

    /// Regression term of `quantity`
    pub fn term(&self, quantity: NamedQuantity) -> SimulationResult<RegressionTerm> {
        self.unit_time_terms
            .get(&quantity)
            .copied()
            .ok_or(SimulationError::MissingCalibration { table: "unit time term", quantity })
    }

    /// Check every quantity is covered and the scalar constants are usable
    pub fn validate(&self) -> SimulationResult<()> {
        for quantity in NamedQuantity::ALL {
            self.range(quantity)?.validate(quantity.code())?;
            let term = self.term(quantity)?;
            if term.scale == 0.0 || !term.scale.is_finite() {
                return Err(SimulationError::invalid_parameter(
                    "scale",
                    format!("{} regression scale must be finite and non-zero", quantity.code()),
                ));
            }
        }

        if self.batch_sizes.is_empty() {
            return Err(SimulationError::invalid_parameter("batch_sizes", "must not be empty"));
        }
        if self.batch_sizes.contains(&0) {
            return Err(SimulationError::invalid_parameter("batch_sizes", "must be positive"));
        }
        if !(self.downtime_period > 0.0 && self.downtime_period.is_finite()) {
            return Err(SimulationError::invalid_parameter(
                "downtime_period",
                format!("must be positive, got {}", self.downtime_period),
            ));
        }
        if !(self.exponential_tail_probability > 0.0 && self.exponential_tail_probability < 1.0) {
            return Err(SimulationError::invalid_parameter(
                "exponential_tail_probability",
                format!("must be in (0, 1), got {}", self.exponential_tail_probability),
            ));
        }

        Ok(())
    }
}
