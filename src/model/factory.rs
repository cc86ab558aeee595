//! Factory throughput model
//!
//! One evaluation draws each named quantity once, picks a batch size, and turns
//! them into the productive machine time of the window (Ttotal), the per-unit
//! time of the regression formula (Tunit), and the resulting output count.

use crate::model::Calibration;
use crate::sampling::{BoundedSampler, RandomSource};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{DistributionKind, NamedQuantity};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Die attach machines in the reference line
pub const DEFAULT_MACHINE_COUNT: u32 = 3;

/// Build the sampler for one named quantity from the calibration table
pub fn quantity_sampler<R: Rng>(
    quantity: NamedQuantity,
    calibration: &Calibration,
    rng: R,
) -> SimulationResult<BoundedSampler<R>> {
    let range = calibration.range(quantity)?;
    match quantity.distribution() {
        DistributionKind::Normal => BoundedSampler::normal(quantity.code(), range, rng),
        DistributionKind::Exponential => BoundedSampler::exponential(
            quantity.code(),
            range,
            calibration.exponential_tail_probability,
            rng,
        ),
    }
}

/// One value for each of the nine named quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantitySample {
    values: [f64; NamedQuantity::COUNT],
}

impl QuantitySample {
    /// Build a sample from values in [`NamedQuantity::ALL`] order
    pub fn from_values(values: [f64; NamedQuantity::COUNT]) -> Self {
        Self { values }
    }

    /// Draw every quantity from a freshly constructed sampler
    pub fn draw<S: RandomSource + ?Sized>(
        calibration: &Calibration,
        source: &mut S,
    ) -> SimulationResult<Self> {
        let mut values = [0.0; NamedQuantity::COUNT];
        for quantity in NamedQuantity::ALL {
            let mut sampler = quantity_sampler(quantity, calibration, source.spawn_rng())?;
            values[quantity.index()] = sampler.sample()?;
        }
        Ok(Self { values })
    }

    /// Value of `quantity`
    pub fn get(&self, quantity: NamedQuantity) -> f64 {
        self.values[quantity.index()]
    }

    /// Iterate `(quantity, value)` pairs in draw order
    pub fn iter(&self) -> impl Iterator<Item = (NamedQuantity, f64)> + '_ {
        NamedQuantity::ALL.iter().map(move |&q| (q, self.get(q)))
    }
}

/// Everything one factory evaluation produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactoryEvaluation {
    /// Sampled quantities
    pub sample: QuantitySample,
    /// Chosen batch size (Q)
    pub batch_size: u32,
    /// Productive machine time of the window, truncated to whole seconds (Ttotal)
    pub total_machine_time: i64,
    /// Per-unit time, truncated to whole seconds (Tunit)
    pub unit_time: i64,
    /// Units produced (Om)
    pub units: u64,
}

/// A factory of `machine_count` machines per stage working for `window_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    machine_count: u32,
    window_seconds: f64,
}

impl Factory {
    /// Create a factory; the machine count must be positive and the window a
    /// positive, finite number of seconds
    pub fn new(machine_count: u32, window_seconds: f64) -> SimulationResult<Self> {
        if machine_count == 0 {
            return Err(SimulationError::invalid_parameter("machine_count", "must be at least 1"));
        }
        if !(window_seconds > 0.0 && window_seconds.is_finite()) {
            return Err(SimulationError::invalid_parameter(
                "window_seconds",
                format!("must be positive and finite, got {}", window_seconds),
            ));
        }
        Ok(Self { machine_count, window_seconds })
    }

    /// Machines per stage
    pub fn machine_count(&self) -> u32 {
        self.machine_count
    }

    /// Working window in seconds
    pub fn window_seconds(&self) -> f64 {
        self.window_seconds
    }

    /// Productive machine time over the window
    ///
    /// Die attach and wire bond lose their setup time and are scaled by the
    /// share of the downtime period left after downtime. Oven cure and pre-cap
    /// inspection are available for the whole window.
    pub fn total_machine_time(&self, calibration: &Calibration, sample: &QuantitySample) -> f64 {
        let td = self.window_seconds;
        let period = calibration.downtime_period;

        let die_attach = (td - sample.get(NamedQuantity::SetupTimeDieAttach))
            * ((period - sample.get(NamedQuantity::DowntimeDurationDieAttach)) / period);
        let wire_bond = (td - sample.get(NamedQuantity::SetupTimeWireBond))
            * ((period - sample.get(NamedQuantity::DowntimeDurationWireBond)) / period);

        (die_attach + td + wire_bond + td) * f64::from(self.machine_count)
    }

    /// Per-unit time from the regression formula
    pub fn unit_time(
        calibration: &Calibration,
        sample: &QuantitySample,
        batch_size: u32,
    ) -> SimulationResult<f64> {
        let mut unit_time = calibration.oven_cure_cycle_time;
        for (quantity, value) in sample.iter() {
            unit_time += calibration.term(quantity)?.contribution(value);
        }
        Ok(unit_time + calibration.batch_size_coefficient * f64::from(batch_size))
    }

    /// Evaluate the model for an already drawn sample and batch size
    pub fn evaluate_sample(
        &self,
        calibration: &Calibration,
        sample: QuantitySample,
        batch_size: u32,
    ) -> SimulationResult<FactoryEvaluation> {
        let total = self.total_machine_time(calibration, &sample);
        if !total.is_finite() {
            return Err(SimulationError::computation_error(format!(
                "total machine time is not finite ({})",
                total
            )));
        }

        let unit = Self::unit_time(calibration, &sample, batch_size)?;
        if !unit.is_finite() || unit.trunc() <= 0.0 {
            return Err(SimulationError::computation_error(format!(
                "per-unit time must be positive and finite, got {}",
                unit
            )));
        }

        let total_machine_time = total.trunc() as i64;
        let unit_time = unit.trunc() as i64;

        // Window shorter than the setup losses: nothing gets produced
        let units = if total_machine_time <= 0 {
            0
        } else {
            let produced =
                i128::from(total_machine_time) * i128::from(batch_size) / i128::from(unit_time);
            u64::try_from(produced).map_err(|_| {
                SimulationError::computation_error(format!("output {} overflows u64", produced))
            })?
        };

        Ok(FactoryEvaluation { sample, batch_size, total_machine_time, unit_time, units })
    }

    /// Draw a fresh sample and batch size, then evaluate
    pub fn evaluate<S: RandomSource + ?Sized>(
        &self,
        calibration: &Calibration,
        source: &mut S,
    ) -> SimulationResult<FactoryEvaluation> {
        let sample = QuantitySample::draw(calibration, source)?;

        let mut rng = source.spawn_rng();
        let batch_size = *calibration
            .batch_sizes
            .choose(&mut rng)
            .ok_or_else(|| SimulationError::invalid_parameter("batch_sizes", "must not be empty"))?;

        self.evaluate_sample(calibration, sample, batch_size)
    }

    /// Units produced over one window
    pub fn simulate<S: RandomSource + ?Sized>(
        &self,
        calibration: &Calibration,
        source: &mut S,
    ) -> SimulationResult<u64> {
        Ok(self.evaluate(calibration, source)?.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SECONDS_PER_DAY;
    use crate::sampling::SeedSource;

    /// Every quantity at its regression centre
    fn centred_sample(calibration: &Calibration) -> QuantitySample {
        let mut values = [0.0; NamedQuantity::COUNT];
        for quantity in NamedQuantity::ALL {
            values[quantity.index()] = calibration.term(quantity).unwrap().center;
        }
        QuantitySample::from_values(values)
    }

    #[test]
    fn test_factory_parameter_validation() {
        assert!(Factory::new(0, SECONDS_PER_DAY).is_err());
        assert!(Factory::new(3, 0.0).is_err());
        assert!(Factory::new(3, f64::INFINITY).is_err());
        assert!(Factory::new(3, SECONDS_PER_DAY).is_ok());
    }

    #[test]
    fn test_unit_time_at_centres_is_intercept_plus_batch_term() {
        let calibration = Calibration::reference_study();
        let sample = centred_sample(&calibration);
        let unit = Factory::unit_time(&calibration, &sample, 2200).unwrap();
        assert!((unit - (7200.0 + 10.1729 * 2200.0)).abs() < 1e-6);
    }

    #[test]
    fn test_total_machine_time_known_values() {
        let calibration = Calibration::reference_study();
        let mut values = [0.0; NamedQuantity::COUNT];
        values[NamedQuantity::SetupTimeDieAttach.index()] = 4320.0;
        values[NamedQuantity::DowntimeDurationDieAttach.index()] = 4320.0;
        values[NamedQuantity::SetupTimeWireBond.index()] = 0.0;
        values[NamedQuantity::DowntimeDurationWireBond.index()] = 0.0;
        let sample = QuantitySample::from_values(values);

        let factory = Factory::new(2, SECONDS_PER_DAY).unwrap();
        // (86400 - 4320) * 0.95 + 86400 + 86400 + 86400, doubled
        let expected = ((86_400.0 - 4_320.0) * 0.95 + 3.0 * 86_400.0) * 2.0;
        assert!((factory.total_machine_time(&calibration, &sample) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_output_uses_truncating_integer_division() {
        let calibration = Calibration::reference_study();
        let sample = centred_sample(&calibration);
        let factory = Factory::new(3, SECONDS_PER_DAY).unwrap();

        let evaluation = factory.evaluate_sample(&calibration, sample, 3080).unwrap();
        let expected = evaluation.total_machine_time * 3080 / evaluation.unit_time;
        assert_eq!(evaluation.units, expected as u64);
        assert_eq!(evaluation.unit_time, (7200.0 + 10.1729 * 3080.0_f64).trunc() as i64);
    }

    #[test]
    fn test_short_window_produces_nothing() {
        let calibration = Calibration::reference_study();
        let mut sample = centred_sample(&calibration);
        sample.values[NamedQuantity::SetupTimeDieAttach.index()] = 6000.0;
        sample.values[NamedQuantity::SetupTimeWireBond.index()] = 2700.0;

        let factory = Factory::new(3, 60.0).unwrap();
        let evaluation = factory.evaluate_sample(&calibration, sample, 2200).unwrap();
        assert!(evaluation.total_machine_time < 0);
        assert_eq!(evaluation.units, 0);
    }

    #[test]
    fn test_non_positive_unit_time_is_an_error() {
        let calibration =
            Calibration { oven_cure_cycle_time: -1.0e9, ..Calibration::reference_study() };
        let sample = centred_sample(&calibration);
        let factory = Factory::new(3, SECONDS_PER_DAY).unwrap();
        let result = factory.evaluate_sample(&calibration, sample, 2200);
        assert!(matches!(result, Err(SimulationError::ComputationError(_))));
    }

    #[test]
    fn test_evaluate_picks_configured_batch_size() {
        let calibration = Calibration::reference_study();
        let factory = Factory::new(DEFAULT_MACHINE_COUNT, SECONDS_PER_DAY).unwrap();
        let mut source = SeedSource::from_seed(5);

        for _ in 0..200 {
            let evaluation = factory.evaluate(&calibration, &mut source).unwrap();
            assert!(calibration.batch_sizes.contains(&evaluation.batch_size));
            for (quantity, value) in evaluation.sample.iter() {
                assert!(calibration.range(quantity).unwrap().contains(value));
            }
        }
    }
}
