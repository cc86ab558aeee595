//! Factory population aggregation

use crate::model::{Calibration, Factory};
use crate::sampling::RandomSource;
use crate::simulation::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// `factory_count` identical, independently sampled factories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactoryPopulation {
    factory: Factory,
    factory_count: u64,
}

impl FactoryPopulation {
    /// Create a population of `factory_count` copies of `factory`
    pub fn new(factory: Factory, factory_count: u64) -> Self {
        Self { factory, factory_count }
    }

    /// Factory every member is modelled on
    pub fn factory(&self) -> Factory {
        self.factory
    }

    /// Number of factories
    pub fn factory_count(&self) -> u64 {
        self.factory_count
    }

    /// Total units produced by all factories over one window
    ///
    /// Every factory gets its own fresh samplers; an empty population produces
    /// nothing.
    pub fn aggregate<S: RandomSource + ?Sized>(
        &self,
        calibration: &Calibration,
        source: &mut S,
    ) -> SimulationResult<u64> {
        let mut total: u64 = 0;
        for _ in 0..self.factory_count {
            let units = self.factory.simulate(calibration, source)?;
            total = total.checked_add(units).ok_or_else(|| {
                SimulationError::computation_error(format!(
                    "aggregate output of {} factories overflows u64",
                    self.factory_count
                ))
            })?;
        }

        trace!(factories = self.factory_count, total, "Aggregated population output");
        Ok(total)
    }
}

/// Total output of `factory_count` factories with `machine_count` machines
/// working `window_seconds`
pub fn aggregate_output<S: RandomSource + ?Sized>(
    factory_count: u64,
    machine_count: u32,
    window_seconds: f64,
    calibration: &Calibration,
    source: &mut S,
) -> SimulationResult<u64> {
    let factory = Factory::new(machine_count, window_seconds)?;
    FactoryPopulation::new(factory, factory_count).aggregate(calibration, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SECONDS_PER_DAY;
    use crate::sampling::SeedSource;

    #[test]
    fn test_empty_population_produces_nothing() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(1);
        let total = aggregate_output(0, 3, SECONDS_PER_DAY, &calibration, &mut source).unwrap();
        assert_eq!(total, 0);
        assert_eq!(source.issued(), 0);
    }

    #[test]
    fn test_aggregate_equals_sum_of_individual_runs() {
        let calibration = Calibration::reference_study();
        let factory = Factory::new(3, SECONDS_PER_DAY).unwrap();

        let mut population_source = SeedSource::from_seed(77);
        let total = FactoryPopulation::new(factory, 4)
            .aggregate(&calibration, &mut population_source)
            .unwrap();

        let mut single_source = SeedSource::from_seed(77);
        let summed: u64 = (0..4)
            .map(|_| factory.simulate(&calibration, &mut single_source).unwrap())
            .sum();

        assert_eq!(total, summed);
    }

    #[test]
    fn test_invalid_factory_rejected() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(1);
        assert!(aggregate_output(2, 0, SECONDS_PER_DAY, &calibration, &mut source).is_err());
    }
}
