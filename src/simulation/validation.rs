//! Model validation against published observations
//!
//! Compares the mean and population standard deviation of every named
//! quantity, the productive machine time and the output between the reference
//! observations and an equally sized set of simulated factory-days.

use crate::model::{
    reference_output, reference_quantity, reference_total_machine_time, Calibration, Factory,
    FactoryEvaluation, REFERENCE_OBSERVATIONS,
};
use crate::sampling::RandomSource;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::NamedQuantity;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

/// Mean and population standard deviation of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleStatistics {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation (divides by `count`)
    pub std_dev: f64,
}

impl SampleStatistics {
    /// Statistics of `values`, or `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self { count, mean, std_dev: variance.sqrt() })
    }
}

/// A column the validation report compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationMetric {
    /// One of the nine sampled quantities
    Quantity(NamedQuantity),
    /// Productive machine time (Ttotal)
    TotalMachineTime,
    /// Units produced (Om)
    Output,
}

impl ValidationMetric {
    /// Every metric in report order
    pub fn all() -> Vec<ValidationMetric> {
        NamedQuantity::ALL
            .iter()
            .map(|&q| ValidationMetric::Quantity(q))
            .chain([ValidationMetric::TotalMachineTime, ValidationMetric::Output])
            .collect()
    }

    /// Short column name
    pub fn code(self) -> &'static str {
        match self {
            ValidationMetric::Quantity(q) => q.code(),
            ValidationMetric::TotalMachineTime => "Ttotal",
            ValidationMetric::Output => "Om",
        }
    }
}

impl Serialize for ValidationMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Columns of observations keyed by metric
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservationSet {
    columns: BTreeMap<ValidationMetric, Vec<f64>>,
}

impl ObservationSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The published reference observations
    pub fn literature() -> Self {
        let mut set = Self::new();
        for quantity in NamedQuantity::ALL {
            set.insert_column(
                ValidationMetric::Quantity(quantity),
                reference_quantity(quantity).to_vec(),
            );
        }
        set.insert_column(
            ValidationMetric::TotalMachineTime,
            reference_total_machine_time().to_vec(),
        );
        set.insert_column(ValidationMetric::Output, reference_output().to_vec());
        set
    }

    /// Columns built from simulated evaluations
    pub fn from_evaluations(evaluations: &[FactoryEvaluation]) -> Self {
        let mut set = Self::new();
        for evaluation in evaluations {
            set.record(evaluation);
        }
        set
    }

    /// Append one evaluation to every column
    pub fn record(&mut self, evaluation: &FactoryEvaluation) {
        for (quantity, value) in evaluation.sample.iter() {
            self.push(ValidationMetric::Quantity(quantity), value);
        }
        self.push(ValidationMetric::TotalMachineTime, evaluation.total_machine_time as f64);
        self.push(ValidationMetric::Output, evaluation.units as f64);
    }

    /// Replace the column of `metric`
    pub fn insert_column(&mut self, metric: ValidationMetric, values: Vec<f64>) {
        self.columns.insert(metric, values);
    }

    fn push(&mut self, metric: ValidationMetric, value: f64) {
        self.columns.entry(metric).or_default().push(value);
    }

    /// Values of `metric`; empty when the column is missing
    pub fn column(&self, metric: ValidationMetric) -> &[f64] {
        self.columns.get(&metric).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reference against simulated statistics of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricComparison {
    /// Compared column
    pub metric: ValidationMetric,
    /// Statistics of the reference observations
    pub reference: SampleStatistics,
    /// Statistics of the simulated observations
    pub simulated: SampleStatistics,
    /// |reference mean - simulated mean|
    pub mean_difference: f64,
    /// |reference sd - simulated sd|
    pub std_dev_difference: f64,
}

impl MetricComparison {
    /// Compare two equally sized, non-empty columns
    pub fn compare(
        metric: ValidationMetric,
        reference: &[f64],
        simulated: &[f64],
    ) -> SimulationResult<Self> {
        let mismatch = || SimulationError::MismatchedSamples {
            metric: metric.code().to_string(),
            reference: reference.len(),
            simulated: simulated.len(),
        };

        if reference.len() != simulated.len() {
            return Err(mismatch());
        }
        let reference_stats = SampleStatistics::from_values(reference).ok_or_else(mismatch)?;
        let simulated_stats = SampleStatistics::from_values(simulated).ok_or_else(mismatch)?;

        Ok(Self {
            metric,
            reference: reference_stats,
            simulated: simulated_stats,
            mean_difference: (reference_stats.mean - simulated_stats.mean).abs(),
            std_dev_difference: (reference_stats.std_dev - simulated_stats.std_dev).abs(),
        })
    }

    /// Mean difference as a percentage of the reference mean
    pub fn relative_mean_difference(&self) -> f64 {
        if self.reference.mean == 0.0 {
            0.0
        } else {
            self.mean_difference / self.reference.mean.abs() * 100.0
        }
    }
}

/// Comparison of every metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Observations per column
    pub sample_count: usize,
    /// One comparison per metric, in report order
    pub comparisons: Vec<MetricComparison>,
}

impl ValidationReport {
    /// Compare every metric of two observation sets
    pub fn from_observations(
        reference: &ObservationSet,
        simulated: &ObservationSet,
    ) -> SimulationResult<Self> {
        let comparisons = ValidationMetric::all()
            .into_iter()
            .map(|metric| {
                let (expected, observed) = (reference.column(metric), simulated.column(metric));
                MetricComparison::compare(metric, expected, observed)
            })
            .collect::<SimulationResult<Vec<_>>>()?;

        let sample_count = comparisons.first().map(|c| c.reference.count).unwrap_or(0);
        Ok(Self { sample_count, comparisons })
    }

    /// Comparison of `metric`, if present
    pub fn comparison(&self, metric: ValidationMetric) -> Option<&MetricComparison> {
        self.comparisons.iter().find(|c| c.metric == metric)
    }
}

/// Simulate `count` independent factory evaluations
pub fn simulate_observations<S: RandomSource + ?Sized>(
    factory: &Factory,
    calibration: &Calibration,
    source: &mut S,
    count: usize,
) -> SimulationResult<ObservationSet> {
    let mut set = ObservationSet::new();
    for _ in 0..count {
        set.record(&factory.evaluate(calibration, source)?);
    }
    debug!(count, "Simulated validation observations");
    Ok(set)
}

/// Simulate as many factory-days as there are reference observations and
/// compare them with the literature
pub fn validate_against_literature<S: RandomSource + ?Sized>(
    factory: &Factory,
    calibration: &Calibration,
    source: &mut S,
) -> SimulationResult<ValidationReport> {
    let simulated = simulate_observations(factory, calibration, source, REFERENCE_OBSERVATIONS)?;
    ValidationReport::from_observations(&ObservationSet::literature(), &simulated)
}
