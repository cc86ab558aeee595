//! Experiment orchestrator
//!
//! This module contains the ExperimentOrchestrator, which turns an
//! [`ExperimentConfig`] into the three experiments and collects their results.

use crate::model::Factory;
use crate::sampling::SeedSource;
use crate::simulation::{
    validate_against_literature, CapacityEstimate, CapacitySearch, GrowthPlan, GrowthPlanner,
    SimulationError, SimulationResult, ValidationReport,
};
use crate::types::{ExperimentConfig, ExperimentKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Results of one invocation
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentSummary {
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Master seed every generator was derived from
    pub master_seed: u64,
    /// Experiments that ran, in order
    pub experiments: Vec<ExperimentKind>,
    /// Experiment 1 result
    pub validation: Option<ValidationReport>,
    /// Experiment 2 result
    pub annual_capacity: Option<CapacityEstimate>,
    /// Experiment 3 result
    pub growth_plan: Option<GrowthPlan>,
    /// Experiments that stopped on a recoverable error
    pub failures: Vec<ExperimentFailure>,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

impl ExperimentSummary {
    /// Whether every selected experiment produced a result
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// An experiment that stopped on a recoverable error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentFailure {
    /// Experiment that failed
    pub experiment: ExperimentKind,
    /// Error category, see [`SimulationError::category`]
    pub category: &'static str,
    /// Error message
    pub message: String,
}

impl ExperimentFailure {
    fn new(experiment: ExperimentKind, error: &SimulationError) -> Self {
        Self { experiment, category: error.category(), message: error.to_string() }
    }
}

/// Runs the configured experiments from one seed source
#[derive(Debug)]
pub struct ExperimentOrchestrator {
    config: ExperimentConfig,
    source: SeedSource,
}

impl ExperimentOrchestrator {
    /// Validate `config` and seed the generators from its seed, or entropy
    #[instrument(
        skip(config),
        fields(machines = config.machine_count, runs = config.averaging_runs)
    )]
    pub fn new(config: ExperimentConfig) -> SimulationResult<Self> {
        match config.seed {
            Some(seed) => info!("Using deterministic seed: {}", seed),
            None => debug!("Using entropy-based random seed"),
        }
        let source = SeedSource::from_optional_seed(config.seed);
        Self::with_source(config, source)
    }

    /// Use an explicit seed source
    pub fn with_source(config: ExperimentConfig, source: SeedSource) -> SimulationResult<Self> {
        config.validate().map_err(|e| SimulationError::configuration_error(e.to_string()))?;
        Ok(Self { config, source })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Master seed of the generators
    pub fn master_seed(&self) -> u64 {
        self.source.master_seed()
    }

    /// Experiment 1: simulated factory-days against the published observations
    #[instrument(skip(self))]
    pub fn run_validation(&mut self) -> SimulationResult<ValidationReport> {
        let factory =
            Factory::new(self.config.machine_count, self.config.validation_window_seconds)?;
        let report =
            validate_against_literature(&factory, &self.config.calibration, &mut self.source)?;
        info!(samples = report.sample_count, "Validation complete");
        Ok(report)
    }

    /// Experiment 2: factories needed for one year's production target
    #[instrument(skip(self), fields(target_output = self.config.annual_target))]
    pub fn run_annual_capacity(&mut self) -> SimulationResult<CapacityEstimate> {
        let factory = Factory::new(self.config.machine_count, self.config.planning_window_seconds)?;
        let search =
            CapacitySearch::new(self.config.annual_target, factory, self.config.annual_step)?
                .with_start(self.config.search_start)
                .with_max_iterations(self.config.max_search_iterations);

        search.find_minimum_factories(
            &self.config.calibration,
            &mut self.source,
            self.config.averaging_runs,
        )
    }

    /// Experiment 3: factories to build each year to keep up with growth
    #[instrument(skip(self), fields(years = self.config.growth_years))]
    pub fn run_growth_plan(&mut self) -> SimulationResult<GrowthPlan> {
        let planner = GrowthPlanner {
            base_total: self.config.annual_target,
            growth_rate: self.config.growth_rate,
            years: self.config.growth_years,
            step: self.config.growth_step,
            factory: Factory::new(self.config.machine_count, self.config.planning_window_seconds)?,
            search_start: self.config.search_start,
            max_iterations: self.config.max_search_iterations,
            runs: self.config.averaging_runs,
        };
        planner.plan(&self.config.calibration, &mut self.source)
    }

    /// Run `experiments` in order
    ///
    /// A recoverable error is recorded in [`ExperimentSummary::failures`] and
    /// the next experiment still runs. Any other error aborts the run.
    pub fn run(&mut self, experiments: &[ExperimentKind]) -> SimulationResult<ExperimentSummary> {
        let started = Instant::now();
        let mut summary = ExperimentSummary {
            generated_at: Utc::now(),
            master_seed: self.master_seed(),
            experiments: experiments.to_vec(),
            validation: None,
            annual_capacity: None,
            growth_plan: None,
            failures: Vec::new(),
            elapsed_seconds: 0.0,
        };

        for &kind in experiments {
            info!("Running {}", kind);
            match self.run_one(kind, &mut summary) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    warn!(experiment = %kind, category = e.category(), "{} failed: {}", kind, e);
                    summary.failures.push(ExperimentFailure::new(kind, &e));
                }
                Err(e) => return Err(e),
            }
        }

        summary.generated_at = Utc::now();
        summary.elapsed_seconds = started.elapsed().as_secs_f64();
        Ok(summary)
    }

    fn run_one(
        &mut self,
        kind: ExperimentKind,
        summary: &mut ExperimentSummary,
    ) -> SimulationResult<()> {
        match kind {
            ExperimentKind::Validation => summary.validation = Some(self.run_validation()?),
            ExperimentKind::AnnualCapacity => {
                summary.annual_capacity = Some(self.run_annual_capacity()?)
            }
            ExperimentKind::GrowthPlan => summary.growth_plan = Some(self.run_growth_plan()?),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SECONDS_PER_DAY;

    /// Experiments scaled down to a few factory-days
    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            seed: Some(42),
            planning_window_seconds: SECONDS_PER_DAY,
            annual_target: 2_000_000,
            annual_step: 5,
            growth_step: 1,
            growth_years: 2,
            averaging_runs: 2,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExperimentConfig { averaging_runs: 0, ..small_config() };
        let result = ExperimentOrchestrator::new(config);
        assert!(matches!(result, Err(SimulationError::ConfigurationError(_))));
    }

    #[test]
    fn test_seed_is_reported() {
        let orchestrator = ExperimentOrchestrator::new(small_config()).unwrap();
        assert_eq!(orchestrator.master_seed(), 42);
    }

    #[test]
    fn test_run_selected_experiments_only() {
        let mut orchestrator = ExperimentOrchestrator::new(small_config()).unwrap();
        let summary = orchestrator.run(&[ExperimentKind::Validation]).unwrap();

        assert!(summary.validation.is_some());
        assert!(summary.annual_capacity.is_none());
        assert!(summary.growth_plan.is_none());
        assert!(summary.is_complete());
        assert_eq!(summary.master_seed, 42);
    }

    #[test]
    fn test_recoverable_failure_keeps_earlier_results() {
        let config = ExperimentConfig {
            annual_target: u64::MAX,
            max_search_iterations: 3,
            ..small_config()
        };
        let mut orchestrator = ExperimentOrchestrator::new(config).unwrap();
        let summary = orchestrator
            .run(&[ExperimentKind::Validation, ExperimentKind::AnnualCapacity])
            .unwrap();

        assert!(summary.validation.is_some());
        assert!(summary.annual_capacity.is_none());
        assert!(!summary.is_complete());
        assert_eq!(summary.failures.len(), 1);

        let failure = &summary.failures[0];
        assert_eq!(failure.experiment, ExperimentKind::AnnualCapacity);
        assert_eq!(failure.category, "Search");
        assert!(failure.message.starts_with("No solution found within bounds"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["failures"][0]["category"], "Search");
    }

    #[test]
    fn test_later_experiments_run_after_a_failure() {
        let config = ExperimentConfig {
            annual_target: u64::MAX,
            max_search_iterations: 3,
            ..small_config()
        };
        let mut orchestrator = ExperimentOrchestrator::new(config).unwrap();
        let summary = orchestrator
            .run(&[ExperimentKind::AnnualCapacity, ExperimentKind::Validation])
            .unwrap();

        assert!(summary.validation.is_some());
        assert_eq!(summary.failures[0].experiment, ExperimentKind::AnnualCapacity);
    }

    #[test]
    fn test_run_all_experiments() {
        let mut orchestrator = ExperimentOrchestrator::new(small_config()).unwrap();
        let summary = orchestrator.run(&ExperimentKind::ALL).unwrap();

        let capacity = summary.annual_capacity.unwrap();
        assert_eq!(capacity.runs.len(), 2);
        assert!(capacity.runs.iter().all(|r| r.factories % 5 == 0 && r.output >= 2_000_000));

        let plan = summary.growth_plan.unwrap();
        assert_eq!(plan.years.len(), 2);
        assert_eq!(plan.years[0].target, 125_000);
    }

    #[test]
    fn test_same_seed_reproduces_results() {
        let mut first = ExperimentOrchestrator::new(small_config()).unwrap();
        let mut second = ExperimentOrchestrator::new(small_config()).unwrap();

        assert_eq!(first.run_annual_capacity().unwrap(), second.run_annual_capacity().unwrap());
    }
}
