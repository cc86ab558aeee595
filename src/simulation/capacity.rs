//! Capacity search and growth planning
//!
//! The search walks the factory count upwards in fixed steps, simulating the
//! whole population at every candidate, until the aggregate output meets the
//! target. Each walk is independent, so several are averaged per estimate.

use crate::model::{Calibration, Factory, FactoryPopulation};
use crate::sampling::RandomSource;
use crate::simulation::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Iteration cap of a single search walk
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Result of one search walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// A factory count meeting the target was found
    Converged(SearchConvergence),
    /// The iteration cap was reached first
    Exhausted {
        /// Iterations performed
        iterations: usize,
        /// Last factory count evaluated
        last_candidate: u64,
        /// Output of the last factory count evaluated
        last_output: u64,
    },
}

/// Smallest factory count of one walk whose output met the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConvergence {
    /// Factories needed
    pub factories: u64,
    /// Aggregate output of that many factories
    pub output: u64,
    /// Candidates evaluated, including the final one
    pub iterations: usize,
}

impl SearchOutcome {
    /// Turn an exhausted walk into [`SimulationError::NoConvergence`]
    pub fn into_result(self, target: u64) -> SimulationResult<SearchConvergence> {
        match self {
            SearchOutcome::Converged(convergence) => Ok(convergence),
            SearchOutcome::Exhausted { iterations, last_candidate, last_output } => {
                Err(SimulationError::NoConvergence {
                    target,
                    iterations,
                    last_candidate,
                    last_output,
                })
            }
        }
    }
}

/// Averaged result of several independent walks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityEstimate {
    /// Output the walks searched for
    pub target: u64,
    /// Factory-count increment
    pub step: u64,
    /// Every individual walk
    pub runs: Vec<SearchConvergence>,
    /// Mean factory count over the walks
    pub mean_factories: f64,
    /// Mean aggregate output over the walks
    pub mean_output: f64,
}

impl CapacityEstimate {
    fn from_runs(target: u64, step: u64, runs: Vec<SearchConvergence>) -> Self {
        let count = runs.len().max(1) as f64;
        let mean_factories = runs.iter().map(|r| r.factories as f64).sum::<f64>() / count;
        let mean_output = runs.iter().map(|r| r.output as f64).sum::<f64>() / count;
        Self { target, step, runs, mean_factories, mean_output }
    }
}

/// Parameters of a stepped factory-count search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySearch {
    target: u64,
    factory: Factory,
    step: u64,
    start: u64,
    max_iterations: usize,
}

impl CapacitySearch {
    /// Search for `target` units with factories like `factory`, stepping by `step`
    pub fn new(target: u64, factory: Factory, step: u64) -> SimulationResult<Self> {
        if step == 0 {
            return Err(SimulationError::invalid_parameter("step", "must be at least 1"));
        }
        Ok(Self { target, factory, step, start: 0, max_iterations: DEFAULT_MAX_ITERATIONS })
    }

    /// First factory count to evaluate
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Cap on the candidates one walk evaluates
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Output searched for
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Factory-count increment
    pub fn step(&self) -> u64 {
        self.step
    }

    /// One walk from the start count upwards
    pub fn run_once<S: RandomSource + ?Sized>(
        &self,
        calibration: &Calibration,
        source: &mut S,
    ) -> SimulationResult<SearchOutcome> {
        let mut candidate = self.start;
        let mut last_candidate = self.start;
        let mut last_output = 0;

        for iteration in 1..=self.max_iterations {
            let output = FactoryPopulation::new(self.factory, candidate)
                .aggregate(calibration, source)?;
            debug!(candidate, output, target_output = self.target, "Capacity search iteration");

            if output >= self.target {
                return Ok(SearchOutcome::Converged(SearchConvergence {
                    factories: candidate,
                    output,
                    iterations: iteration,
                }));
            }

            last_candidate = candidate;
            last_output = output;
            candidate = candidate.checked_add(self.step).ok_or_else(|| {
                SimulationError::computation_error("factory count overflows u64")
            })?;
        }

        warn!(
            target_output = self.target,
            iterations = self.max_iterations,
            last_candidate,
            last_output,
            "Capacity search hit its iteration cap"
        );
        Ok(SearchOutcome::Exhausted {
            iterations: self.max_iterations,
            last_candidate,
            last_output,
        })
    }

    /// Average `runs` independent walks
    ///
    /// Fails with [`SimulationError::NoConvergence`] as soon as one walk is
    /// exhausted.
    pub fn find_minimum_factories<S: RandomSource + ?Sized>(
        &self,
        calibration: &Calibration,
        source: &mut S,
        runs: usize,
    ) -> SimulationResult<CapacityEstimate> {
        if runs == 0 {
            return Err(SimulationError::invalid_parameter("runs", "must be at least 1"));
        }

        let mut results = Vec::with_capacity(runs);
        for run in 0..runs {
            let convergence = self.run_once(calibration, source)?.into_result(self.target)?;
            debug!(run, factories = convergence.factories, "Search walk converged");
            results.push(convergence);
        }

        let estimate = CapacityEstimate::from_runs(self.target, self.step, results);
        info!(
            target_output = self.target,
            runs,
            mean_factories = estimate.mean_factories,
            "Capacity estimate complete"
        );
        Ok(estimate)
    }
}

/// Factories to build in one year of the growth plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPlan {
    /// Year number, starting at 1
    pub year: u32,
    /// Extra output needed this year
    pub target: u64,
    /// Estimate for the extra output
    pub estimate: CapacityEstimate,
    /// Total production after this year's factories are built
    pub cumulative_total: u64,
}

/// Multi-year factory building plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPlan {
    /// Production at the start of the plan
    pub base_total: u64,
    /// Yearly growth rate
    pub growth_rate: f64,
    /// One entry per year
    pub years: Vec<YearPlan>,
}

impl GrowthPlan {
    /// Sum of the averaged factory counts over all years
    pub fn total_factories(&self) -> f64 {
        self.years.iter().map(|y| y.estimate.mean_factories).sum()
    }
}

/// Parameters of the multi-year growth plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPlanner {
    /// Production at the start of the plan
    pub base_total: u64,
    /// Yearly growth rate (0.0-1.0)
    pub growth_rate: f64,
    /// Years to plan
    pub years: u32,
    /// Factory-count increment of each yearly search
    pub step: u64,
    /// Factory every new plant is modelled on
    pub factory: Factory,
    /// First factory count every search evaluates
    pub search_start: u64,
    /// Iteration cap of each search walk
    pub max_iterations: usize,
    /// Walks averaged per year
    pub runs: usize,
}

impl GrowthPlanner {
    /// Yearly extra output needed on top of `total`
    ///
    /// The total is first divided by 100 in integer arithmetic and then scaled
    /// by the growth percentage, so the remainder below 100 units never grows.
    pub fn yearly_target(&self, total: u64) -> u64 {
        ((total / 100) as f64 * self.growth_rate * 100.0).trunc() as u64
    }

    /// Plan every year in turn, compounding the total with each year's
    /// averaged output
    pub fn plan<S: RandomSource + ?Sized>(
        &self,
        calibration: &Calibration,
        source: &mut S,
    ) -> SimulationResult<GrowthPlan> {
        if !(0.0..=1.0).contains(&self.growth_rate) {
            return Err(SimulationError::invalid_parameter(
                "growth_rate",
                format!("must be between 0.0 and 1.0, got {}", self.growth_rate),
            ));
        }

        let mut total = self.base_total;
        let mut years = Vec::with_capacity(self.years as usize);

        for year in 1..=self.years {
            let target = self.yearly_target(total);
            let search = CapacitySearch::new(target, self.factory, self.step)?
                .with_start(self.search_start)
                .with_max_iterations(self.max_iterations);
            let estimate = search.find_minimum_factories(calibration, source, self.runs)?;

            total = total.checked_add(estimate.mean_output.round() as u64).ok_or_else(|| {
                SimulationError::computation_error("cumulative production overflows u64")
            })?;
            info!(year, target, mean_factories = estimate.mean_factories, total, "Planned year");

            years.push(YearPlan { year, target, estimate, cumulative_total: total });
        }

        Ok(GrowthPlan { base_total: self.base_total, growth_rate: self.growth_rate, years })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SECONDS_PER_DAY;
    use crate::sampling::SeedSource;

    fn day_factory() -> Factory {
        Factory::new(3, SECONDS_PER_DAY).unwrap()
    }

    #[test]
    fn test_zero_step_rejected() {
        assert!(CapacitySearch::new(10, day_factory(), 0).is_err());
    }

    #[test]
    fn test_zero_target_returns_start_immediately() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(3);
        let search = CapacitySearch::new(0, day_factory(), 500).unwrap().with_start(7);

        let outcome = search.run_once(&calibration, &mut source).unwrap();
        match outcome {
            SearchOutcome::Converged(c) => {
                assert_eq!(c.factories, 7);
                assert_eq!(c.iterations, 1);
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_converged_count_meets_target() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(11);
        let search = CapacitySearch::new(1_000_000, day_factory(), 1).unwrap();

        let convergence =
            search.run_once(&calibration, &mut source).unwrap().into_result(1_000_000).unwrap();
        assert!(convergence.output >= 1_000_000);
        assert!(convergence.factories > 1);
    }

    #[test]
    fn test_iteration_cap_reports_no_convergence() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(5);
        let search =
            CapacitySearch::new(u64::MAX, day_factory(), 1).unwrap().with_max_iterations(3);

        let outcome = search.run_once(&calibration, &mut source).unwrap();
        assert!(matches!(
            outcome,
            SearchOutcome::Exhausted { iterations: 3, last_candidate: 2, .. }
        ));

        let err = search.find_minimum_factories(&calibration, &mut source, 2).unwrap_err();
        assert!(matches!(err, SimulationError::NoConvergence { target: u64::MAX, .. }));
        assert!(err.to_string().starts_with("No solution found within bounds"));
    }

    #[test]
    fn test_estimate_averages_runs() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(21);
        let search = CapacitySearch::new(500_000, day_factory(), 1).unwrap();

        let estimate = search.find_minimum_factories(&calibration, &mut source, 4).unwrap();
        assert_eq!(estimate.runs.len(), 4);
        let mean = estimate.runs.iter().map(|r| r.factories as f64).sum::<f64>() / 4.0;
        assert!((estimate.mean_factories - mean).abs() < 1e-9);
        assert!(estimate.mean_output >= 500_000.0);
    }

    #[test]
    fn test_zero_runs_rejected() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(1);
        let search = CapacitySearch::new(10, day_factory(), 1).unwrap();
        assert!(search.find_minimum_factories(&calibration, &mut source, 0).is_err());
    }

    #[test]
    fn test_growth_plan_compounds_total() {
        let calibration = Calibration::reference_study();
        let mut source = SeedSource::from_seed(8);
        let planner = GrowthPlanner {
            base_total: 4_000_000,
            growth_rate: 0.0625,
            years: 2,
            step: 1,
            factory: day_factory(),
            search_start: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            runs: 2,
        };

        let plan = planner.plan(&calibration, &mut source).unwrap();
        assert_eq!(plan.years.len(), 2);
        assert_eq!(plan.years[0].target, 250_000);

        let first = &plan.years[0];
        assert_eq!(first.cumulative_total, 4_000_000 + first.estimate.mean_output.round() as u64);
        assert_eq!(plan.years[1].target, planner.yearly_target(first.cumulative_total));
        assert!(plan.years[1].target > first.target);
    }

    #[test]
    fn test_yearly_target_drops_remainder_below_hundred() {
        let planner = GrowthPlanner {
            base_total: 0,
            growth_rate: 0.0625,
            years: 1,
            step: 1,
            factory: day_factory(),
            search_start: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            runs: 1,
        };

        // 12_345 * 6.25, not 1_234_599 * 0.0625
        assert_eq!(planner.yearly_target(1_234_599), 77_156);
        assert_eq!(planner.yearly_target(1_140_000_000_000), 71_250_000_000);
        assert_eq!(planner.yearly_target(99), 0);
    }
}
