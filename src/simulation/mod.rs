//! Experiments and their supporting machinery
//!
//! This module contains the capacity search, the validation reporter, the
//! experiment orchestrator, report rendering, logging setup and error handling.
//!
//! # Overview
//!
//! - **CapacitySearch**: steps the factory count until the output meets a target
//! - **GrowthPlanner**: repeats the search for each year of compounded growth
//! - **ValidationReport**: compares simulated and published statistics
//! - **ExperimentOrchestrator**: runs the selected experiments from one seed
//! - **SimulationError**: error type shared by the whole crate
//!
//! # Usage Example
//!
//! ```rust
//! use assembly_line_sim::model::{Calibration, Factory, SECONDS_PER_DAY};
//! use assembly_line_sim::sampling::SeedSource;
//! use assembly_line_sim::simulation::*;
//!
//! let calibration = Calibration::reference_study();
//! let mut seeds = SeedSource::from_seed(1);
//! let factory = Factory::new(3, SECONDS_PER_DAY).unwrap();
//!
//! let search = CapacitySearch::new(400_000, factory, 1).unwrap();
//! let estimate = search.find_minimum_factories(&calibration, &mut seeds, 3).unwrap();
//! assert!(estimate.mean_output >= 400_000.0);
//! ```

pub mod capacity;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod report;
pub mod validation;

// Re-export all public types for convenience
pub use capacity::*;
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use report::*;
pub use validation::*;
