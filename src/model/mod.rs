//! Factory throughput model
//!
//! This module contains the calibration table, the single-factory throughput
//! model, the population aggregator, and the published reference observations.
//!
//! # Overview
//!
//! - **Calibration**: ranges, regression terms and batch sizes of the study
//! - **Factory**: draws the nine quantities and a batch size, and computes
//!   Ttotal, Tunit and the output of one window
//! - **FactoryPopulation**: sums independent factory evaluations
//! - **reference**: the literature observations used for validation
//!
//! # Usage Example
//!
//! ```rust
//! use assembly_line_sim::model::*;
//! use assembly_line_sim::sampling::SeedSource;
//!
//! let calibration = Calibration::reference_study();
//! let mut seeds = SeedSource::from_seed(7);
//!
//! let factory = Factory::new(3, SECONDS_PER_DAY).unwrap();
//! let units = factory.simulate(&calibration, &mut seeds).unwrap();
//! assert!(units > 0);
//!
//! let total = FactoryPopulation::new(factory, 10).aggregate(&calibration, &mut seeds).unwrap();
//! assert!(total > units);
//! ```

pub mod calibration;
pub mod factory;
pub mod population;
pub mod reference;

// Re-export all public types for convenience
pub use calibration::*;
pub use factory::*;
pub use population::*;
pub use reference::*;
