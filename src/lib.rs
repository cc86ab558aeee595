//! Assembly Line Simulator
//!
//! A Monte Carlo model of a semiconductor assembly line that estimates how many
//! units a factory produces over a working window and how many factories are
//! needed to reach a production target.
//!
//! # Overview
//!
//! Each factory evaluation draws nine operating quantities (cycle times,
//! downtime durations and frequencies, setup times) from bounded normal or
//! exponential distributions and a batch size, then applies a calibrated
//! regression formula to obtain the per-unit time and the output of the window.
//!
//! ## Key Features
//!
//! - **Bounded Sampling**: rejection sampling into fixed ranges, truncated to three decimals
//! - **Throughput Model**: productive machine time, per-unit time and output per factory
//! - **Capacity Search**: smallest factory count meeting a target, averaged over runs
//! - **Growth Planning**: yearly factory builds for compounded production growth
//! - **Validation**: simulated statistics compared against published observations
//! - **Reproducibility**: every generator derives from one injectable master seed
//!
//! ## Quick Start
//!
//! ```rust
//! use assembly_line_sim::*;
//!
//! let config = ExperimentConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = ExperimentOrchestrator::new(config)?;
//! let report = orchestrator.run_validation()?;
//! println!("Compared {} observations per column", report.sample_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Enumerations and experiment configuration
//! - [`sampling`]: Random sources and bounded samplers
//! - [`model`]: Calibration, factory model and population aggregation
//! - [`simulation`]: Capacity search, validation, orchestration and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Sampling   │    │    Model    │
//! │             │    │             │    │             │
//! │ Quantities  │◄───┤ SeedSource  │◄───┤ Calibration │
//! │ Config      │    │ Bounded     │    │ Factory     │
//! │             │    │ Sampler     │    │ Population  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                                     ▲
//!        │                                     │
//!        │           ┌─────────────┐           │
//!        │           │ Simulation  │           │
//!        └───────────┤             ├───────────┘
//!                    │ Capacity    │
//!                    │ Validation  │
//!                    │ Orchestrator│
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod model;
pub mod sampling;
pub mod simulation;
pub mod types;

// Re-export commonly used types for convenience
pub use model::{Calibration, Factory, FactoryEvaluation, FactoryPopulation, QuantitySample};
pub use sampling::{BoundedSampler, QuantityRange, RandomSource, SeedSource};
pub use simulation::{
    CapacityEstimate, CapacitySearch, ExperimentOrchestrator, ExperimentSummary, GrowthPlan,
    GrowthPlanner, LoggingConfig, SimulationError, SimulationResult, ValidationReport,
};
pub use types::{
    CliArgs, ExperimentConfig, ExperimentKind, NamedQuantity, OutputFormat,
};
