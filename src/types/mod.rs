//! Core types and configuration for the assembly line simulator
//!
//! This module contains the fundamental enumerations and the configuration
//! structures used throughout the crate.
//!
//! # Overview
//!
//! - **Enums**: named quantities, machine stages, experiments and output formats
//! - **Configuration**: experiment configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use assembly_line_sim::types::*;
//!
//! let quantity: NamedQuantity = "ctwb".parse().unwrap();
//! assert_eq!(quantity, NamedQuantity::CycleTimeWireBond);
//! assert_eq!(quantity.distribution(), DistributionKind::Normal);
//!
//! let config = ExperimentConfig {
//!     averaging_runs: 3,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
