//! Stochastic sampling engine
//!
//! This module contains the bounded samplers that produce every random
//! quantity of the model, and the random sources that seed them.
//!
//! # Overview
//!
//! - **BoundedSampler**: normal or shifted-exponential draws, rejection-sampled
//!   into an inclusive range and truncated to three decimals
//! - **QuantityRange**: the inclusive `[min, max]` a sampler accepts
//! - **RandomSource / SeedSource**: hands out independently seeded generators
//!
//! # Usage Example
//!
//! ```rust
//! use assembly_line_sim::sampling::*;
//! use assembly_line_sim::types::DistributionKind;
//!
//! let mut seeds = SeedSource::from_seed(42);
//! let range = QuantityRange::new(6.0902, 6.4609);
//! let mut sampler =
//!     BoundedSampler::new(DistributionKind::Normal, "CTWB", range, seeds.spawn_rng()).unwrap();
//!
//! let value = sampler.sample().unwrap();
//! assert!(range.contains(value));
//! ```

pub mod bounded;
pub mod random_source;

// Re-export all public types for convenience
pub use bounded::*;
pub use random_source::*;
