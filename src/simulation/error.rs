//! Error types and handling
//!
//! This module contains error types and error handling for the simulator.

use crate::types::NamedQuantity;
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A sampler was configured with an unusable range
    #[error("Invalid range for {quantity}: [{min}, {max}]")]
    InvalidRange {
        /// Label of the sampler whose range is invalid
        quantity: String,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A model or search parameter is outside its domain
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A rejection-sampling loop hit its attempt cap
    #[error("Sampler for {quantity} rejected {attempts} consecutive draws")]
    SamplerExhausted {
        /// Label of the exhausted sampler
        quantity: String,
        /// Number of rejected attempts
        attempts: usize,
    },

    /// The throughput formula produced an unusable value
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Capacity search hit its iteration cap before meeting the target
    #[error(
        "No solution found within bounds: target {target} not reached after {iterations} iterations (last candidate {last_candidate} produced {last_output})"
    )]
    NoConvergence {
        /// Production target the search was solving for
        target: u64,
        /// Iterations performed
        iterations: usize,
        /// Last factory count evaluated
        last_candidate: u64,
        /// Aggregate output of the last candidate
        last_output: u64,
    },

    /// Validation sequences cannot be compared
    #[error("Mismatched samples for {metric}: reference has {reference}, simulated has {simulated}")]
    MismatchedSamples {
        /// Metric being compared
        metric: String,
        /// Reference sequence length
        reference: usize,
        /// Simulated sequence length
        simulated: usize,
    },

    /// A calibration table is missing an entry
    #[error("Calibration has no {table} entry for {quantity}")]
    MissingCalibration {
        /// Table that is missing the entry
        table: &'static str,
        /// Quantity without an entry
        quantity: NamedQuantity,
    },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a computation error
    pub fn computation_error(msg: impl Into<String>) -> Self {
        Self::ComputationError(msg.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors affect a single evaluation or search; the remaining
    /// experiments can still run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::InvalidRange { .. } => false,
            SimulationError::InvalidParameter { .. } => false,
            SimulationError::SamplerExhausted { .. } => true,
            SimulationError::ComputationError(_) => true,
            SimulationError::NoConvergence { .. } => true,
            SimulationError::MismatchedSamples { .. } => false,
            SimulationError::MissingCalibration { .. } => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::InvalidRange { .. } => "Sampling",
            SimulationError::InvalidParameter { .. } => "Parameter",
            SimulationError::SamplerExhausted { .. } => "Sampling",
            SimulationError::ComputationError(_) => "Computation",
            SimulationError::NoConvergence { .. } => "Search",
            SimulationError::MismatchedSamples { .. } => "Validation",
            SimulationError::MissingCalibration { .. } => "Calibration",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
