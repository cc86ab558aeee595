//! Bounded (truncated) samplers
//!
//! A [`BoundedSampler`] draws from a normal or shifted exponential distribution
//! and rejects draws outside an inclusive range. Accepted values are truncated
//! toward zero to three decimal digits.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::DistributionKind;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};
use serde::{Deserialize, Serialize};

/// Default cap on consecutive rejected draws
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000_000;

/// Decimal digits kept on every accepted value
pub const TRUNCATION_DIGITS: u32 = 3;

/// Untruncated exponential mass allowed past the range width
pub const EXPONENTIAL_TAIL_PROBABILITY: f64 = 0.05;

/// Truncate `value` toward zero to `digits` decimal digits
///
/// ```
/// use assembly_line_sim::sampling::truncate_to_digits;
///
/// assert_eq!(truncate_to_digits(6.27569, 3), 6.275);
/// assert_eq!(truncate_to_digits(-1.23456, 3), -1.234);
/// ```
pub fn truncate_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).trunc() / factor
}

/// Inclusive acceptance range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl QuantityRange {
    /// Create a range
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Width of the range
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check the bounds are finite and ordered
    pub fn validate(&self, label: &str) -> SimulationResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(SimulationError::InvalidRange {
                quantity: label.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Normal(Normal<f64>),
    Exponential(Exp<f64>),
}

/// Sampler that only returns values within its range
#[derive(Debug)]
pub struct BoundedSampler<R> {
    label: String,
    range: QuantityRange,
    shape: Shape,
    rng: R,
    max_attempts: usize,
}

impl<R: Rng> BoundedSampler<R> {
    /// Create a sampler of the given family with the default tail probability
    pub fn new(
        kind: DistributionKind,
        label: impl Into<String>,
        range: QuantityRange,
        rng: R,
    ) -> SimulationResult<Self> {
        match kind {
            DistributionKind::Normal => Self::normal(label, range, rng),
            DistributionKind::Exponential => {
                Self::exponential(label, range, EXPONENTIAL_TAIL_PROBABILITY, rng)
            }
        }
    }

    /// Normal sampler with mean at the midpoint and a standard deviation of a
    /// quarter of the width
    pub fn normal(
        label: impl Into<String>,
        range: QuantityRange,
        rng: R,
    ) -> SimulationResult<Self> {
        let label = label.into();
        range.validate(&label)?;

        let normal = Normal::new(range.midpoint(), range.width() / 4.0).map_err(|e| {
            SimulationError::invalid_parameter("std_dev", format!("{}: {}", label, e))
        })?;

        Ok(Self {
            label,
            range,
            shape: Shape::Normal(normal),
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Exponential sampler shifted by `min`, with the rate chosen so that
    /// `1 - tail_probability` of the untruncated mass falls within the width
    pub fn exponential(
        label: impl Into<String>,
        range: QuantityRange,
        tail_probability: f64,
        rng: R,
    ) -> SimulationResult<Self> {
        let label = label.into();
        range.validate(&label)?;

        if !(tail_probability > 0.0 && tail_probability < 1.0) {
            return Err(SimulationError::invalid_parameter(
                "tail_probability",
                format!("must be in (0, 1), got {}", tail_probability),
            ));
        }

        let rate = -tail_probability.ln() / range.width();
        let exp = Exp::new(rate).map_err(|e| {
            SimulationError::invalid_parameter("rate", format!("{}: {}", label, e))
        })?;

        Ok(Self {
            label,
            range,
            shape: Shape::Exponential(exp),
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Override the rejection attempt cap
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Label used in errors and logs
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Acceptance range
    pub fn range(&self) -> QuantityRange {
        self.range
    }

    /// Distribution family
    pub fn kind(&self) -> DistributionKind {
        match self.shape {
            Shape::Normal(_) => DistributionKind::Normal,
            Shape::Exponential(_) => DistributionKind::Exponential,
        }
    }

    /// Draw one value in `[min, max]` with at most three decimal digits
    ///
    /// A draw is kept only if it is inside the range both before and after
    /// truncation, so ranges with a finer-grained lower bound stay closed.
    pub fn sample(&mut self) -> SimulationResult<f64> {
        for _ in 0..self.max_attempts {
            let raw = match self.shape {
                Shape::Normal(normal) => normal.sample(&mut self.rng),
                Shape::Exponential(exp) => exp.sample(&mut self.rng) + self.range.min,
            };

            if !self.range.contains(raw) {
                continue;
            }

            let value = truncate_to_digits(raw, TRUNCATION_DIGITS);
            if value >= self.range.min {
                return Ok(value);
            }
        }

        Err(SimulationError::SamplerExhausted {
            quantity: self.label.clone(),
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_truncation_is_toward_zero() {
        assert_eq!(truncate_to_digits(2.9999, 3), 2.999);
        assert_eq!(truncate_to_digits(4391.0, 3), 4391.0);
        assert_eq!(truncate_to_digits(-0.0005, 3), 0.0);
        assert_eq!(truncate_to_digits(-2.9999, 3), -2.999);
    }

    #[test]
    fn test_range_validation() {
        assert!(QuantityRange::new(1.0, 2.0).validate("ok").is_ok());
        assert!(QuantityRange::new(2.0, 2.0).validate("empty").is_err());
        assert!(QuantityRange::new(3.0, 2.0).validate("reversed").is_err());
        assert!(QuantityRange::new(f64::NAN, 2.0).validate("nan").is_err());
    }

    #[test]
    fn test_invalid_range_rejected_at_construction() {
        let result = BoundedSampler::normal("CTDA", QuantityRange::new(5.0, 1.0), rng());
        assert!(matches!(result, Err(SimulationError::InvalidRange { .. })));
    }

    #[test]
    fn test_invalid_tail_probability() {
        let result =
            BoundedSampler::exponential("DDDA", QuantityRange::new(1.0, 2.0), 1.5, rng());
        assert!(matches!(result, Err(SimulationError::InvalidParameter { .. })));
    }

    #[test]
    fn test_kind_reported() {
        let range = QuantityRange::new(1324.0, 2714.0);
        let sampler = BoundedSampler::new(DistributionKind::Exponential, "STWB", range, rng())
            .unwrap();
        assert_eq!(sampler.kind(), DistributionKind::Exponential);
        assert_eq!(sampler.label(), "STWB");
        assert_eq!(sampler.range(), range);
    }

    #[test]
    fn test_normal_draws_stay_in_range() {
        let range = QuantityRange::new(0.9882, 1.0498);
        let mut sampler = BoundedSampler::normal("CTPC", range, rng()).unwrap();
        for _ in 0..2_000 {
            let value = sampler.sample().unwrap();
            assert!(range.contains(value), "{} outside range", value);
        }
    }

    #[test]
    fn test_exponential_draws_have_three_decimals() {
        let range = QuantityRange::new(1364.0, 2797.0);
        let mut sampler =
            BoundedSampler::new(DistributionKind::Exponential, "DDWB", range, rng()).unwrap();
        for _ in 0..2_000 {
            let scaled = sampler.sample().unwrap() * 1000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_attempt_cap_surfaces_exhaustion() {
        // Width far below the truncation grain: no draw survives truncation
        let range = QuantityRange::new(1.00011, 1.00019);
        let mut sampler =
            BoundedSampler::normal("narrow", range, rng()).unwrap().with_max_attempts(50);
        match sampler.sample() {
            Err(SimulationError::SamplerExhausted { attempts, .. }) => assert_eq!(attempts, 50),
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}
