//! Injectable random sources
//!
//! Every bounded sampler owns its own generator. Generators are handed out by a
//! [`RandomSource`], so production code can seed from entropy while tests supply
//! a fixed master seed and get bit-identical streams.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

/// Golden-ratio increment applied per issued seed
const SEED_INCREMENT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Capability that hands out independently seeded generators
pub trait RandomSource {
    /// Generator type handed to samplers
    type Rng: Rng;

    /// Create a fresh generator whose stream is independent of previous ones
    fn spawn_rng(&mut self) -> Self::Rng;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    type Rng = S::Rng;

    fn spawn_rng(&mut self) -> Self::Rng {
        (**self).spawn_rng()
    }
}

/// SplitMix64 finalizer
fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Random source derived from one master seed and a per-generator counter
///
/// Seeds are `splitmix64(master + n * golden)` for the n-th generator issued,
/// so samplers constructed back to back never share a stream.
#[derive(Debug, Clone)]
pub struct SeedSource {
    master_seed: u64,
    issued: u64,
}

impl SeedSource {
    /// Create a deterministic source from a master seed
    pub fn from_seed(master_seed: u64) -> Self {
        Self { master_seed, issued: 0 }
    }

    /// Create a source whose master seed is drawn from OS entropy
    pub fn from_entropy() -> Self {
        let master_seed = StdRng::from_entropy().next_u64();
        debug!("Drew master seed {} from entropy", master_seed);
        Self::from_seed(master_seed)
    }

    /// Use the configured seed if present, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Master seed this source derives from
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Number of seeds issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Issue the next derived seed
    pub fn next_seed(&mut self) -> u64 {
        self.issued = self.issued.wrapping_add(1);
        splitmix64(self.master_seed.wrapping_add(self.issued.wrapping_mul(SEED_INCREMENT)))
    }
}

impl RandomSource for SeedSource {
    type Rng = StdRng;

    fn spawn_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.next_seed())
    }
}
