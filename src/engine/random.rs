//! The single source of randomness for sampling and jitter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform value in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Uniform value in [low, high).
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
pub struct RngSource<R>(R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Always yields the same value, clamped into [0, 1).
#[derive(Debug, Clone, Copy)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
