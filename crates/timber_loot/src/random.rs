//! # Random Sources
//!
//! The resolver draws one uniform value in `[0, 1)` per pool entry from a
//! single stream it owns. The stream is injected so that tests and replays can
//! pin every draw.
//!
//! - [`SeededRandom`] - ChaCha8, seedable, used in production
//! - [`FixedRandom`] - always the same value
//! - [`SequenceRandom`] - cycles through a recorded list of draws

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    /// Next draw.
    fn next_unit(&mut self) -> f64;
}

/// ChaCha8-backed stream.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a reproducible stream.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a stream seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Returns the same draw forever.
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(f64);

impl FixedRandom {
    /// Creates a source that always returns `value`, clamped into `[0, 1)`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(clamp_unit(value))
    }
}

impl RandomSource for FixedRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a list of draws, starting over when it runs out.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    next: usize,
}

impl SequenceRandom {
    /// Creates a source replaying `values`, each clamped into `[0, 1)`.
    ///
    /// An empty list replays `0.0`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() {
            vec![0.0]
        } else {
            values.into_iter().map(clamp_unit).collect()
        };
        Self { values, next: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
