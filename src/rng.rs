//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a
//! cultural algorithm run. Every stochastic operation (initialization,
//! tournament sampling, crossover gating, influence, mutation) draws from the
//! instance owned by the driver, so two runs created with the same seed follow
//! the same trajectory.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let resource = rng.gen_index(4);
//! assert!(resource < 4);
//!
//! let positions = rng.sample_indices(10, 3);
//! assert_eq!(positions.len(), 3);
//! ```

use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    seq::index,
    Rng, SeedableRng,
};

use crate::error::{CulturalError, Result, ResultExt};

/// A wrapper around the `rand` crate's `StdRng` that provides the sampling
/// primitives used by the algorithm.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns `true` with probability `probability`.
    ///
    /// A probability of `0.0` never fires and `1.0` always fires.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    /// Draws an index uniformly from `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Draws an integer uniformly from `[low, high]`.
    pub fn gen_range_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }

    /// Samples `amount` distinct indices from `[0, length)`, in random order.
    ///
    /// `amount` is clamped to `length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }

    /// Draws an index with probability proportional to `weights[i]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `weights` is empty or every weight is zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Result<usize> {
        if weights.is_empty() {
            return Err(CulturalError::RandomGeneration(
                "Cannot sample from an empty weight table".to_string(),
            ));
        }
        let distribution = WeightedIndex::new(weights).context("Invalid weight table")?;
        Ok(distribution.sample(&mut self.rng))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
