//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for breeding
//! the offspring of one generation out of the current population, guided by the belief space.
pub mod crossover;
pub mod cultural;
pub mod mutation;

use std::fmt::Debug;

use crate::{
    belief::BeliefSpace, error::Result, evolution::options::CulturalOptions,
    individual::Individual, rng::RandomNumberGenerator,
};

/// # BreedStrategy
///
/// Implementors turn an evaluated population into `num_offspring` new,
/// possibly unevaluated, individuals.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds new individuals.
    ///
    /// ## Parameters
    ///
    /// - `population`: The evaluated current generation.
    /// - `belief`: The belief space, already updated from `population`.
    /// - `options`: The run options (rates, influence strategy).
    /// - `num_offspring`: How many children to return.
    /// - `num_resources`: Valid gene values are `0..num_resources`.
    /// - `rng`: The run's random number generator.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The population is empty or not evaluated
    /// - Selection or belief influence fails
    fn breed(
        &self,
        population: &[Individual],
        belief: &BeliefSpace,
        options: &CulturalOptions,
        num_offspring: usize,
        num_resources: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;
}

pub use crossover::single_point_crossover;
pub use cultural::CulturalBreedStrategy;
pub use mutation::random_reset_mutation;
