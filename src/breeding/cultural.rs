//! # CulturalBreedStrategy
//!
//! The `CulturalBreedStrategy` produces offspring the way a cultural algorithm
//! does: two parents are picked by a selection strategy, recombined by
//! single-point crossover, steered by the belief space and finally mutated.
use std::fmt::Debug;

use super::{crossover::single_point_crossover, mutation::random_reset_mutation, BreedStrategy};
use crate::{
    belief::BeliefSpace,
    error::{CulturalError, Result},
    evolution::options::CulturalOptions,
    individual::Individual,
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, TournamentSelection},
};

#[derive(Debug, Clone)]
pub struct CulturalBreedStrategy<S = TournamentSelection>
where
    S: SelectionStrategy + Clone,
{
    selection: S,
}

impl<S> CulturalBreedStrategy<S>
where
    S: SelectionStrategy + Clone,
{
    /// Creates a strategy that picks parents with `selection`.
    pub fn new(selection: S) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }
}

impl CulturalBreedStrategy<TournamentSelection> {
    /// Creates a tournament-based strategy sized from `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tournament size is 0.
    pub fn from_options(options: &CulturalOptions) -> Result<Self> {
        Ok(Self::new(TournamentSelection::new(
            options.get_tournament_size(),
        )?))
    }
}

impl<S> BreedStrategy for CulturalBreedStrategy<S>
where
    S: SelectionStrategy + Clone,
{
    /// Breeds `num_offspring` children out of `population`.
    ///
    /// Each round selects two parents, clones them, applies crossover with
    /// `crossover_rate`, then belief influence with `influence_rate` and
    /// mutation with `mutation_rate` to each child independently. The second
    /// child of the last round is dropped if it would overshoot.
    ///
    /// ## Errors
    ///
    /// This method will return an error if the population is empty or not
    /// fully evaluated, or if selection fails.
    fn breed(
        &self,
        population: &[Individual],
        belief: &BeliefSpace,
        options: &CulturalOptions,
        num_offspring: usize,
        num_resources: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        if population.is_empty() {
            return Err(CulturalError::EmptyPopulation);
        }

        let fitness = population
            .iter()
            .map(Individual::fitness)
            .collect::<Result<Vec<f64>>>()?;

        let mut children = Vec::with_capacity(num_offspring);

        while children.len() < num_offspring {
            let parents = self.selection.select(&fitness, 2, rng)?;
            let (first_idx, second_idx) = match parents.as_slice() {
                [a, b] => (*a, *b),
                _ => {
                    return Err(CulturalError::Evolution(format!(
                        "Selection returned {} parents instead of 2",
                        parents.len()
                    )))
                }
            };

            let mut first = population[first_idx].clone();
            let mut second = population[second_idx].clone();

            single_point_crossover(&mut first, &mut second, options.get_crossover_rate(), rng);

            for child in [&mut first, &mut second] {
                belief.influence(
                    child,
                    options.get_influence(),
                    options.get_influence_rate(),
                    options.get_normative_gene_rate(),
                    rng,
                )?;
                random_reset_mutation(child, options.get_mutation_rate(), num_resources, rng);
            }

            children.push(first);
            if children.len() < num_offspring {
                children.push(second);
            }
        }

        Ok(children)
    }
}
