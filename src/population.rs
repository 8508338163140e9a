//! # Population
//!
//! The population space of the cultural algorithm: a fixed-size, ordered set
//! of individuals that is evaluated, ranked and wholesale replaced once per
//! generation.

use rayon::prelude::*;

use crate::error::{CulturalError, Result};
use crate::evaluation::{FitnessEvaluator, Objective};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::ElitistSelection;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `size` individuals with independent random assignments.
    pub fn random(
        size: usize,
        num_tasks: usize,
        num_resources: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(num_tasks, num_resources, rng))
            .collect();
        Self { individuals }
    }

    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates every individual that has no cached evaluation.
    ///
    /// Populations of at least `parallel_threshold` individuals are evaluated
    /// with rayon. Either way the call returns only once every evaluation has
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns the first evaluator error encountered. Individuals evaluated
    /// before the failure keep their cache.
    pub fn evaluate<E>(
        &mut self,
        evaluator: &E,
        objective: &Objective,
        parallel_threshold: usize,
    ) -> Result<()>
    where
        E: FitnessEvaluator + ?Sized,
    {
        if self.individuals.len() >= parallel_threshold {
            self.individuals
                .par_iter_mut()
                .filter(|individual| !individual.is_evaluated())
                .try_for_each(|individual| individual.evaluate(evaluator, objective).map(|_| ()))
        } else {
            for individual in self.individuals.iter_mut().filter(|i| !i.is_evaluated()) {
                individual.evaluate(evaluator, objective)?;
            }
            Ok(())
        }
    }

    /// Fitness of every individual, in population order.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` if any individual lacks an evaluation.
    pub fn fitness(&self) -> Result<Vec<f64>> {
        self.individuals.iter().map(Individual::fitness).collect()
    }

    /// Indices of the top `count` individuals, best first, ties by population order.
    pub fn ranked(&self, count: usize) -> Result<Vec<usize>> {
        let fitness = self.fitness()?;
        ElitistSelection::new().top(&fitness, count)
    }

    /// Clones of the top `count` individuals, best first.
    pub fn top(&self, count: usize) -> Result<Vec<Individual>> {
        Ok(self
            .ranked(count)?
            .into_iter()
            .map(|idx| self.individuals[idx].clone())
            .collect())
    }

    /// The fittest individual; the earliest one on ties.
    pub fn best(&self) -> Result<&Individual> {
        let ranked = self.ranked(1)?;
        let idx = ranked.first().ok_or(CulturalError::EmptyPopulation)?;
        Ok(&self.individuals[*idx])
    }

    /// Replaces every individual with `next`.
    ///
    /// # Errors
    ///
    /// Returns an `Evolution` error if `next` does not have the current size.
    pub fn replace(&mut self, next: Vec<Individual>) -> Result<()> {
        if next.len() != self.individuals.len() {
            return Err(CulturalError::Evolution(format!(
                "Replacement generation has {} individuals, expected {}",
                next.len(),
                self.individuals.len()
            )));
        }
        self.individuals = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{CloudEnvironment, Resource, Task};

    fn environment() -> CloudEnvironment {
        CloudEnvironment::new(
            vec![Task::new(0, 120.0), Task::new(1, 200.0), Task::new(2, 150.0)],
            vec![Resource::new(0, 10.0, 5.0), Resource::new(1, 20.0, 8.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_random_population_shape() {
        let mut rng = RandomNumberGenerator::from_seed(51);
        let population = Population::random(12, 3, 2, &mut rng);
        assert_eq!(population.len(), 12);
        for individual in population.individuals() {
            assert_eq!(individual.len(), 3);
            assert!(individual.genes().iter().all(|&g| g < 2));
            assert!(!individual.is_evaluated());
        }
    }

    #[test]
    fn test_sequential_and_parallel_evaluation_agree() {
        let env = environment();
        let mut rng = RandomNumberGenerator::from_seed(52);
        let mut sequential = Population::random(64, 3, 2, &mut rng);
        let mut parallel = sequential.clone();

        sequential.evaluate(&env, &Objective::Cost, usize::MAX).unwrap();
        parallel.evaluate(&env, &Objective::Cost, 1).unwrap();

        assert_eq!(sequential.fitness().unwrap(), parallel.fitness().unwrap());
    }

    #[test]
    fn test_evaluation_error_propagates() {
        let env = environment();
        let mut population = Population::from_individuals(vec![
            Individual::new(vec![0, 0, 0]),
            Individual::new(vec![0, 5, 0]),
        ]);

        let result = population.evaluate(&env, &Objective::Cost, usize::MAX);
        assert!(matches!(result, Err(CulturalError::OutOfBounds(_))));
    }

    #[test]
    fn test_ranked_and_best() {
        let env = environment();
        let mut population = Population::from_individuals(vec![
            Individual::new(vec![0, 0, 0]), // cost 235
            Individual::new(vec![1, 1, 1]), // cost 188
            Individual::new(vec![1, 1, 1]), // cost 188
            Individual::new(vec![0, 1, 0]), // cost 215
        ]);
        population.evaluate(&env, &Objective::Cost, usize::MAX).unwrap();

        assert_eq!(population.ranked(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(population.best().unwrap().genes(), &[1, 1, 1]);
        assert_eq!(population.top(1).unwrap()[0].genes(), &[1, 1, 1]);
    }

    #[test]
    fn test_replace_requires_same_size() {
        let mut rng = RandomNumberGenerator::from_seed(53);
        let mut population = Population::random(4, 3, 2, &mut rng);
        assert!(population.replace(vec![]).is_err());

        let next = Population::random(4, 3, 2, &mut rng).individuals().to_vec();
        population.replace(next.clone()).unwrap();
        assert_eq!(population.individuals(), next.as_slice());
    }
}
