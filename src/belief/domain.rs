use crate::error::{CulturalError, Result};
use crate::individual::Individual;

/// Statistics of the whole current population.
///
/// Recomputed on every belief-space update. Used for monitoring only; nothing
/// in the algorithm treats these values as constraints.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DomainKnowledge {
    pub mean_fitness: f64,
    /// Population variance (divides by the population size).
    pub fitness_variance: f64,
    /// How many genes, across every individual, point at each resource.
    pub resource_usage: Vec<usize>,
}

impl DomainKnowledge {
    pub fn new(num_resources: usize) -> Self {
        Self {
            mean_fitness: 0.0,
            fitness_variance: 0.0,
            resource_usage: vec![0; num_resources],
        }
    }

    /// Recomputes every statistic from `population`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` for an empty slice and `NotEvaluated` if any
    /// individual lacks an evaluation.
    pub fn recompute(&mut self, population: &[Individual]) -> Result<()> {
        if population.is_empty() {
            return Err(CulturalError::EmptyPopulation);
        }

        let fitness = population
            .iter()
            .map(Individual::fitness)
            .collect::<Result<Vec<f64>>>()?;

        let n = fitness.len() as f64;
        let mean = fitness.iter().sum::<f64>() / n;
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        self.resource_usage.iter_mut().for_each(|c| *c = 0);
        for individual in population {
            for &resource in individual.genes() {
                if let Some(count) = self.resource_usage.get_mut(resource) {
                    *count += 1;
                }
            }
        }

        self.mean_fitness = mean;
        self.fitness_variance = variance;
        Ok(())
    }
}
