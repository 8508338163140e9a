use crate::error::{CulturalError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament samples `tournament_size` distinct individuals uniformly
/// without replacement and returns the fittest of them. When several
/// participants share the best fitness, the one sampled first wins, which keeps
/// the result deterministic under a fixed random sequence.
///
/// Tournaments are independent, so the same individual may win more than once:
/// selecting parents for a full generation needs repeated winners.
///
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// A tournament size of 1 is uniform random selection.
///
/// # Examples
///
/// ```
/// use cultalg::selection::{SelectionStrategy, TournamentSelection};
/// use cultalg::rng::RandomNumberGenerator;
/// use cultalg::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = TournamentSelection::new(5)?;
///     // Every individual takes part, so the fittest always wins.
///     assert_eq!(selection.select(&fitness, 3, &mut rng)?, vec![3, 3, 3]);
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(CulturalError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or smaller than the tournament.
    pub fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(CulturalError::EmptyPopulation);
        }

        if self.tournament_size > fitness.len() {
            return Err(CulturalError::Configuration(format!(
                "Tournament size ({}) exceeds population size ({})",
                self.tournament_size,
                fitness.len()
            )));
        }

        let participants = rng.sample_indices(fitness.len(), self.tournament_size);

        let mut best_idx = participants[0];
        let mut best_fitness = fitness[best_idx];

        for &idx in &participants[1..] {
            if fitness[idx] > best_fitness {
                best_idx = idx;
                best_fitness = fitness[idx];
            }
        }

        Ok(best_idx)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        (0..num_to_select)
            .map(|_| self.run_tournament(fitness, rng))
            .collect()
    }
}
