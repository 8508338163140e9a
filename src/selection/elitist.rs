use std::cmp::Ordering;

use crate::error::{CulturalError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects the best individuals based on fitness.
///
/// Indices are returned best first. The sort is stable, so individuals with
/// equal fitness keep their original population order. NaN scores sort last.
///
/// The cultural algorithm uses this strategy twice per generation: for the
/// elites carried over unchanged and for the accepted slice that updates the
/// belief space.
///
/// # Examples
///
/// ```
/// use cultalg::selection::{ElitistSelection, SelectionStrategy};
/// use cultalg::rng::RandomNumberGenerator;
/// use cultalg::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![0.5, 0.8, 0.5, 0.9];
///     let mut rng = RandomNumberGenerator::from_seed(0);
///
///     let selection = ElitistSelection::new();
///     assert_eq!(selection.select(&fitness, 3, &mut rng)?, vec![3, 1, 0]);
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }

    /// Returns the top `num_to_select` indices without needing a random source.
    ///
    /// `num_to_select` is clamped to the population size.
    pub fn top(&self, fitness: &[f64], num_to_select: usize) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            return Err(CulturalError::EmptyPopulation);
        }

        let mut ranked: Vec<usize> = (0..fitness.len()).collect();
        ranked.sort_by(|&a, &b| descending(fitness[a], fitness[b]));
        ranked.truncate(num_to_select);

        Ok(ranked)
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| {
        // Handle NaN values by considering them less than any other value
        if a.is_nan() && !b.is_nan() {
            Ordering::Greater
        } else if b.is_nan() && !a.is_nan() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        fitness: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        self.top(fitness, num_to_select)
    }
}
