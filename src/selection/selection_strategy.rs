use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// Selection strategies work on the fitness scores of a population and return
/// the *indices* of the chosen individuals, so callers decide whether to clone,
/// borrow or move the selected individuals. Higher fitness is better.
///
/// # Examples
///
/// ```
/// use cultalg::selection::{ElitistSelection, SelectionStrategy};
/// use cultalg::rng::RandomNumberGenerator;
/// use cultalg::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![0.5, 0.8, 0.3];
///     let mut rng = RandomNumberGenerator::from_seed(0);
///
///     let selection = ElitistSelection::new();
///     let selected = selection.select(&fitness, 2, &mut rng)?;
///
///     assert_eq!(selected, vec![1, 0]);
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` indices into `fitness`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `fitness` is empty
    /// - the strategy cannot satisfy the request with the given population
    fn select(
        &self,
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>>;
}
