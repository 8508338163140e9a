use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Single-point crossover.
///
/// With probability `rate`, draws a cut uniformly from `[1, N-1]` and swaps the
/// gene suffixes starting at the cut between `first` and `second`. Otherwise
/// both are left untouched, cached evaluations included. Assignments shorter
/// than two genes have no valid cut and are never changed.
///
/// Returns whether the parents were recombined.
pub fn single_point_crossover(
    first: &mut Individual,
    second: &mut Individual,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> bool {
    if !rng.chance(rate) {
        return false;
    }

    let len = first.len().min(second.len());
    if len < 2 {
        return false;
    }

    let cut = rng.gen_range_inclusive(1, len - 1);
    first.genes_mut()[cut..len].swap_with_slice(&mut second.genes_mut()[cut..len]);
    true
}
