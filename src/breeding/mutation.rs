use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Random-reset mutation.
///
/// With probability `rate`, picks between 1 and `max(1, N/4)` distinct
/// positions and redraws each gene uniformly from `[0, num_resources)`. The new
/// value may equal the old one.
///
/// Returns whether the individual was touched.
pub fn random_reset_mutation(
    individual: &mut Individual,
    rate: f64,
    num_resources: usize,
    rng: &mut RandomNumberGenerator,
) -> bool {
    if !rng.chance(rate) || individual.is_empty() || num_resources == 0 {
        return false;
    }

    let len = individual.len();
    let num_genes = rng.gen_range_inclusive(1, (len / 4).max(1));
    let positions = rng.sample_indices(len, num_genes);

    let genes = individual.genes_mut();
    for position in positions {
        genes[position] = rng.gen_index(num_resources);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genes_stay_in_range() {
        let mut rng = RandomNumberGenerator::from_seed(31);
        let mut individual = Individual::new(vec![0; 20]);
        for _ in 0..200 {
            random_reset_mutation(&mut individual, 1.0, 3, &mut rng);
            assert_eq!(individual.len(), 20);
            assert!(individual.genes().iter().all(|&g| g < 3));
        }
    }

    #[test]
    fn test_changes_at_most_a_quarter() {
        let mut rng = RandomNumberGenerator::from_seed(32);
        for _ in 0..200 {
            let mut individual = Individual::new(vec![usize::MAX; 12]);
            assert!(random_reset_mutation(&mut individual, 1.0, 4, &mut rng));
            let changed = individual
                .genes()
                .iter()
                .filter(|&&g| g != usize::MAX)
                .count();
            assert!((1..=3).contains(&changed), "changed {}", changed);
        }
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = RandomNumberGenerator::from_seed(33);
        let mut individual = Individual::new(vec![1, 1, 1, 1]);
        for _ in 0..100 {
            assert!(!random_reset_mutation(&mut individual, 0.0, 5, &mut rng));
        }
        assert_eq!(individual.genes(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_short_assignment_mutates_one_gene() {
        let mut rng = RandomNumberGenerator::from_seed(34);
        for _ in 0..100 {
            let mut individual = Individual::new(vec![usize::MAX; 3]);
            random_reset_mutation(&mut individual, 1.0, 2, &mut rng);
            let changed = individual
                .genes()
                .iter()
                .filter(|&&g| g != usize::MAX)
                .count();
            assert_eq!(changed, 1);
        }
    }
}
