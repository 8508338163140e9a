use std::fmt;

use super::{NormativeKnowledge, SituationalKnowledge};
use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Chance that combined influence copies genes from the best individual.
const COMBINED_SITUATIONAL_CHANCE: f64 = 0.2;

/// How the belief space steers an offspring once influence fires for it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeliefInfluence {
    /// Copy the best individual's genes at `1..=max(1, N/3)` distinct random positions.
    #[default]
    Situational,
    /// Resample each gene, with the configured per-gene rate, from the
    /// position's normative count table.
    Normative,
    /// With a fixed 0.2 chance, a situational copy; then each gene, with the
    /// configured per-gene rate, is redrawn uniformly from the position's
    /// preferred resources.
    Combined,
}

impl BeliefInfluence {
    /// Applies the strategy to `child`.
    ///
    /// Situational influence is a no-op while no best individual is known;
    /// normative influence skips positions that have no observations yet.
    pub fn apply(
        &self,
        child: &mut Individual,
        situational: &SituationalKnowledge,
        normative: &NormativeKnowledge,
        normative_gene_rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        match self {
            BeliefInfluence::Situational => {
                copy_from_best(child, situational, rng);
                Ok(())
            }
            BeliefInfluence::Normative => {
                resample_from_norms(child, normative, normative_gene_rate, rng)
            }
            BeliefInfluence::Combined => {
                if rng.chance(COMBINED_SITUATIONAL_CHANCE) {
                    copy_from_best(child, situational, rng);
                }
                pick_preferred(child, normative, normative_gene_rate, rng);
                Ok(())
            }
        }
    }
}

impl fmt::Display for BeliefInfluence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeliefInfluence::Situational => write!(f, "situational"),
            BeliefInfluence::Normative => write!(f, "normative"),
            BeliefInfluence::Combined => write!(f, "combined"),
        }
    }
}

fn copy_from_best(
    child: &mut Individual,
    situational: &SituationalKnowledge,
    rng: &mut RandomNumberGenerator,
) {
    let Some(best) = situational.best() else {
        return;
    };

    let len = child.len().min(best.len());
    if len == 0 {
        return;
    }

    let num_genes = rng.gen_range_inclusive(1, (len / 3).max(1));
    let positions = rng.sample_indices(len, num_genes);
    let genes = child.genes_mut();
    for position in positions {
        genes[position] = best.genes()[position];
    }
}

fn resample_from_norms(
    child: &mut Individual,
    normative: &NormativeKnowledge,
    gene_rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<()> {
    let rows = child.len().min(normative.table().len());
    for position in 0..rows {
        if !rng.chance(gene_rate) || !normative.has_observations(position) {
            continue;
        }
        let resource = rng.choose_weighted(normative.counts(position))?;
        child.set_gene(position, resource);
    }
    Ok(())
}

fn pick_preferred(
    child: &mut Individual,
    normative: &NormativeKnowledge,
    gene_rate: f64,
    rng: &mut RandomNumberGenerator,
) {
    let rows = child.len().min(normative.table().len());
    for position in 0..rows {
        if !rng.chance(gene_rate) {
            continue;
        }
        let preferred = normative.preferred(position);
        if preferred.is_empty() {
            continue;
        }
        let resource = preferred[rng.gen_index(preferred.len())];
        child.set_gene(position, resource);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Evaluation;
    use crate::evaluation::{FitnessEvaluator, Objective};

    struct SumEvaluator;

    impl FitnessEvaluator for SumEvaluator {
        fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation> {
            let total: usize = assignment.iter().sum();
            Ok(Evaluation::scored(0.0, total as f64, objective))
        }

        fn num_tasks(&self) -> usize {
            6
        }

        fn num_resources(&self) -> usize {
            3
        }
    }

    fn situational_with(genes: Vec<usize>) -> SituationalKnowledge {
        let mut best = Individual::new(genes);
        best.evaluate(&SumEvaluator, &Objective::Cost).unwrap();
        let mut situational = SituationalKnowledge::new();
        situational.consider(&best).unwrap();
        situational
    }

    #[test]
    fn test_situational_copies_only_from_best() {
        let situational = situational_with(vec![0; 6]);
        let normative = NormativeKnowledge::new(6, 3);
        let mut rng = RandomNumberGenerator::from_seed(8);

        for _ in 0..100 {
            let mut child = Individual::new(vec![2; 6]);
            BeliefInfluence::Situational
                .apply(&mut child, &situational, &normative, 0.3, &mut rng)
                .unwrap();

            let copied = child.genes().iter().filter(|&&g| g == 0).count();
            // 1..=max(1, 6 / 3) genes come from the best individual.
            assert!((1..=2).contains(&copied), "copied {}", copied);
            assert!(child.genes().iter().all(|&g| g == 0 || g == 2));
        }
    }

    #[test]
    fn test_situational_without_best_is_noop() {
        let situational = SituationalKnowledge::new();
        let normative = NormativeKnowledge::new(6, 3);
        let mut rng = RandomNumberGenerator::from_seed(9);

        let mut child = Individual::new(vec![1; 6]);
        child.evaluate(&SumEvaluator, &Objective::Cost).unwrap();
        BeliefInfluence::Situational
            .apply(&mut child, &situational, &normative, 0.3, &mut rng)
            .unwrap();

        assert_eq!(child.genes(), &[1; 6]);
        assert!(child.is_evaluated());
    }

    #[test]
    fn test_normative_follows_observed_resources() {
        let situational = SituationalKnowledge::new();
        let mut normative = NormativeKnowledge::new(6, 3);
        let accepted = vec![Individual::new(vec![1; 6]), Individual::new(vec![1; 6])];
        normative.rebuild(&accepted);
        let mut rng = RandomNumberGenerator::from_seed(10);

        let mut child = Individual::new(vec![0; 6]);
        BeliefInfluence::Normative
            .apply(&mut child, &situational, &normative, 1.0, &mut rng)
            .unwrap();

        assert_eq!(child.genes(), &[1; 6]);
    }

    #[test]
    fn test_normative_without_observations_is_noop() {
        let situational = SituationalKnowledge::new();
        let normative = NormativeKnowledge::new(6, 3);
        let mut rng = RandomNumberGenerator::from_seed(11);

        let mut child = Individual::new(vec![2; 6]);
        BeliefInfluence::Normative
            .apply(&mut child, &situational, &normative, 1.0, &mut rng)
            .unwrap();

        assert_eq!(child.genes(), &[2; 6]);
    }

    #[test]
    fn test_combined_stays_within_preferred() {
        let situational = SituationalKnowledge::new();
        let mut normative = NormativeKnowledge::new(1, 2);
        let accepted = vec![
            Individual::new(vec![0]),
            Individual::new(vec![0]),
            Individual::new(vec![0]),
            Individual::new(vec![1]),
        ];
        normative.rebuild(&accepted);
        assert_eq!(normative.preferred(0), vec![0]);
        let mut rng = RandomNumberGenerator::from_seed(13);

        for _ in 0..1000 {
            let mut child = Individual::new(vec![1]);
            BeliefInfluence::Combined
                .apply(&mut child, &situational, &normative, 1.0, &mut rng)
                .unwrap();
            assert_eq!(child.genes(), &[0]);
        }
    }

    #[test]
    fn test_combined_without_observations_draws_any_resource() {
        let situational = SituationalKnowledge::new();
        let normative = NormativeKnowledge::new(6, 3);
        let mut rng = RandomNumberGenerator::from_seed(14);

        let mut seen = [false; 3];
        for _ in 0..100 {
            let mut child = Individual::new(vec![2; 6]);
            BeliefInfluence::Combined
                .apply(&mut child, &situational, &normative, 1.0, &mut rng)
                .unwrap();
            for &g in child.genes() {
                seen[g] = true;
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_combined_copies_from_best_occasionally() {
        let situational = situational_with(vec![0; 6]);
        let normative = NormativeKnowledge::new(6, 3);
        let mut rng = RandomNumberGenerator::from_seed(15);

        let trials = 2000;
        let copied = (0..trials)
            .filter(|_| {
                let mut child = Individual::new(vec![2; 6]);
                BeliefInfluence::Combined
                    .apply(&mut child, &situational, &normative, 0.0, &mut rng)
                    .unwrap();
                child.genes().contains(&0)
            })
            .count();

        let share = copied as f64 / trials as f64;
        assert!((0.15..0.25).contains(&share), "copied in {} of runs", share);
    }

    #[test]
    fn test_combined_applies_both() {
        let situational = situational_with(vec![0; 6]);
        let mut normative = NormativeKnowledge::new(6, 3);
        normative.rebuild(&[Individual::new(vec![1; 6])]);
        let mut rng = RandomNumberGenerator::from_seed(12);

        let mut child = Individual::new(vec![2; 6]);
        BeliefInfluence::Combined
            .apply(&mut child, &situational, &normative, 1.0, &mut rng)
            .unwrap();

        // Preferred-resource picks at rate 1.0 run last and override every gene.
        assert_eq!(child.genes(), &[1; 6]);
    }
}
