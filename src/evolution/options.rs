//! # CulturalOptions
//!
//! The `CulturalOptions` struct holds every parameter of a cultural algorithm
//! run. It is created once, validated when the driver is constructed, and
//! passed by reference to every stage of the generational loop.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::belief::BeliefInfluence;
//! use cultalg::evaluation::Objective;
//! use cultalg::evolution::options::CulturalOptions;
//!
//! let options = CulturalOptions::builder()
//!     .population_size(30)
//!     .max_generations(50)
//!     .objective(Objective::Time)
//!     .influence(BeliefInfluence::Combined)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_population_size(), 30);
//!
//! // Defaults
//! let default_options = CulturalOptions::default();
//! assert_eq!(default_options.get_tournament_size(), 3);
//! ```

use crate::belief::BeliefInfluence;
use crate::error::{CulturalError, Result};
use crate::evaluation::Objective;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CulturalOptions {
    population_size: usize,
    max_generations: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elitism_count: usize,
    acceptance_rate: f64,
    influence_rate: f64,
    tournament_size: usize,
    objective: Objective,
    influence: BeliefInfluence,
    /// Per-gene probability used by normative influence
    normative_gene_rate: f64,
    /// Stop after this many generations without improvement
    stagnation_limit: Option<usize>,
    /// Minimum population size for parallel evaluation
    parallel_threshold: usize,
}

impl CulturalOptions {
    /// Returns a builder for creating a `CulturalOptions` instance.
    pub fn builder() -> CulturalOptionsBuilder {
        CulturalOptionsBuilder::default()
    }

    /// Checks every option against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(CulturalError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }

        if self.max_generations < 1 {
            return Err(CulturalError::Configuration(
                "Maximum number of generations must be at least 1".to_string(),
            ));
        }

        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("influence_rate", self.influence_rate)?;
        check_probability("normative_gene_rate", self.normative_gene_rate)?;

        if !(self.acceptance_rate > 0.0 && self.acceptance_rate <= 1.0) {
            return Err(CulturalError::Configuration(format!(
                "acceptance_rate must be within (0, 1], got {}",
                self.acceptance_rate
            )));
        }

        if self.elitism_count >= self.population_size {
            return Err(CulturalError::Configuration(format!(
                "Elitism count ({}) must be smaller than the population size ({})",
                self.elitism_count, self.population_size
            )));
        }

        if self.tournament_size < 1 || self.tournament_size > self.population_size {
            return Err(CulturalError::Configuration(format!(
                "Tournament size ({}) must be within [1, {}]",
                self.tournament_size, self.population_size
            )));
        }

        if self.stagnation_limit == Some(0) {
            return Err(CulturalError::Configuration(
                "Stagnation limit must be at least 1 when set".to_string(),
            ));
        }

        if let Objective::Weighted(w) = &self.objective {
            let all_finite = [w.time_scale, w.cost_scale, w.time_weight, w.cost_weight]
                .iter()
                .all(|v| v.is_finite());
            if !all_finite
                || w.time_scale <= 0.0
                || w.cost_scale <= 0.0
                || w.time_weight < 0.0
                || w.cost_weight < 0.0
            {
                return Err(CulturalError::Configuration(format!(
                    "Weighted objective needs finite non-negative weights and positive scales, got {:?}",
                    w
                )));
            }
        }

        Ok(())
    }

    /// Size of the accepted slice that updates the belief space:
    /// `ceil(acceptance_rate * population_size)`, at least 1.
    ///
    /// The product is reduced by four ulps before rounding up, so float
    /// representation error such as `0.1 * 30 = 3.0000000000000004` yields 3.
    /// Any larger excess over a whole number still rounds up.
    pub fn acceptance_count(&self) -> usize {
        let raw = self.acceptance_rate * self.population_size as f64;
        let count = (raw - raw * 4.0 * f64::EPSILON).ceil();
        (count.max(1.0) as usize).min(self.population_size)
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_elitism_count(&self) -> usize {
        self.elitism_count
    }

    pub fn get_acceptance_rate(&self) -> f64 {
        self.acceptance_rate
    }

    pub fn get_influence_rate(&self) -> f64 {
        self.influence_rate
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_objective(&self) -> &Objective {
        &self.objective
    }

    pub fn get_influence(&self) -> BeliefInfluence {
        self.influence
    }

    pub fn get_normative_gene_rate(&self) -> f64 {
        self.normative_gene_rate
    }

    pub fn get_stagnation_limit(&self) -> Option<usize> {
        self.stagnation_limit
    }

    /// Returns the minimum population size evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    pub fn set_elitism_count(&mut self, elitism_count: usize) {
        self.elitism_count = elitism_count;
    }

    pub fn set_acceptance_rate(&mut self, acceptance_rate: f64) {
        self.acceptance_rate = acceptance_rate;
    }

    pub fn set_influence_rate(&mut self, influence_rate: f64) {
        self.influence_rate = influence_rate;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    pub fn set_influence(&mut self, influence: BeliefInfluence) {
        self.influence = influence;
    }

    pub fn set_normative_gene_rate(&mut self, normative_gene_rate: f64) {
        self.normative_gene_rate = normative_gene_rate;
    }

    pub fn set_stagnation_limit(&mut self, stagnation_limit: Option<usize>) {
        self.stagnation_limit = stagnation_limit;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CulturalError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

impl Default for CulturalOptions {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elitism_count: 2,
            acceptance_rate: 0.2,
            influence_rate: 0.3,
            tournament_size: 3,
            objective: Objective::Cost,
            influence: BeliefInfluence::Situational,
            normative_gene_rate: 0.3,
            stagnation_limit: None,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `CulturalOptions`.
///
/// Unset fields fall back to `CulturalOptions::default()`. The builder does not
/// validate; the driver does.
#[derive(Debug, Clone, Default)]
pub struct CulturalOptionsBuilder {
    population_size: Option<usize>,
    max_generations: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    elitism_count: Option<usize>,
    acceptance_rate: Option<f64>,
    influence_rate: Option<f64>,
    tournament_size: Option<usize>,
    objective: Option<Objective>,
    influence: Option<BeliefInfluence>,
    normative_gene_rate: Option<f64>,
    stagnation_limit: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl CulturalOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn elitism_count(mut self, value: usize) -> Self {
        self.elitism_count = Some(value);
        self
    }

    pub fn acceptance_rate(mut self, value: f64) -> Self {
        self.acceptance_rate = Some(value);
        self
    }

    pub fn influence_rate(mut self, value: f64) -> Self {
        self.influence_rate = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn objective(mut self, value: Objective) -> Self {
        self.objective = Some(value);
        self
    }

    /// Sets the belief influence strategy.
    pub fn influence(mut self, value: BeliefInfluence) -> Self {
        self.influence = Some(value);
        self
    }

    pub fn normative_gene_rate(mut self, value: f64) -> Self {
        self.normative_gene_rate = Some(value);
        self
    }

    /// Enables early stopping after `value` generations without improvement.
    pub fn stagnation_limit(mut self, value: usize) -> Self {
        self.stagnation_limit = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `CulturalOptions` instance.
    pub fn build(self) -> CulturalOptions {
        let default = CulturalOptions::default();
        CulturalOptions {
            population_size: self.population_size.unwrap_or(default.population_size),
            max_generations: self.max_generations.unwrap_or(default.max_generations),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            crossover_rate: self.crossover_rate.unwrap_or(default.crossover_rate),
            elitism_count: self.elitism_count.unwrap_or(default.elitism_count),
            acceptance_rate: self.acceptance_rate.unwrap_or(default.acceptance_rate),
            influence_rate: self.influence_rate.unwrap_or(default.influence_rate),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            objective: self.objective.unwrap_or(default.objective),
            influence: self.influence.unwrap_or(default.influence),
            normative_gene_rate: self
                .normative_gene_rate
                .unwrap_or(default.normative_gene_rate),
            stagnation_limit: self.stagnation_limit.or(default.stagnation_limit),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::WeightedObjective;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CulturalOptions::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let options = CulturalOptions::builder()
            .population_size(20)
            .mutation_rate(0.0)
            .stagnation_limit(5)
            .build();

        assert_eq!(options.get_population_size(), 20);
        assert_eq!(options.get_mutation_rate(), 0.0);
        assert_eq!(options.get_stagnation_limit(), Some(5));
        assert_eq!(options.get_crossover_rate(), 0.8);
        assert_eq!(options.get_influence(), BeliefInfluence::Situational);
    }

    fn expect_configuration_error(options: CulturalOptions) {
        assert!(matches!(
            options.validate(),
            Err(CulturalError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_small_population() {
        expect_configuration_error(
            CulturalOptions::builder()
                .population_size(1)
                .elitism_count(0)
                .tournament_size(1)
                .build(),
        );
    }

    #[test]
    fn test_rejects_zero_generations() {
        expect_configuration_error(CulturalOptions::builder().max_generations(0).build());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        expect_configuration_error(CulturalOptions::builder().mutation_rate(1.5).build());
        expect_configuration_error(CulturalOptions::builder().crossover_rate(-0.1).build());
        expect_configuration_error(CulturalOptions::builder().influence_rate(f64::NAN).build());
        expect_configuration_error(CulturalOptions::builder().acceptance_rate(0.0).build());
        expect_configuration_error(CulturalOptions::builder().acceptance_rate(1.01).build());
    }

    #[test]
    fn test_rejects_elitism_not_below_population() {
        expect_configuration_error(
            CulturalOptions::builder()
                .population_size(10)
                .elitism_count(10)
                .build(),
        );
    }

    #[test]
    fn test_tournament_bounds() {
        expect_configuration_error(
            CulturalOptions::builder()
                .population_size(4)
                .tournament_size(5)
                .build(),
        );
        expect_configuration_error(CulturalOptions::builder().tournament_size(0).build());
        assert!(CulturalOptions::builder()
            .tournament_size(1)
            .build()
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_zero_stagnation_limit() {
        expect_configuration_error(CulturalOptions::builder().stagnation_limit(0).build());
    }

    #[test]
    fn test_rejects_degenerate_weighted_objective() {
        let objective = Objective::Weighted(WeightedObjective {
            time_scale: 0.0,
            ..WeightedObjective::default()
        });
        expect_configuration_error(CulturalOptions::builder().objective(objective).build());

        let negative_time = Objective::Weighted(WeightedObjective {
            time_weight: -1.0,
            ..WeightedObjective::default()
        });
        expect_configuration_error(CulturalOptions::builder().objective(negative_time).build());

        let negative_cost = Objective::Weighted(WeightedObjective {
            cost_weight: -0.5,
            ..WeightedObjective::default()
        });
        expect_configuration_error(CulturalOptions::builder().objective(negative_cost).build());

        let zero_time = Objective::Weighted(WeightedObjective {
            time_weight: 0.0,
            ..WeightedObjective::default()
        });
        assert!(CulturalOptions::builder()
            .objective(zero_time)
            .build()
            .validate()
            .is_ok());
    }

    #[test]
    fn test_setters_round_trip() {
        let mut options = CulturalOptions::default();
        options.set_acceptance_rate(0.5);
        options.set_influence_rate(0.9);
        options.set_tournament_size(4);
        options.set_influence(BeliefInfluence::Combined);
        options.set_normative_gene_rate(0.6);

        assert_eq!(options.get_acceptance_rate(), 0.5);
        assert_eq!(options.get_influence_rate(), 0.9);
        assert_eq!(options.get_tournament_size(), 4);
        assert_eq!(options.get_influence(), BeliefInfluence::Combined);
        assert_eq!(options.get_normative_gene_rate(), 0.6);
        assert!(options.validate().is_ok());

        options.set_tournament_size(0);
        expect_configuration_error(options);
    }

    #[test]
    fn test_acceptance_count() {
        let count = |rate: f64, size: usize| {
            CulturalOptions::builder()
                .population_size(size)
                .acceptance_rate(rate)
                .build()
                .acceptance_count()
        };

        assert_eq!(count(0.2, 20), 4);
        assert_eq!(count(0.1, 30), 3);
        assert_eq!(count(0.25, 10), 3);
        assert_eq!(count(0.01, 10), 1);
        assert_eq!(count(1.0, 7), 7);
        // A genuine excess over a whole number rounds up, however small.
        assert_eq!(count(0.3 + 1e-11, 10), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_json() {
        let options = CulturalOptions::builder()
            .objective(Objective::Weighted(WeightedObjective::default()))
            .build();
        let json = serde_json::to_string(&options).unwrap();
        let parsed: CulturalOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, options);
    }
}
