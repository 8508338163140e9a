//! # Belief Space
//!
//! The belief space holds the cultural knowledge extracted from the population
//! and feeds it back into reproduction:
//!
//! - **Situational knowledge**: the best individual found so far.
//! - **Normative knowledge**: per task position, how often each resource
//!   appears among the accepted (top-ranked) individuals.
//! - **Domain knowledge**: mean and variance of fitness and a resource-usage
//!   histogram over the whole population.
//!
//! It is updated once per generation from the accepted slice of the
//! just-evaluated population and consulted through [`BeliefSpace::influence`]
//! while offspring are produced.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::belief::BeliefSpace;
//! use cultalg::evaluation::{CloudEnvironment, Objective, Resource, Task};
//! use cultalg::individual::Individual;
//!
//! let env = CloudEnvironment::new(
//!     vec![Task::new(0, 10.0), Task::new(1, 10.0)],
//!     vec![Resource::new(0, 1.0, 1.0), Resource::new(1, 1.0, 2.0)],
//! )
//! .unwrap();
//!
//! let mut population = vec![Individual::new(vec![0, 0]), Individual::new(vec![1, 1])];
//! for individual in &mut population {
//!     individual.evaluate(&env, &Objective::Cost).unwrap();
//! }
//!
//! let mut belief = BeliefSpace::new(2, 2);
//! belief.update(&population, &population[..1]).unwrap();
//!
//! assert_eq!(belief.best().unwrap().genes(), &[0, 0]);
//! assert_eq!(belief.normative().most_common(0), Some(0));
//! assert_eq!(belief.domain().resource_usage, vec![2, 2]);
//! ```

pub mod domain;
pub mod influence;
pub mod normative;
pub mod situational;

pub use domain::DomainKnowledge;
pub use influence::BeliefInfluence;
pub use normative::NormativeKnowledge;
pub use situational::SituationalKnowledge;

use tracing::trace;

use crate::error::{CulturalError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefSpace {
    situational: SituationalKnowledge,
    normative: NormativeKnowledge,
    domain: DomainKnowledge,
}

impl BeliefSpace {
    pub fn new(num_tasks: usize, num_resources: usize) -> Self {
        Self {
            situational: SituationalKnowledge::new(),
            normative: NormativeKnowledge::new(num_tasks, num_resources),
            domain: DomainKnowledge::new(num_resources),
        }
    }

    /// Folds one evaluated generation into the belief space.
    ///
    /// `accepted` must be the top-ranked slice of `population`, best first.
    /// Situational knowledge only changes if `accepted[0]` strictly beats the
    /// current best; normative knowledge is rebuilt from `accepted`; domain
    /// knowledge is recomputed from the whole `population`.
    ///
    /// Returns whether a new best individual was recorded.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if either slice is empty and `NotEvaluated`
    /// if any individual lacks an evaluation. The belief space is left
    /// untouched on error.
    pub fn update(&mut self, population: &[Individual], accepted: &[Individual]) -> Result<bool> {
        let leader = accepted.first().ok_or(CulturalError::EmptyPopulation)?;
        for individual in accepted {
            individual.fitness()?;
        }

        let mut domain = self.domain.clone();
        domain.recompute(population)?;

        let improved = self.situational.consider(leader)?;
        self.normative.rebuild(accepted);
        self.domain = domain;

        trace!(
            accepted = accepted.len(),
            improved,
            best_fitness = self.situational.best_fitness(),
            mean_fitness = self.domain.mean_fitness,
            "belief space updated"
        );

        Ok(improved)
    }

    /// The best individual seen so far.
    pub fn best(&self) -> Option<&Individual> {
        self.situational.best()
    }

    /// Fitness of the best individual, or negative infinity before the first update.
    pub fn best_fitness(&self) -> f64 {
        self.situational.best_fitness()
    }

    pub fn situational(&self) -> &SituationalKnowledge {
        &self.situational
    }

    pub fn normative(&self) -> &NormativeKnowledge {
        &self.normative
    }

    pub fn domain(&self) -> &DomainKnowledge {
        &self.domain
    }

    /// With probability `influence_rate`, applies `strategy` to `child`.
    ///
    /// Returns whether influence fired.
    pub fn influence(
        &self,
        child: &mut Individual,
        strategy: BeliefInfluence,
        influence_rate: f64,
        normative_gene_rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<bool> {
        if !rng.chance(influence_rate) {
            return Ok(false);
        }

        strategy.apply(
            child,
            &self.situational,
            &self.normative,
            normative_gene_rate,
            rng,
        )?;
        Ok(true)
    }
}
