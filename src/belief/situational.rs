use crate::error::Result;
use crate::individual::Individual;

/// The best individual observed so far in the run.
///
/// The stored fitness only ever increases: a candidate replaces the current
/// best only when it is strictly better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SituationalKnowledge {
    best: Option<Individual>,
}

impl SituationalKnowledge {
    pub fn new() -> Self {
        Self { best: None }
    }

    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Fitness of the best individual, or negative infinity before the first update.
    pub fn best_fitness(&self) -> f64 {
        self.best
            .as_ref()
            .and_then(|b| b.fitness().ok())
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Stores a clone of `candidate` if it beats the current best.
    ///
    /// Returns whether the best changed.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` if `candidate` has no cached evaluation.
    pub fn consider(&mut self, candidate: &Individual) -> Result<bool> {
        let fitness = candidate.fitness()?;
        if fitness > self.best_fitness() {
            self.best = Some(candidate.clone());
            return Ok(true);
        }
        Ok(false)
    }
}
