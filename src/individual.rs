//! # Individual
//!
//! An `Individual` is one candidate solution in the population space: an
//! assignment of one resource index per task, plus the evaluation computed for
//! that assignment.
//!
//! The evaluation is cached. Every operation that changes a gene clears the
//! cache, and reading the fitness of an individual that has not been evaluated
//! since its last change is an error rather than a stale value.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::evaluation::{CloudEnvironment, Objective, Resource, Task};
//! use cultalg::individual::Individual;
//!
//! let env = CloudEnvironment::new(
//!     vec![Task::new(0, 100.0), Task::new(1, 50.0)],
//!     vec![Resource::new(0, 10.0, 1.0), Resource::new(1, 25.0, 4.0)],
//! )
//! .unwrap();
//!
//! let mut individual = Individual::new(vec![0, 1]);
//! assert!(!individual.is_evaluated());
//!
//! let evaluation = individual.evaluate(&env, &Objective::Cost).unwrap();
//! assert_eq!(individual.fitness().unwrap(), evaluation.fitness);
//!
//! individual.set_gene(1, 0);
//! assert!(individual.fitness().is_err());
//! ```

use crate::error::{CulturalError, Result};
use crate::evaluation::{Evaluation, FitnessEvaluator, Objective};
use crate::rng::RandomNumberGenerator;

/// One resource index per task position.
pub type Assignment = Vec<usize>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    assignment: Assignment,
    evaluation: Option<Evaluation>,
}

impl Individual {
    /// Wraps an existing assignment. The individual starts unevaluated.
    pub fn new(assignment: Assignment) -> Self {
        Self {
            assignment,
            evaluation: None,
        }
    }

    /// Creates an individual whose genes are drawn uniformly from `[0, num_resources)`.
    pub fn random(num_tasks: usize, num_resources: usize, rng: &mut RandomNumberGenerator) -> Self {
        let assignment = (0..num_tasks).map(|_| rng.gen_index(num_resources)).collect();
        Self::new(assignment)
    }

    pub fn genes(&self) -> &[usize] {
        &self.assignment
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Overwrites the gene at `position` and clears the cached evaluation.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn set_gene(&mut self, position: usize, resource: usize) {
        self.assignment[position] = resource;
        self.evaluation = None;
    }

    /// Mutable access to the genes. The cached evaluation is cleared up front.
    pub(crate) fn genes_mut(&mut self) -> &mut [usize] {
        self.evaluation = None;
        &mut self.assignment
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    /// Evaluates the assignment, or returns the cached evaluation if the
    /// genes have not changed since the last call.
    ///
    /// # Errors
    ///
    /// Propagates evaluator errors unchanged and returns `FitnessCalculation`
    /// if the evaluator produced a non-finite value.
    pub fn evaluate<E>(&mut self, evaluator: &E, objective: &Objective) -> Result<Evaluation>
    where
        E: FitnessEvaluator + ?Sized,
    {
        if let Some(evaluation) = self.evaluation {
            return Ok(evaluation);
        }

        let evaluation = evaluator.evaluate(&self.assignment, objective)?;
        if !evaluation.fitness.is_finite()
            || !evaluation.total_time.is_finite()
            || !evaluation.total_cost.is_finite()
        {
            return Err(CulturalError::FitnessCalculation(format!(
                "Non-finite evaluation {:?} for assignment {:?}",
                evaluation, self.assignment
            )));
        }

        self.evaluation = Some(evaluation);
        Ok(evaluation)
    }

    /// The cached evaluation.
    ///
    /// # Errors
    ///
    /// Returns `NotEvaluated` if the genes changed since the last evaluation.
    pub fn evaluation(&self) -> Result<Evaluation> {
        self.evaluation.ok_or(CulturalError::NotEvaluated)
    }

    /// Shorthand for `evaluation()?.fitness`.
    pub fn fitness(&self) -> Result<f64> {
        self.evaluation().map(|e| e.fitness)
    }

    /// Consumes the individual and returns its assignment.
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }
}
