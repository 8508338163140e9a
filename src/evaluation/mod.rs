//! # Fitness Evaluation
//!
//! The `FitnessEvaluator` trait is the boundary between the cultural algorithm
//! and the problem it optimizes. An evaluator turns an assignment (one resource
//! index per task) into an [`Evaluation`]: the total execution time, the total
//! cost and a scalar fitness where higher is better.
//!
//! Evaluators must be deterministic and free of side effects. They are shared
//! across rayon worker threads when the population is large enough, hence the
//! `Send + Sync` bound.

pub mod cloud;
pub mod objective;

pub use cloud::{CloudEnvironment, Resource, Task};
pub use objective::{Objective, WeightedObjective};

use crate::error::Result;

/// The result of evaluating one assignment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Sum of the execution times of every task.
    pub total_time: f64,
    /// Sum of the execution costs of every task.
    pub total_cost: f64,
    /// Scalar score derived from time and cost by the objective; higher is better.
    pub fitness: f64,
}

impl Evaluation {
    /// Builds an evaluation by scoring `total_time` and `total_cost` with `objective`.
    pub fn scored(total_time: f64, total_cost: f64, objective: &Objective) -> Self {
        Self {
            total_time,
            total_cost,
            fitness: objective.fitness(total_time, total_cost),
        }
    }
}

/// Trait for types that score task-to-resource assignments.
pub trait FitnessEvaluator: Send + Sync {
    /// Evaluates `assignment` under `objective`.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment cannot be scored, for example when it
    /// references a resource the evaluator does not know about.
    fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation>;

    /// The number of tasks (genes per assignment).
    fn num_tasks(&self) -> usize;

    /// The number of resources (valid gene values are `0..num_resources`).
    fn num_resources(&self) -> usize;
}

impl<E: FitnessEvaluator + ?Sized> FitnessEvaluator for &E {
    fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation> {
        (**self).evaluate(assignment, objective)
    }

    fn num_tasks(&self) -> usize {
        (**self).num_tasks()
    }

    fn num_resources(&self) -> usize {
        (**self).num_resources()
    }
}

impl<E: FitnessEvaluator + ?Sized> FitnessEvaluator for Box<E> {
    fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation> {
        (**self).evaluate(assignment, objective)
    }

    fn num_tasks(&self) -> usize {
        (**self).num_tasks()
    }

    fn num_resources(&self) -> usize {
        (**self).num_resources()
    }
}
