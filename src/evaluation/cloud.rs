//! # CloudEnvironment
//!
//! A `FitnessEvaluator` for the cloud allocation model: every task has a
//! length, every resource a processing speed and a cost per time unit. A task
//! placed on a resource runs for `length / speed` time units and costs
//! `time * cost`. Resources have unlimited concurrent capacity, so the totals
//! are plain sums over tasks.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::evaluation::{CloudEnvironment, FitnessEvaluator, Objective, Resource, Task};
//!
//! let env = CloudEnvironment::new(
//!     vec![Task::new(0, 120.0), Task::new(1, 200.0), Task::new(2, 150.0)],
//!     vec![Resource::new(0, 10.0, 5.0), Resource::new(1, 20.0, 8.0)],
//! )
//! .unwrap();
//!
//! let evaluation = env.evaluate(&[0, 1, 0], &Objective::Cost).unwrap();
//! // 12 + 10 + 15 time units, 60 + 80 + 75 cost units
//! assert_eq!(evaluation.total_time, 37.0);
//! assert_eq!(evaluation.total_cost, 215.0);
//! ```

use super::{Evaluation, FitnessEvaluator, Objective};
use crate::error::{CulturalError, Result};

/// A unit of work with a processing requirement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    pub id: usize,
    pub length: f64,
}

impl Task {
    pub fn new(id: usize, length: f64) -> Self {
        Self { id, length }
    }
}

/// A cloud resource with a processing speed (units per time) and a cost per time unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resource {
    pub id: usize,
    pub speed: f64,
    pub cost: f64,
}

impl Resource {
    pub fn new(id: usize, speed: f64, cost: f64) -> Self {
        Self { id, speed, cost }
    }
}

/// A fixed set of tasks and resources.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEnvironment {
    tasks: Vec<Task>,
    resources: Vec<Resource>,
}

impl CloudEnvironment {
    /// Creates an environment after checking that every task length and
    /// resource attribute can produce a finite, non-negative time and cost.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumericValue` for a negative or non-finite length, a
    /// non-positive or non-finite speed, or a negative or non-finite cost.
    pub fn new(tasks: Vec<Task>, resources: Vec<Resource>) -> Result<Self> {
        if let Some(task) = tasks
            .iter()
            .find(|t| !t.length.is_finite() || t.length < 0.0)
        {
            return Err(CulturalError::InvalidNumericValue(format!(
                "Task {} has invalid length {}",
                task.id, task.length
            )));
        }

        for resource in &resources {
            if !resource.speed.is_finite() || resource.speed <= 0.0 {
                return Err(CulturalError::InvalidNumericValue(format!(
                    "Resource {} has invalid speed {}",
                    resource.id, resource.speed
                )));
            }
            if !resource.cost.is_finite() || resource.cost < 0.0 {
                return Err(CulturalError::InvalidNumericValue(format!(
                    "Resource {} has invalid cost {}",
                    resource.id, resource.cost
                )));
            }
        }

        Ok(Self { tasks, resources })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Computes `(total_time, total_cost)` for `assignment`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the assignment length differs from the number
    /// of tasks or a gene names a resource that does not exist.
    pub fn simulate(&self, assignment: &[usize]) -> Result<(f64, f64)> {
        if assignment.len() != self.tasks.len() {
            return Err(CulturalError::OutOfBounds(format!(
                "Assignment has {} genes but the environment has {} tasks",
                assignment.len(),
                self.tasks.len()
            )));
        }

        let mut total_time = 0.0;
        let mut total_cost = 0.0;

        for (task, &resource_idx) in self.tasks.iter().zip(assignment) {
            let resource = self.resources.get(resource_idx).ok_or_else(|| {
                CulturalError::OutOfBounds(format!(
                    "Task {} is assigned to resource {} but only {} resources exist",
                    task.id,
                    resource_idx,
                    self.resources.len()
                ))
            })?;

            let execution_time = task.length / resource.speed;
            total_time += execution_time;
            total_cost += execution_time * resource.cost;
        }

        Ok((total_time, total_cost))
    }
}

impl FitnessEvaluator for CloudEnvironment {
    fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation> {
        let (total_time, total_cost) = self.simulate(assignment)?;
        Ok(Evaluation::scored(total_time, total_cost, objective))
    }

    fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    fn num_resources(&self) -> usize {
        self.resources.len()
    }
}
