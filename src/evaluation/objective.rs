//! # Objective
//!
//! The `Objective` enum turns a `(total_time, total_cost)` pair into a scalar
//! fitness where higher is better.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::evaluation::{Objective, WeightedObjective};
//!
//! assert_eq!(Objective::Cost.fitness(10.0, 9.0), 0.1);
//! assert_eq!(Objective::Time.fitness(4.0, 100.0), 0.2);
//!
//! let weighted = Objective::Weighted(WeightedObjective::default());
//! // 0.4 * 1000 / 1000 + 0.6 * 10000 / 10000 = 1.0
//! assert_eq!(weighted.fitness(1000.0, 10000.0), 0.5);
//! ```

use std::fmt;

/// Normalization scales and weights for the weighted objective.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedObjective {
    /// Divisor applied to the total time before weighting.
    pub time_scale: f64,
    /// Divisor applied to the total cost before weighting.
    pub cost_scale: f64,
    /// Weight of the normalized time.
    pub time_weight: f64,
    /// Weight of the normalized cost.
    pub cost_weight: f64,
}

impl Default for WeightedObjective {
    fn default() -> Self {
        Self {
            time_scale: 1000.0,
            cost_scale: 10000.0,
            time_weight: 0.4,
            cost_weight: 0.6,
        }
    }
}

/// What the algorithm minimizes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Objective {
    /// Minimize the total cost: `1 / (1 + cost)`.
    #[default]
    Cost,
    /// Minimize the total execution time: `1 / (1 + time)`.
    Time,
    /// Minimize a weighted blend of normalized time and cost.
    Weighted(WeightedObjective),
}

impl Objective {
    /// Maps a `(total_time, total_cost)` pair to a fitness in `(0, 1]` for
    /// non-negative inputs.
    pub fn fitness(&self, total_time: f64, total_cost: f64) -> f64 {
        match self {
            Objective::Cost => 1.0 / (1.0 + total_cost),
            Objective::Time => 1.0 / (1.0 + total_time),
            Objective::Weighted(w) => {
                let normalized_time = total_time / w.time_scale;
                let normalized_cost = total_cost / w.cost_scale;
                1.0 / (1.0 + w.time_weight * normalized_time + w.cost_weight * normalized_cost)
            }
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Cost => write!(f, "cost"),
            Objective::Time => write!(f, "time"),
            Objective::Weighted(_) => write!(f, "weighted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_ignores_time() {
        assert_eq!(Objective::Cost.fitness(1e9, 0.0), 1.0);
        assert_eq!(Objective::Cost.fitness(0.0, 3.0), 0.25);
    }

    #[test]
    fn test_time_ignores_cost() {
        assert_eq!(Objective::Time.fitness(0.0, 1e9), 1.0);
        assert_eq!(Objective::Time.fitness(1.0, 0.0), 0.5);
    }

    #[test]
    fn test_weighted_defaults() {
        let objective = Objective::Weighted(WeightedObjective::default());
        // 0.4 * 0.5 + 0.6 * 0.5 = 0.5
        let fitness = objective.fitness(500.0, 5000.0);
        assert!((fitness - 1.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_custom_weights() {
        let objective = Objective::Weighted(WeightedObjective {
            time_scale: 1.0,
            cost_scale: 1.0,
            time_weight: 1.0,
            cost_weight: 0.0,
        });
        assert_eq!(objective.fitness(1.0, 1000.0), 0.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Objective::Cost.to_string(), "cost");
        assert_eq!(Objective::Time.to_string(), "time");
        assert_eq!(
            Objective::Weighted(WeightedObjective::default()).to_string(),
            "weighted"
        );
    }
}
