pub mod belief;
pub mod breeding;
pub mod caching;
pub mod error;
pub mod evaluation;
pub mod evolution;
pub mod individual;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{CulturalError, OptionExt, Result, ResultExt};
pub use evaluation::{CloudEnvironment, Evaluation, FitnessEvaluator, Objective};
pub use evolution::{CulturalAlgorithm, CulturalOptions, CulturalResult};
