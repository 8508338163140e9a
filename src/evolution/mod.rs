pub mod launcher;
pub mod options;

pub use launcher::{CulturalAlgorithm, CulturalResult, Progress, RunState};
pub use options::{CulturalOptions, CulturalOptionsBuilder};
