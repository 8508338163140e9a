//! # Error Types
//!
//! This module defines the error type shared by every part of the cultural
//! algorithm: option validation, fitness evaluation, selection and the
//! generational loop.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use cultalg::error::{CulturalError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(CulturalError::Configuration(format!(
//!             "Rate must be within [0, 1], got {}",
//!             rate
//!         )));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use cultalg::error::{CulturalError, OptionExt};
//!
//! fn first_fitness(fitness: &[f64]) -> cultalg::error::Result<f64> {
//!     fitness.first().copied().ok_or_else_cultural(|| CulturalError::EmptyPopulation)
//! }
//!
//! assert!(first_fitness(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while running a cultural algorithm.
#[derive(Error, Debug)]
pub enum CulturalError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the fitness of an individual is read before it was evaluated.
    #[error("Individual has not been evaluated since its last modification")]
    NotEvaluated,

    /// Error that occurs when a fitness evaluation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when an assignment references a task or resource that does not exist.
    #[error("Bounds error: {0}")]
    OutOfBounds(String),

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when a random number generation fails.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for cultural algorithm operations.
pub type Result<T> = std::result::Result<T, CulturalError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use cultalg::error::ResultExt;
///
/// fn parse_size(raw: &str) -> cultalg::error::Result<usize> {
///     raw.parse::<usize>().context("Failed to parse population size")
/// }
///
/// assert!(parse_size("20").is_ok());
/// assert!(parse_size("twenty").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `CulturalError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| CulturalError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, CulturalError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_cultural<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> CulturalError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_cultural<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> CulturalError,
    {
        self.ok_or_else(err_fn)
    }
}
