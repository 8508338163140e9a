//! # Caching Module
//!
//! Memoizing wrappers around a [`FitnessEvaluator`]. An individual already
//! caches its own evaluation until its genes change, but crossover and
//! influence regularly recreate assignments that were scored in earlier
//! generations. Wrapping an expensive evaluator in a cache skips those repeat
//! evaluations.
//!
//! Two flavours exist:
//!
//! - [`CachedEvaluator`]: one mutex-protected map shared by every thread.
//! - [`ThreadLocalCachedEvaluator`]: one map per thread, no contention, useful
//!   when populations are large enough to be evaluated in parallel.
//!
//! Entries are keyed by the assignment and the objective, so one cache can
//! serve runs with different objectives.
//!
//! ## Example
//!
//! ```rust
//! use cultalg::caching::CachingEvaluator;
//! use cultalg::evaluation::{CloudEnvironment, FitnessEvaluator, Objective, Resource, Task};
//!
//! let env = CloudEnvironment::new(
//!     vec![Task::new(0, 100.0)],
//!     vec![Resource::new(0, 10.0, 2.0)],
//! )
//! .unwrap();
//!
//! let cached = env.with_global_cache();
//! let first = cached.evaluate(&[0], &Objective::Cost).unwrap();
//! let second = cached.evaluate(&[0], &Objective::Cost).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(cached.cache_size().unwrap(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{CulturalError, Result};
use crate::evaluation::{Evaluation, FitnessEvaluator, Objective};

/// Which cache to put in front of an evaluator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheType {
    /// A single cache shared by all threads.
    Global,
    /// One cache per thread.
    ThreadLocal,
}

/// Hashable identity of an objective; weights are compared bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ObjectiveKey {
    Cost,
    Time,
    Weighted([u64; 4]),
}

impl From<&Objective> for ObjectiveKey {
    fn from(objective: &Objective) -> Self {
        match objective {
            Objective::Cost => ObjectiveKey::Cost,
            Objective::Time => ObjectiveKey::Time,
            Objective::Weighted(w) => ObjectiveKey::Weighted([
                w.time_scale.to_bits(),
                w.cost_scale.to_bits(),
                w.time_weight.to_bits(),
                w.cost_weight.to_bits(),
            ]),
        }
    }
}

type CacheKey = (Vec<usize>, ObjectiveKey);

/// An evaluator wrapper backed by one shared, mutex-protected cache.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    evaluator: E,
    cache: Arc<Mutex<HashMap<CacheKey, Evaluation>>>,
}

impl<E> CachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CacheKey, Evaluation>>> {
        self.cache
            .lock()
            .map_err(|_| CulturalError::Other("Evaluation cache lock poisoned".to_string()))
    }

    /// Returns the number of cached evaluations.
    pub fn cache_size(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

impl<E> FitnessEvaluator for CachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation> {
        let key = (assignment.to_vec(), ObjectiveKey::from(objective));

        if let Some(evaluation) = self.lock()?.get(&key) {
            return Ok(*evaluation);
        }

        // The lock is released while the inner evaluator runs.
        let evaluation = self.evaluator.evaluate(assignment, objective)?;
        self.lock()?.insert(key, evaluation);
        Ok(evaluation)
    }

    fn num_tasks(&self) -> usize {
        self.evaluator.num_tasks()
    }

    fn num_resources(&self) -> usize {
        self.evaluator.num_resources()
    }
}

/// A per-thread evaluation cache.
#[derive(Debug, Default)]
pub struct ThreadLocalCache {
    cache: thread_local::ThreadLocal<RefCell<HashMap<CacheKey, Evaluation>>>,
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self {
            cache: thread_local::ThreadLocal::new(),
        }
    }

    fn local(&self) -> &RefCell<HashMap<CacheKey, Evaluation>> {
        self.cache.get_or(|| RefCell::new(HashMap::new()))
    }

    fn get(&self, key: &CacheKey) -> Option<Evaluation> {
        self.local().borrow().get(key).copied()
    }

    fn insert(&self, key: CacheKey, value: Evaluation) {
        self.local().borrow_mut().insert(key, value);
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            cell.borrow_mut().clear();
        }
    }

    /// Returns the number of cached evaluations for the current thread.
    pub fn len(&self) -> usize {
        self.cache.get().map_or(0, |cell| cell.borrow().len())
    }

    /// Returns `true` if the cache for the current thread is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An evaluator wrapper with one cache per thread.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    evaluator: E,
    cache: Arc<ThreadLocalCache>,
}

impl<E> ThreadLocalCachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of cached evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<E> FitnessEvaluator for ThreadLocalCachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    fn evaluate(&self, assignment: &[usize], objective: &Objective) -> Result<Evaluation> {
        let key = (assignment.to_vec(), ObjectiveKey::from(objective));

        if let Some(evaluation) = self.cache.get(&key) {
            return Ok(evaluation);
        }

        let evaluation = self.evaluator.evaluate(assignment, objective)?;
        self.cache.insert(key, evaluation);
        Ok(evaluation)
    }

    fn num_tasks(&self) -> usize {
        self.evaluator.num_tasks()
    }

    fn num_resources(&self) -> usize {
        self.evaluator.num_resources()
    }
}

/// Wraps any clonable evaluator in a cache.
pub trait CachingEvaluator: FitnessEvaluator + Clone + Sized {
    /// Wraps a clone of this evaluator in a `CachedEvaluator`.
    fn with_global_cache(&self) -> CachedEvaluator<Self> {
        CachedEvaluator::new(self.clone())
    }

    /// Wraps a clone of this evaluator in a `ThreadLocalCachedEvaluator`.
    fn with_thread_local_cache(&self) -> ThreadLocalCachedEvaluator<Self> {
        ThreadLocalCachedEvaluator::new(self.clone())
    }

    /// Wraps a clone of this evaluator in the cache named by `cache_type`.
    fn with_cache(&self, cache_type: CacheType) -> Box<dyn FitnessEvaluator>
    where
        Self: 'static,
    {
        match cache_type {
            CacheType::Global => Box::new(self.with_global_cache()),
            CacheType::ThreadLocal => Box::new(self.with_thread_local_cache()),
        }
    }
}

impl<E> CachingEvaluator for E where E: FitnessEvaluator + Clone {}
