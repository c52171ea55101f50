//! Budgeted objective oracle.
//!
//! [`Evaluator`] wraps any [`Distances`] and turns it into an [`Objective`]:
//! it counts evaluations and distance queries, remembers the best tour it has
//! been shown, and decides when a run must stop.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::types::{Distances, Objective};

/// Termination budget for one run. Every limit is optional.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tsp_neighborhood::objective::Budget;
///
/// let budget = Budget::default()
///     .with_max_evaluations(10_000)
///     .with_time_limit(Duration::from_secs(2));
/// assert_eq!(budget.max_evaluations, Some(10_000));
/// assert!(budget.target_length.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Budget {
    /// Maximum number of registered evaluations (FEs).
    pub max_evaluations: Option<u64>,
    /// Maximum number of single distance queries (DEs).
    pub max_distance_evaluations: Option<u64>,
    /// Wall-clock limit measured from construction of the evaluator.
    pub time_limit: Option<Duration>,
    /// Stop as soon as a tour this short has been registered.
    pub target_length: Option<i64>,
}

impl Budget {
    pub fn with_max_evaluations(mut self, n: u64) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    pub fn with_max_distance_evaluations(mut self, n: u64) -> Self {
        self.max_distance_evaluations = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_target_length(mut self, length: i64) -> Self {
        self.target_length = Some(length);
        self
    }

    /// Validates the budget.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evaluations == Some(0) {
            return Err("max_evaluations must be positive".into());
        }
        if self.max_distance_evaluations == Some(0) {
            return Err("max_distance_evaluations must be positive".into());
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err("time_limit must be non-zero".into());
        }
        Ok(())
    }
}

/// An [`Objective`] over a borrowed distance source.
///
/// Owned by exactly one run; the distance counter uses interior mutability
/// so it is not `Sync`.
#[derive(Debug)]
pub struct Evaluator<'a, D: Distances + ?Sized> {
    distances: &'a D,
    budget: Budget,
    evaluations: u64,
    distance_evaluations: Cell<u64>,
    best_tour: Vec<usize>,
    best_length: i64,
    started: Instant,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, D: Distances + ?Sized> Evaluator<'a, D> {
    /// Creates an evaluator; the time budget starts now.
    pub fn new(distances: &'a D, budget: Budget) -> Self {
        Self {
            distances,
            budget,
            evaluations: 0,
            distance_evaluations: Cell::new(0),
            best_tour: Vec::new(),
            best_length: i64::MAX,
            started: Instant::now(),
            cancel: None,
        }
    }

    /// Attaches an external cancellation flag.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Number of registered evaluations.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Number of distance queries answered so far.
    pub fn distance_evaluations(&self) -> u64 {
        self.distance_evaluations.get()
    }

    /// Best registered length, or `i64::MAX` if nothing was registered.
    pub fn best_length(&self) -> i64 {
        self.best_length
    }

    /// Best registered tour, if any.
    pub fn best_tour(&self) -> Option<&[usize]> {
        if self.best_tour.is_empty() {
            None
        } else {
            Some(&self.best_tour)
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }
}

impl<D: Distances + ?Sized> Distances for Evaluator<'_, D> {
    fn n(&self) -> usize {
        self.distances.n()
    }

    #[inline]
    fn distance(&self, a: usize, b: usize) -> i64 {
        self.distance_evaluations
            .set(self.distance_evaluations.get() + 1);
        self.distances.distance(a, b)
    }
}

impl<D: Distances + ?Sized> Objective for Evaluator<'_, D> {
    fn register_evaluation(&mut self, tour: &[usize], length: i64) {
        self.evaluations += 1;
        if length < self.best_length {
            self.best_length = length;
            self.best_tour.clear();
            self.best_tour.extend_from_slice(tour);
        }
    }

    fn should_terminate(&self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        if let Some(max) = self.budget.max_evaluations {
            if self.evaluations >= max {
                return true;
            }
        }
        if let Some(max) = self.budget.max_distance_evaluations {
            if self.distance_evaluations.get() >= max {
                return true;
            }
        }
        if let Some(target) = self.budget.target_length {
            if self.best_length <= target {
                return true;
            }
        }
        if let Some(limit) = self.budget.time_limit {
            if self.started.elapsed() >= limit {
                return true;
            }
        }
        false
    }
}
