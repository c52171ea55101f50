//! Core trait for local-search engines.

use rand::Rng;

use crate::error::LifecycleError;
use crate::individual::Individual;
use crate::objective::{Distances, Objective};

/// Statistics of one [`LocalSearch::optimize`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSearchResult {
    /// Improving moves applied.
    pub improvements: usize,
    /// Neighborhood scans performed.
    pub scans: usize,
    /// `true` if the objective requested termination. When `false` the
    /// tour is a local optimum with respect to every operator.
    pub terminated: bool,
}

impl LocalSearchResult {
    /// `true` if the call ended in a local optimum.
    pub fn reached_local_optimum(&self) -> bool {
        !self.terminated
    }
}

/// A hill climber over a fixed set of neighborhoods.
///
/// # Run lifecycle
///
/// `begin_run` and `end_run` bracket every independent optimization attempt
/// and are propagated to all owned operators. Between them, `optimize` may
/// be called any number of times (for example by a perturbation loop).
///
/// # Concurrency
///
/// An engine is used by one thread at a time. For parallel runs give each
/// worker its own engine, either cloned or built from a configuration;
/// clones never share buffers.
pub trait LocalSearch {
    /// Engine name, recorded as the `producer` of improved individuals.
    fn name(&self) -> &'static str;

    /// Prepares the engine and its operators for a run.
    fn begin_run<D: Distances + ?Sized>(&mut self, distances: &D);

    /// Releases run-scoped buffers and ends the run of every operator.
    ///
    /// All operators are ended even if some fail; the last failure is
    /// returned.
    fn end_run<D: Distances + ?Sized>(&mut self, distances: &D) -> Result<(), LifecycleError>;

    /// Improves `individual` in place until no operator yields a strictly
    /// negative delta or the objective asks to stop.
    ///
    /// `individual.tour_length` must already match its solution; it is
    /// updated by adding deltas, never recomputed.
    ///
    /// # Panics
    /// Panics if the individual has no solution or its size differs from
    /// `objective.n()`.
    fn optimize<O, R>(
        &mut self,
        individual: &mut Individual,
        objective: &mut O,
        rng: &mut R,
    ) -> LocalSearchResult
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized;
}
