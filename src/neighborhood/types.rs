//! The update-operator contract.

use crate::error::LifecycleError;
use crate::objective::Distances;

/// A neighborhood of a tour, indexed by position pairs `(i, j)` with
/// `0 <= i < j < n`.
///
/// Implementations must evaluate [`delta`](Neighborhood::delta) from a
/// constant number of edges (or at most `j - i` of them), never by
/// re-evaluating the whole tour. [`apply`](Neighborhood::apply) performs the
/// same transformation in place.
///
/// Operators are owned by one engine. Engines clone them when they are
/// cloned, so run-scoped buffers must not be shared between clones.
pub trait Neighborhood: Clone + Send {
    /// Human-readable operator name, used in logs and as `producer`.
    fn name(&self) -> &'static str;

    /// Signed change in tour length caused by `apply(tour, i, j)`.
    ///
    /// Does not mutate `tour`.
    fn delta<D: Distances + ?Sized>(&self, tour: &[usize], distances: &D, i: usize, j: usize) -> i64;

    /// Applies the transformation in place.
    fn apply(&self, tour: &mut [usize], i: usize, j: usize);

    /// Called once before an optimization run.
    fn begin_run<D: Distances + ?Sized>(&mut self, _distances: &D) {}

    /// Called once after an optimization run.
    fn end_run<D: Distances + ?Sized>(&mut self, _distances: &D) -> Result<(), LifecycleError> {
        Ok(())
    }
}
