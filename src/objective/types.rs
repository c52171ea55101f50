//! Oracle traits consumed by the local-search core.

/// Pairwise distance queries over `n` nodes.
///
/// Distances are integers and **symmetric**: `distance(a, b) == distance(b, a)`.
/// The reverse and rotation deltas rely on symmetry for the edges they do not
/// re-evaluate.
pub trait Distances {
    /// Number of nodes.
    fn n(&self) -> usize;

    /// Length of the edge between nodes `a` and `b`.
    fn distance(&self, a: usize, b: usize) -> i64;

    /// Length of the closed round trip visiting `tour` in order.
    ///
    /// This is the full O(n) evaluation. The search itself never calls it;
    /// it is used to establish the baseline length and in tests.
    fn tour_length(&self, tour: &[usize]) -> i64 {
        let n = tour.len();
        if n < 2 {
            return 0;
        }
        let closing = self.distance(tour[n - 1], tour[0]);
        tour.windows(2)
            .fold(closing, |acc, w| acc + self.distance(w[0], w[1]))
    }
}

impl<D: Distances + ?Sized> Distances for &D {
    fn n(&self) -> usize {
        (**self).n()
    }

    fn distance(&self, a: usize, b: usize) -> i64 {
        (**self).distance(a, b)
    }
}

/// The objective oracle a search runs against.
///
/// Besides distances it receives every accepted candidate (for statistics and
/// best-so-far tracking) and owns the termination budget. Engines have no
/// timeout logic of their own; they poll [`should_terminate`](Objective::should_terminate).
pub trait Objective: Distances {
    /// Reports a newly evaluated tour and its length.
    fn register_evaluation(&mut self, tour: &[usize], length: i64);

    /// Returns `true` once the budget is exhausted or the run was cancelled.
    fn should_terminate(&self) -> bool;
}
