//! Operator ownership and the pair scan shared by all engines.

use tracing::warn;

use crate::error::LifecycleError;
use crate::neighborhood::Neighborhood;
use crate::objective::{Distances, Objective};

/// The operators of one engine plus its run-scoped scratch buffer.
///
/// The scratch buffer holds operator indices (the per-call visiting order or
/// the pool of remaining operators). It exists only between `begin_run` and
/// `end_run`; clones start without one.
#[derive(Debug)]
pub(crate) struct OperatorSet<N> {
    operators: Vec<N>,
    scratch: Option<Vec<usize>>,
}

impl<N: Clone> Clone for OperatorSet<N> {
    fn clone(&self) -> Self {
        Self {
            operators: self.operators.clone(),
            scratch: None,
        }
    }
}

impl<N: Neighborhood> OperatorSet<N> {
    pub(crate) fn new(operators: Vec<N>) -> Self {
        Self {
            operators,
            scratch: None,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.operators.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &N {
        &self.operators[index]
    }

    pub(crate) fn as_slice(&self) -> &[N] {
        &self.operators
    }

    pub(crate) fn has_scratch(&self) -> bool {
        self.scratch.is_some()
    }

    pub(crate) fn begin_run<D: Distances + ?Sized>(&mut self, distances: &D) {
        for op in &mut self.operators {
            op.begin_run(distances);
        }
        self.scratch = Some(Vec::with_capacity(self.operators.len()));
    }

    /// Ends every operator's run; returns the last failure wrapped as
    /// reported by `owner`.
    pub(crate) fn end_run<D: Distances + ?Sized>(
        &mut self,
        owner: &'static str,
        distances: &D,
    ) -> Result<(), LifecycleError> {
        self.scratch = None;
        let mut last_error = None;
        for op in &mut self.operators {
            if let Err(e) = op.end_run(distances) {
                warn!(engine = owner, operator = op.name(), error = %e, "operator failed to end run");
                last_error = Some(e);
            }
        }
        match last_error {
            Some(e) => Err(LifecycleError::wrap(owner, e)),
            None => Ok(()),
        }
    }

    /// Takes the scratch buffer, allocating one if the run was not begun.
    pub(crate) fn take_scratch(&mut self) -> Vec<usize> {
        self.scratch
            .take()
            .unwrap_or_else(|| Vec::with_capacity(self.operators.len()))
    }

    pub(crate) fn put_scratch(&mut self, scratch: Vec<usize>) {
        self.scratch = Some(scratch);
    }
}

/// An improving move found by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub delta: i64,
    pub i: usize,
    pub j: usize,
}

/// How a [`scan`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanOutcome {
    /// The best (or first) strictly improving move.
    Improving(Candidate),
    /// Every pair was evaluated and none improves.
    NoImprovement,
    /// The objective requested termination mid-scan; nothing may be applied.
    Terminated,
}

/// Scans all pairs `(i, j)`, `j` from `n - 1` down to `1` and `i` from
/// `j - 1` down to `0`, and returns the best strictly improving move.
///
/// With `first_improvement` the scan stops at the first negative delta.
/// Termination is polled once per `j` and before a first improvement is
/// returned; a scan cut short is discarded.
pub(crate) fn scan<N, O>(
    op: &N,
    tour: &[usize],
    objective: &O,
    first_improvement: bool,
) -> ScanOutcome
where
    N: Neighborhood,
    O: Objective + ?Sized,
{
    let n = tour.len();
    let mut best: Option<Candidate> = None;
    let mut best_delta = 0i64;

    for j in (1..n).rev() {
        for i in (0..j).rev() {
            let delta = op.delta(tour, objective, i, j);
            if delta < best_delta {
                best_delta = delta;
                let found = Candidate { delta, i, j };
                if first_improvement {
                    return if objective.should_terminate() {
                        ScanOutcome::Terminated
                    } else {
                        ScanOutcome::Improving(found)
                    };
                }
                best = Some(found);
            }
        }
        if objective.should_terminate() {
            return ScanOutcome::Terminated;
        }
    }
    match best {
        Some(c) => ScanOutcome::Improving(c),
        None => ScanOutcome::NoImprovement,
    }
}

/// Borrow of the individual's tour, checked against the objective size.
pub(crate) fn checked_tour<'a, O: Objective + ?Sized>(
    solution: &'a mut Option<Vec<usize>>,
    objective: &O,
) -> &'a mut Vec<usize> {
    let tour = solution
        .as_mut()
        .expect("local search requires an individual with a solution");
    assert_eq!(
        tour.len(),
        objective.n(),
        "tour size does not match the objective"
    );
    tour
}
