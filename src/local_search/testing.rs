//! Instrumented operators and instances for engine tests.

use std::sync::{Arc, Mutex};

use rand::Rng;

use crate::error::LifecycleError;
use crate::neighborhood::{Neighborhood, PermutationMove};
use crate::objective::{DistanceMatrix, Distances};

const PROBE_NAMES: [&str; 8] = [
    "probe-0", "probe-1", "probe-2", "probe-3", "probe-4", "probe-5", "probe-6", "probe-7",
];

/// Random Euclidean instance on a 1000 x 1000 grid.
pub(crate) fn random_instance<R: Rng>(n: usize, rng: &mut R) -> DistanceMatrix {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    DistanceMatrix::from_coordinates(&points)
}

/// `true` if no operator has a strictly improving pair on `tour`.
pub(crate) fn is_local_optimum<N: Neighborhood, D: Distances>(
    ops: &[N],
    tour: &[usize],
    distances: &D,
) -> bool {
    let n = tour.len();
    ops.iter().all(|op| {
        (1..n).all(|j| (0..j).all(|i| op.delta(tour, distances, i, j) >= 0))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// A scan of the operator started.
    Scan(usize),
    /// The operator's move was applied.
    Apply(usize),
}

#[derive(Debug, Default)]
struct Records {
    events: Vec<Event>,
    begun: Vec<usize>,
    ended: Vec<usize>,
}

/// Shared event log for a family of probes.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProbeLog(Arc<Mutex<Records>>);

impl ProbeLog {
    pub(crate) fn probe(&self, id: usize, mv: PermutationMove) -> Probe {
        Probe {
            id,
            mv,
            fail_on_end: false,
            log: self.clone(),
        }
    }

    pub(crate) fn failing_probe(&self, id: usize, mv: PermutationMove) -> Probe {
        Probe {
            fail_on_end: true,
            ..self.probe(id, mv)
        }
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.lock().expect("probe log").events.clone()
    }

    pub(crate) fn begun(&self) -> Vec<usize> {
        self.0.lock().expect("probe log").begun.clone()
    }

    pub(crate) fn ended(&self) -> Vec<usize> {
        self.0.lock().expect("probe log").ended.clone()
    }

    pub(crate) fn clear(&self) {
        self.0.lock().expect("probe log").events.clear();
    }
}

/// A permutation move that records scans, applications and lifecycle calls.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    id: usize,
    mv: PermutationMove,
    fail_on_end: bool,
    log: ProbeLog,
}

impl Neighborhood for Probe {
    fn name(&self) -> &'static str {
        PROBE_NAMES[self.id]
    }

    fn delta<D: Distances + ?Sized>(&self, tour: &[usize], distances: &D, i: usize, j: usize) -> i64 {
        let n = tour.len();
        if j == n - 1 && i == n - 2 {
            self.log.0.lock().expect("probe log").events.push(Event::Scan(self.id));
        }
        self.mv.delta(tour, distances, i, j)
    }

    fn apply(&self, tour: &mut [usize], i: usize, j: usize) {
        self.log.0.lock().expect("probe log").events.push(Event::Apply(self.id));
        self.mv.apply(tour, i, j);
    }

    fn begin_run<D: Distances + ?Sized>(&mut self, _distances: &D) {
        self.log.0.lock().expect("probe log").begun.push(self.id);
    }

    fn end_run<D: Distances + ?Sized>(&mut self, _distances: &D) -> Result<(), LifecycleError> {
        self.log.0.lock().expect("probe log").ended.push(self.id);
        if self.fail_on_end {
            Err(LifecycleError::new(self.name(), "scratch state corrupted"))
        } else {
            Ok(())
        }
    }
}
