//! Variable Neighborhood Search (VNS) descent.
//!
//! # Algorithm
//!
//! 1. Resolve the improvement policy once for this call
//! 2. Shuffle the operators into a visiting order
//! 3. Set k = 0; while k < number of operators:
//!    a. Scan all pairs of operator k for the best (or first) improving move
//!    b. If one exists, apply it and set k = 0; otherwise k = k + 1
//!    c. Stop early if the objective requests termination
//! 4. On exit with k = number of operators, the tour is a local optimum for
//!    every operator
//!
//! # Reference
//!
//! Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//! Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

use rand::Rng;
use tracing::{debug, trace};

use super::operators::{checked_tour, scan, OperatorSet, ScanOutcome};
use super::policy::ImprovementPolicy;
use super::types::{LocalSearch, LocalSearchResult};
use crate::error::LifecycleError;
use crate::individual::Individual;
use crate::neighborhood::Neighborhood;
use crate::objective::{Distances, Objective};
use crate::random::shuffle;

/// VNS over a fixed set of neighborhoods, visited in a per-call random order.
///
/// After every improvement the search returns to the first neighborhood of
/// the same shuffled order.
///
/// # Examples
///
/// ```
/// use tsp_neighborhood::individual::Individual;
/// use tsp_neighborhood::local_search::{LocalSearch, VariableNeighborhoodSearch};
/// use tsp_neighborhood::neighborhood::PermutationMove;
/// use tsp_neighborhood::objective::{Budget, DistanceMatrix, Distances, Evaluator};
/// use tsp_neighborhood::random::create_rng;
///
/// let m = DistanceMatrix::from_coordinates(&[
///     (0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0),
/// ]);
/// let mut ev = Evaluator::new(&m, Budget::default());
/// let mut rng = create_rng(42);
/// let mut vns = VariableNeighborhoodSearch::new(PermutationMove::ALL.to_vec());
///
/// let mut ind = Individual::from_tour(vec![0, 2, 1, 3], &m);
/// vns.begin_run(&ev);
/// let result = vns.optimize(&mut ind, &mut ev, &mut rng);
/// vns.end_run(&ev).unwrap();
///
/// assert!(result.reached_local_optimum());
/// assert_eq!(ind.tour_length, 40);
/// assert_eq!(ind.tour_length, m.tour_length(ind.tour()));
/// ```
#[derive(Debug, Clone)]
pub struct VariableNeighborhoodSearch<N> {
    operators: OperatorSet<N>,
    policy: ImprovementPolicy,
}

impl<N: Neighborhood> VariableNeighborhoodSearch<N> {
    /// Creates a VNS with the default [`ImprovementPolicy::AlwaysBest`].
    pub fn new(operators: Vec<N>) -> Self {
        Self {
            operators: OperatorSet::new(operators),
            policy: ImprovementPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ImprovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ImprovementPolicy {
        self.policy
    }

    pub fn operators(&self) -> &[N] {
        self.operators.as_slice()
    }
}

impl<N: Neighborhood> LocalSearch for VariableNeighborhoodSearch<N> {
    fn name(&self) -> &'static str {
        "vns"
    }

    fn begin_run<D: Distances + ?Sized>(&mut self, distances: &D) {
        self.operators.begin_run(distances);
    }

    fn end_run<D: Distances + ?Sized>(&mut self, distances: &D) -> Result<(), LifecycleError> {
        self.operators.end_run("vns", distances)
    }

    fn optimize<O, R>(
        &mut self,
        individual: &mut Individual,
        objective: &mut O,
        rng: &mut R,
    ) -> LocalSearchResult
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let first_improvement = self.policy.resolve_first_improvement(rng);
        let mut result = LocalSearchResult::default();

        let mut order = self.operators.take_scratch();
        order.clear();
        order.extend(0..self.operators.len());
        shuffle(&mut order, rng);

        let tour = checked_tour(&mut individual.solution, &*objective);
        let mut chosen = 0;

        while chosen < order.len() {
            let op = self.operators.get(order[chosen]);
            result.scans += 1;

            match scan(op, tour, &*objective, first_improvement) {
                ScanOutcome::Improving(mv) => {
                    op.apply(tour, mv.i, mv.j);
                    individual.tour_length += mv.delta;
                    individual.producer = Some(self.name());
                    objective.register_evaluation(tour, individual.tour_length);
                    result.improvements += 1;
                    trace!(
                        operator = op.name(),
                        i = mv.i,
                        j = mv.j,
                        delta = mv.delta,
                        length = individual.tour_length,
                        "vns improvement"
                    );
                    chosen = 0;
                }
                ScanOutcome::NoImprovement => chosen += 1,
                ScanOutcome::Terminated => {
                    result.terminated = true;
                    break;
                }
            }

            if objective.should_terminate() {
                result.terminated = true;
                break;
            }
        }

        self.operators.put_scratch(order);

        debug!(
            length = individual.tour_length,
            improvements = result.improvements,
            scans = result.scans,
            terminated = result.terminated,
            "vns finished"
        );
        result
    }
}
