//! Random Neighborhood Search (RNS) descent.
//!
//! # Algorithm
//!
//! 1. Resolve the improvement policy once for this call
//! 2. Fill the pool with all operators
//! 3. While the pool is not empty:
//!    a. Remove a uniformly random operator from the pool
//!    b. Scan all its pairs for the best (or first) improving move
//!    c. If one exists, apply it and go back to step 2 (full refill)
//!    d. Stop early if the objective requests termination
//! 4. An empty pool means no operator improves the tour: a local optimum
//!
//! Unlike VNS, a success does not keep the previous order; the next
//! operator is drawn from the complete set again.

use rand::Rng;
use tracing::{debug, trace};

use super::operators::{checked_tour, scan, OperatorSet, ScanOutcome};
use super::policy::ImprovementPolicy;
use super::types::{LocalSearch, LocalSearchResult};
use crate::error::LifecycleError;
use crate::individual::Individual;
use crate::neighborhood::Neighborhood;
use crate::objective::{Distances, Objective};

/// RNS over a fixed set of neighborhoods, sampled without replacement and
/// refilled after every improvement.
#[derive(Debug, Clone)]
pub struct RandomNeighborhoodSearch<N> {
    operators: OperatorSet<N>,
    policy: ImprovementPolicy,
}

impl<N: Neighborhood> RandomNeighborhoodSearch<N> {
    /// Creates an RNS with the default [`ImprovementPolicy::AlwaysBest`].
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

impl<N: Neighborhood> LocalSearch for RandomNeighborhoodSearch<N> {
    fn name(&self) -> &'static str {
        "rns"
    }

    fn begin_run<D: Distances + ?Sized>(&mut self, distances: &D) {
        self.operators.begin_run(distances);
    }

    fn end_run<D: Distances + ?Sized>(&mut self, distances: &D) -> Result<(), LifecycleError> {
        self.operators.end_run("rns", distances)
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

        let mut pool = self.operators.take_scratch();
        let tour = checked_tour(&mut individual.solution, &*objective);

        'refill: loop {
            pool.clear();
            pool.extend(0..self.operators.len());

            while !pool.is_empty() {
                let picked = pool.swap_remove(rng.random_range(0..pool.len()));
                let op = self.operators.get(picked);
                result.scans += 1;

                let improved = match scan(op, tour, &*objective, first_improvement) {
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
                            "rns improvement"
                        );
                        true
                    }
                    ScanOutcome::NoImprovement => false,
                    ScanOutcome::Terminated => {
                        result.terminated = true;
                        break 'refill;
                    }
                };

                if objective.should_terminate() {
                    result.terminated = true;
                    break 'refill;
                }
                if improved {
                    continue 'refill;
                }
            }
            break;
        }

        self.operators.put_scratch(pool);

        debug!(
            length = individual.tour_length,
            improvements = result.improvements,
            scans = result.scans,
            terminated = result.terminated,
            "rns finished"
        );
        result
    }
}
