//! Runtime-selected engine over the built-in permutation moves.

use rand::Rng;

use super::policy::ImprovementPolicy;
use super::rns::RandomNeighborhoodSearch;
use super::types::{LocalSearch, LocalSearchResult};
use super::vns::VariableNeighborhoodSearch;
use crate::error::LifecycleError;
use crate::individual::Individual;
use crate::neighborhood::PermutationMove;
use crate::objective::{Distances, Objective};

/// Either engine, as produced by
/// [`LocalSearchConfig::build`](super::LocalSearchConfig::build).
#[derive(Debug, Clone)]
pub enum SearchEngine {
    Variable(VariableNeighborhoodSearch<PermutationMove>),
    Random(RandomNeighborhoodSearch<PermutationMove>),
}

impl SearchEngine {
    pub fn policy(&self) -> ImprovementPolicy {
        match self {
            SearchEngine::Variable(e) => e.policy(),
            SearchEngine::Random(e) => e.policy(),
        }
    }

    pub fn operators(&self) -> &[PermutationMove] {
        match self {
            SearchEngine::Variable(e) => e.operators(),
            SearchEngine::Random(e) => e.operators(),
        }
    }
}

impl LocalSearch for SearchEngine {
    fn name(&self) -> &'static str {
        match self {
            SearchEngine::Variable(e) => e.name(),
            SearchEngine::Random(e) => e.name(),
        }
    }

    fn begin_run<D: Distances + ?Sized>(&mut self, distances: &D) {
        match self {
            SearchEngine::Variable(e) => e.begin_run(distances),
            SearchEngine::Random(e) => e.begin_run(distances),
        }
    }

    fn end_run<D: Distances + ?Sized>(&mut self, distances: &D) -> Result<(), LifecycleError> {
        match self {
            SearchEngine::Variable(e) => e.end_run(distances),
            SearchEngine::Random(e) => e.end_run(distances),
        }
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
        match self {
            SearchEngine::Variable(e) => e.optimize(individual, objective, rng),
            SearchEngine::Random(e) => e.optimize(individual, objective, rng),
        }
    }
}
