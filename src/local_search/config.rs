//! Local-search configuration and engine factory.

use super::engine::SearchEngine;
use super::policy::ImprovementPolicy;
use super::rns::RandomNeighborhoodSearch;
use super::vns::VariableNeighborhoodSearch;
use crate::neighborhood::PermutationMove;

/// How the engine picks the next neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Shuffled order per call, return to the first neighborhood on success.
    #[default]
    Variable,
    /// Random draw without replacement, full refill on success.
    Random,
}

/// Configuration for a local-search engine.
///
/// [`build`](Self::build) constructs a fresh, independently owned engine;
/// call it once per worker thread.
///
/// # Examples
///
/// ```
/// use tsp_neighborhood::local_search::{ImprovementPolicy, LocalSearchConfig, SearchStrategy};
/// use tsp_neighborhood::neighborhood::PermutationMove;
///
/// let config = LocalSearchConfig::default()
///     .with_strategy(SearchStrategy::Random)
///     .with_policy(ImprovementPolicy::AlwaysFirst)
///     .with_moves(vec![PermutationMove::Reverse, PermutationMove::Swap]);
/// let engine = config.build().unwrap();
/// assert_eq!(engine.operators().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Neighborhood selection discipline.
    pub strategy: SearchStrategy,
    /// First- or best-improvement selection.
    pub policy: ImprovementPolicy,
    /// Active neighborhoods. Duplicates are allowed and weight the draw.
    pub moves: Vec<PermutationMove>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            policy: ImprovementPolicy::default(),
            moves: PermutationMove::ALL.to_vec(),
        }
    }
}

impl LocalSearchConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_policy(mut self, policy: ImprovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_moves(mut self, moves: Vec<PermutationMove>) -> Self {
        self.moves = moves;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.moves.is_empty() {
            return Err("at least one move is required".into());
        }
        Ok(())
    }

    /// Builds a new engine with its own operator instances.
    pub fn build(&self) -> Result<SearchEngine, String> {
        self.validate()?;
        let moves = self.moves.clone();
        Ok(match self.strategy {
            SearchStrategy::Variable => SearchEngine::Variable(
                VariableNeighborhoodSearch::new(moves).with_policy(self.policy),
            ),
            SearchStrategy::Random => SearchEngine::Random(
                RandomNeighborhoodSearch::new(moves).with_policy(self.policy),
            ),
        })
    }
}
