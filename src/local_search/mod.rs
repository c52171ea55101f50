//! Neighborhood local search over permutation tours.
//!
//! Two hill climbers share the same operator contract and pair scan:
//!
//! - [`VariableNeighborhoodSearch`]: deterministic order within a call,
//!   restart from the first neighborhood after each improvement.
//! - [`RandomNeighborhoodSearch`]: operators drawn at random without
//!   replacement, full refill after each improvement.
//!
//! Both apply moves in place, keep the cached tour length in sync by
//! delta accumulation, and stop when no operator improves or the objective
//! asks them to.
//!
//! # Key Types
//!
//! - [`LocalSearch`]: engine trait with the run lifecycle
//! - [`ImprovementPolicy`]: first- vs best-improvement selection
//! - [`LocalSearchConfig`]: runtime selection of strategy, policy and moves
//! - [`SearchEngine`]: the engine built from a configuration
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod engine;
mod operators;
mod policy;
mod rns;
mod types;
mod vns;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{LocalSearchConfig, SearchStrategy};
pub use engine::SearchEngine;
pub use policy::ImprovementPolicy;
pub use rns::RandomNeighborhoodSearch;
pub use types::{LocalSearch, LocalSearchResult};
pub use vns::VariableNeighborhoodSearch;
