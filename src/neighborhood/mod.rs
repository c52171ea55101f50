//! Update operators (neighborhoods) over permutation tours.
//!
//! A [`Neighborhood`] computes the length delta of a move from a handful of
//! edges and applies the move in place. [`PermutationMove`] provides the
//! four standard moves.

mod moves;
mod types;

pub use moves::PermutationMove;
pub use types::Neighborhood;
