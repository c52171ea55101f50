//! Objective oracle: distances, tour evaluation, and termination budgets.
//!
//! The search core only consumes the [`Distances`] and [`Objective`] traits.
//! [`DistanceMatrix`] and [`Evaluator`] are ready-made implementations for
//! dense symmetric instances.

mod evaluator;
mod matrix;
mod types;

pub use evaluator::{Budget, Evaluator};
pub use matrix::{DistanceMatrix, MatrixError};
pub use types::{Distances, Objective};
