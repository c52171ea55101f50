//! Neighborhood local search for the symmetric Traveling Salesman Problem.
//!
//! Provides hill-climbing engines over permutation tours:
//!
//! - **Variable Neighborhood Search (VNS)**: Neighborhoods tried in a
//!   shuffled order, returning to the first one after every improvement.
//! - **Random Neighborhood Search (RNS)**: Neighborhoods drawn at random
//!   without replacement, refilling the pool after every improvement.
//! - **Update operators**: swap, reverse and single-step rotations, each
//!   with constant-time length delta evaluation.
//! - **Perturbation driver**: Iterated local search on top of either
//!   engine, with optional multi-seed runs on the rayon pool.
//!
//! # Architecture
//!
//! The engines never evaluate a tour in full. They read distances through
//! [`objective::Distances`] and report every applied move to an
//! [`objective::Objective`], which owns the budget and decides when to
//! stop. Engines are plain values: clone one per thread.

pub mod error;
pub mod individual;
pub mod local_search;
pub mod neighborhood;
pub mod objective;
pub mod perturbation;
pub mod random;
