//! Perturbation driver around a local-search engine.
//!
//! Repeatedly descends to a local optimum, keeps the best one, and
//! restarts from a copy of the best with a shuffled segment. With the
//! `parallel` feature, independent runs over several seeds share one
//! distance matrix on the rayon pool.
//!
//! # Key Types
//!
//! - [`PerturbationConfig`]: restart limits and perturbation strength
//! - [`PerturbationRunner`]: executes the loop
//! - [`PerturbationResult`]: best tour and run statistics

mod config;
mod runner;

pub use config::PerturbationConfig;
pub use runner::{PerturbationResult, PerturbationRunner};
