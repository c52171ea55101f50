//! Perturbation driver execution loop.
//!
//! # Algorithm (Iterated Local Search)
//!
//! 1. Generate a random tour, evaluate it once in full
//! 2. Descend to a local optimum with the local-search engine
//! 3. Keep the best local optimum found so far
//! 4. Copy the best, shuffle a random contiguous segment, re-evaluate
//! 5. Repeat from 2 until the objective terminates, the restart limit is
//!    reached, or no new best was found for `max_no_improve` restarts
//!
//! # Reference
//!
//! Lourenço, H.R., Martin, O.C. & Stützle, T. (2003). "Iterated Local
//! Search", *Handbook of Metaheuristics*, 320-353.

use rand::Rng;
use tracing::{debug, info};

use super::config::PerturbationConfig;
use crate::error::LifecycleError;
use crate::individual::{random_tour, Individual};
use crate::local_search::LocalSearch;
use crate::objective::Objective;
use crate::random::{create_rng, shuffle};

/// Result of a perturbation run.
#[derive(Debug, Clone)]
pub struct PerturbationResult {
    /// Best tour found.
    pub best: Vec<usize>,
    /// Length of the best tour.
    pub best_length: i64,
    /// Restarts (perturbations) performed.
    pub restarts: usize,
    /// Descents that ended in a local optimum.
    pub local_optima: usize,
    /// Improving moves applied across all descents.
    pub improvements: usize,
    /// Tours registered with the objective during this run.
    pub evaluations: usize,
    /// Whether the objective ended the run.
    pub terminated: bool,
    /// Best length after each descent.
    pub length_history: Vec<i64>,
}

/// Executes the perturbation loop around a local-search engine.
pub struct PerturbationRunner;

impl PerturbationRunner {
    /// Runs from a uniformly random initial tour.
    pub fn run<L, O>(
        engine: &mut L,
        objective: &mut O,
        config: &PerturbationConfig,
    ) -> Result<PerturbationResult, LifecycleError>
    where
        L: LocalSearch,
        O: Objective + ?Sized,
    {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let tour = random_tour(objective.n(), &mut rng);
        let mut initial = Individual::from_tour(tour, &*objective);
        initial.producer = Some("random");
        Self::run_with_rng(engine, objective, initial, config, &mut rng)
    }

    /// Runs from the given evaluated individual.
    ///
    /// # Panics
    /// Panics if the configuration is invalid or `initial` has no solution.
    pub fn run_from<L, O, R>(
        engine: &mut L,
        objective: &mut O,
        initial: Individual,
        config: &PerturbationConfig,
        rng: &mut R,
    ) -> Result<PerturbationResult, LifecycleError>
    where
        L: LocalSearch,
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        Self::run_with_rng(engine, objective, initial, config, rng)
    }

    fn run_with_rng<L, O, R>(
        engine: &mut L,
        objective: &mut O,
        mut current: Individual,
        config: &PerturbationConfig,
        rng: &mut R,
    ) -> Result<PerturbationResult, LifecycleError>
    where
        L: LocalSearch,
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate().expect("invalid PerturbationConfig");
        assert!(current.is_evaluated(), "initial individual must be evaluated");
        objective.register_evaluation(current.tour(), current.tour_length);

        engine.begin_run(&*objective);

        let mut best = Individual::new();
        let mut restarts = 0usize;
        let mut no_improve = 0usize;
        let mut local_optima = 0usize;
        let mut improvements = 0usize;
        let mut terminated = objective.should_terminate();
        let mut length_history = Vec::new();

        while !terminated {
            let outcome = engine.optimize(&mut current, objective, rng);
            current.fitness = current.tour_length as f64;
            improvements += outcome.improvements;
            if outcome.reached_local_optimum() {
                local_optima += 1;
            }

            if !best.is_evaluated() || current.tour_length < best.tour_length {
                best.assign(&current);
                no_improve = 0;
            } else {
                no_improve += 1;
            }
            length_history.push(best.tour_length);

            if outcome.terminated || objective.should_terminate() {
                terminated = true;
                break;
            }
            if restarts >= config.max_restarts
                || (config.max_no_improve > 0 && no_improve >= config.max_no_improve)
            {
                break;
            }

            restarts += 1;
            current.assign(&best);
            let tour = current
                .solution
                .as_mut()
                .expect("perturbation requires a solution");
            perturb(tour, config.shuffle_fraction, rng);
            current.tour_length = objective.tour_length(tour);
            current.fitness = current.tour_length as f64;
            current.producer = Some("perturbation");
            objective.register_evaluation(tour, current.tour_length);

            debug!(
                restart = restarts,
                length = current.tour_length,
                best = best.tour_length,
                "perturbed"
            );
            terminated = objective.should_terminate();
            if terminated && current.tour_length < best.tour_length {
                best.assign(&current);
            }
        }

        engine.end_run(&*objective)?;

        if !best.is_evaluated() {
            best.assign(&current);
        }

        info!(
            engine = engine.name(),
            best = best.tour_length,
            restarts,
            local_optima,
            evaluations = 1 + improvements + restarts,
            terminated,
            "perturbation run finished"
        );

        Ok(PerturbationResult {
            best_length: best.tour_length,
            best: best.solution.unwrap_or_default(),
            restarts,
            local_optima,
            improvements,
            evaluations: 1 + improvements + restarts,
            terminated,
            length_history,
        })
    }

    /// Runs one independent perturbation run per seed on the rayon pool.
    ///
    /// Each worker builds its own engine from `search` and its own
    /// evaluator over the shared `distances`. Results are in seed order.
    #[cfg(feature = "parallel")]
    pub fn run_parallel<D>(
        search: &crate::local_search::LocalSearchConfig,
        distances: &D,
        budget: &crate::objective::Budget,
        config: &PerturbationConfig,
        seeds: &[u64],
    ) -> Result<Vec<PerturbationResult>, LifecycleError>
    where
        D: crate::objective::Distances + Sync + ?Sized,
    {
        use rayon::prelude::*;

        search.validate().expect("invalid LocalSearchConfig");
        seeds
            .par_iter()
            .map(|&seed| {
                let mut engine = search.build().expect("validated LocalSearchConfig");
                let mut evaluator = crate::objective::Evaluator::new(distances, budget.clone());
                let run_config = config.clone().with_seed(seed);
                Self::run(&mut engine, &mut evaluator, &run_config)
            })
            .collect()
    }
}

/// Shuffles a random contiguous segment of `tour` in place.
fn perturb<R: Rng + ?Sized>(tour: &mut [usize], fraction: f64, rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let max_len = ((fraction * n as f64).round() as usize).clamp(2, n);
    let len = rng.random_range(2..=max_len);
    let start = rng.random_range(0..=n - len);
    shuffle(&mut tour[start..start + len], rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::is_permutation;
    use crate::local_search::testing::{is_local_optimum, random_instance};
    use crate::local_search::{LocalSearchConfig, SearchStrategy};
    use crate::neighborhood::PermutationMove;
    use crate::objective::{Budget, DistanceMatrix, Distances, Evaluator};

    #[test]
    fn test_perturb_keeps_permutation() {
        let mut rng = create_rng(42);
        for n in 0..20 {
            for _ in 0..20 {
                let mut tour: Vec<usize> = (0..n).collect();
                perturb(&mut tour, 0.3, &mut rng);
                assert!(is_permutation(&tour, n));
            }
        }
    }

    #[test]
    fn test_perturb_touches_one_segment() {
        let mut rng = create_rng(1);
        for _ in 0..50 {
            let mut tour: Vec<usize> = (0..30).collect();
            perturb(&mut tour, 0.2, &mut rng);
            let moved: Vec<usize> = (0..30).filter(|&k| tour[k] != k).collect();
            if let (Some(&lo), Some(&hi)) = (moved.first(), moved.last()) {
                assert!(hi - lo < 6, "segment {lo}..={hi} wider than 6");
            }
        }
    }

    #[test]
    fn test_run_returns_local_optimum() {
        let m = random_instance(25, &mut create_rng(3));
        for strategy in [SearchStrategy::Variable, SearchStrategy::Random] {
            let mut engine = LocalSearchConfig::default()
                .with_strategy(strategy)
                .build()
                .expect("valid");
            let mut ev = Evaluator::new(&m, Budget::default());
            let config = PerturbationConfig::default()
                .with_max_restarts(20)
                .with_seed(42);

            let result = PerturbationRunner::run(&mut engine, &mut ev, &config).expect("run");

            assert!(!result.terminated);
            assert!(is_permutation(&result.best, 25));
            assert_eq!(result.best_length, m.tour_length(&result.best));
            assert_eq!(ev.best_length(), result.best_length);
            assert_eq!(ev.evaluations(), result.evaluations as u64);
            assert!(is_local_optimum(&PermutationMove::ALL, &result.best, &m));
            assert_eq!(result.length_history.len(), result.restarts + 1);
            assert!(result.local_optima >= 1);
        }
    }

    #[test]
    fn test_history_non_increasing() {
        let m = random_instance(30, &mut create_rng(8));
        let mut engine = LocalSearchConfig::default().build().expect("valid");
        let mut ev = Evaluator::new(&m, Budget::default());
        let config = PerturbationConfig::default()
            .with_max_restarts(30)
            .with_max_no_improve(0)
            .with_seed(9);

        let result = PerturbationRunner::run(&mut engine, &mut ev, &config).expect("run");
        assert_eq!(result.restarts, 30);
        for w in result.length_history.windows(2) {
            assert!(w[1] <= w[0], "history increased: {} > {}", w[1], w[0]);
        }
    }

    #[test]
    fn test_stagnation_stops_early() {
        let m = random_instance(8, &mut create_rng(2));
        let mut engine = LocalSearchConfig::default().build().expect("valid");
        let mut ev = Evaluator::new(&m, Budget::default());
        let config = PerturbationConfig::default()
            .with_max_restarts(10_000)
            .with_max_no_improve(5)
            .with_seed(4);

        let result = PerturbationRunner::run(&mut engine, &mut ev, &config).expect("run");
        assert!(result.restarts < 10_000);
    }

    #[test]
    fn test_evaluation_budget_terminates() {
        let m = random_instance(40, &mut create_rng(6));
        let mut engine = LocalSearchConfig::default().build().expect("valid");
        let mut ev = Evaluator::new(&m, Budget::default().with_max_evaluations(25));
        let config = PerturbationConfig::default()
            .with_max_restarts(10_000)
            .with_max_no_improve(0)
            .with_seed(4);

        let result = PerturbationRunner::run(&mut engine, &mut ev, &config).expect("run");
        assert!(result.terminated);
        assert_eq!(ev.evaluations(), 25);
        assert_eq!(result.evaluations, 25);
        assert_eq!(result.best_length, m.tour_length(&result.best));
    }

    #[test]
    fn test_target_length_reached_on_square() {
        let m = DistanceMatrix::from_coordinates(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        let mut engine = LocalSearchConfig::default()
            .with_strategy(SearchStrategy::Random)
            .build()
            .expect("valid");
        let mut ev = Evaluator::new(&m, Budget::default().with_target_length(60));
        let config = PerturbationConfig::default()
            .with_max_no_improve(0)
            .with_max_restarts(1_000)
            .with_shuffle_fraction(1.0)
            .with_seed(1);

        let result = PerturbationRunner::run(&mut engine, &mut ev, &config).expect("run");
        assert!(result.terminated);
        assert_eq!(result.best_length, 60);
    }

    /// Leaves the tour untouched, so every perturbation is a candidate best.
    struct Idle;

    impl LocalSearch for Idle {
        fn name(&self) -> &'static str {
            "idle"
        }

        fn begin_run<D: Distances + ?Sized>(&mut self, _distances: &D) {}

        fn end_run<D: Distances + ?Sized>(&mut self, _distances: &D) -> Result<(), LifecycleError> {
            Ok(())
        }

        fn optimize<O, R>(
            &mut self,
            _individual: &mut Individual,
            _objective: &mut O,
            _rng: &mut R,
        ) -> crate::local_search::LocalSearchResult
        where
            O: Objective + ?Sized,
            R: Rng + ?Sized,
        {
            crate::local_search::LocalSearchResult::default()
        }
    }

    #[test]
    fn test_budget_hit_by_perturbation_keeps_shorter_tour() {
        let m = DistanceMatrix::from_coordinates(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        let config = PerturbationConfig::default()
            .with_shuffle_fraction(1.0)
            .with_max_no_improve(0);
        let mut improved_runs = 0;

        for seed in 0..50 {
            // Initial tour plus one perturbation exhaust the budget.
            let mut ev = Evaluator::new(&m, Budget::default().with_max_evaluations(2));
            let initial = Individual::from_tour(vec![0, 2, 1, 3], &m);
            let result = PerturbationRunner::run_from(
                &mut Idle,
                &mut ev,
                initial,
                &config,
                &mut create_rng(seed),
            )
            .expect("run");

            assert!(result.terminated);
            assert_eq!(result.restarts, 1);
            assert_eq!(result.best_length, ev.best_length());
            assert_eq!(result.best_length, m.tour_length(&result.best));
            if result.best_length < 48 {
                improved_runs += 1;
            }
        }
        assert!(improved_runs > 0);
    }

    #[test]
    fn test_run_from_given_individual() {
        let m = random_instance(12, &mut create_rng(5));
        let mut engine = LocalSearchConfig::default().build().expect("valid");
        let mut ev = Evaluator::new(&m, Budget::default());
        let initial = Individual::from_tour((0..12).collect(), &m);
        let start = initial.tour_length;
        let config = PerturbationConfig::default().with_max_restarts(5);

        let result = PerturbationRunner::run_from(
            &mut engine,
            &mut ev,
            initial,
            &config,
            &mut create_rng(3),
        )
        .expect("run");
        assert!(result.best_length <= start);
        assert_eq!(result.best_length, m.tour_length(&result.best));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_run_parallel_one_result_per_seed() {
        let m = random_instance(20, &mut create_rng(5));
        let search = LocalSearchConfig::default().with_strategy(SearchStrategy::Random);
        let config = PerturbationConfig::default().with_max_restarts(10);
        let seeds = [1, 2, 3, 4];

        let results =
            PerturbationRunner::run_parallel(&search, &m, &Budget::default(), &config, &seeds)
                .expect("runs");
        assert_eq!(results.len(), 4);
        for r in &results {
            assert_eq!(r.best_length, m.tour_length(&r.best));
            assert!(is_local_optimum(&PermutationMove::ALL, &r.best, &m));
        }

        let again =
            PerturbationRunner::run_parallel(&search, &m, &Budget::default(), &config, &seeds)
                .expect("runs");
        for (a, b) in results.iter().zip(&again) {
            assert_eq!(a.best, b.best);
        }
    }
}
