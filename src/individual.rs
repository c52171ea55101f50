//! Solution records and tour utilities.

use std::cmp::Ordering;

use rand::Rng;

use crate::objective::Distances;

/// Sentinel for an unset tour length.
pub const UNSET_LENGTH: i64 = i64::MAX;

/// A candidate round trip with its cached evaluation.
///
/// The local-search engines mutate `solution` in place and keep
/// `tour_length` in sync by adding move deltas; they never replace the
/// vector itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// Visiting order, a permutation of `0..n`.
    pub solution: Option<Vec<usize>>,
    /// Cached round-trip length, [`UNSET_LENGTH`] when unknown.
    pub tour_length: i64,
    /// Fitness used by higher-level search; `NaN` when unset, otherwise `>= 0`.
    pub fitness: f64,
    /// Name of the procedure that last produced this solution.
    pub producer: Option<&'static str>,
}

impl Default for Individual {
    fn default() -> Self {
        Self::new()
    }
}

impl Individual {
    /// An empty record with all fields at their sentinels.
    pub fn new() -> Self {
        Self {
            solution: None,
            tour_length: UNSET_LENGTH,
            fitness: f64::NAN,
            producer: None,
        }
    }

    /// Wraps `tour` and evaluates its length once, in full.
    pub fn from_tour<D: Distances + ?Sized>(tour: Vec<usize>, distances: &D) -> Self {
        let tour_length = distances.tour_length(&tour);
        Self {
            solution: Some(tour),
            tour_length,
            fitness: tour_length as f64,
            producer: None,
        }
    }

    /// Drops the solution and resets the evaluation.
    pub fn clear(&mut self) {
        self.solution = None;
        self.producer = None;
        self.clear_evaluation();
    }

    /// Resets only `tour_length` and `fitness`.
    pub fn clear_evaluation(&mut self) {
        self.tour_length = UNSET_LENGTH;
        self.fitness = f64::NAN;
    }

    /// Copies solution, length and fitness from `other`, reusing this
    /// record's allocation. `producer` is left as is.
    pub fn assign(&mut self, other: &Individual) {
        match (&mut self.solution, &other.solution) {
            (Some(mine), Some(theirs)) => mine.clone_from(theirs),
            (mine, theirs) => *mine = theirs.clone(),
        }
        self.tour_length = other.tour_length;
        self.fitness = other.fitness;
    }

    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    pub fn is_evaluated(&self) -> bool {
        self.tour_length != UNSET_LENGTH
    }

    /// Borrow of the tour.
    ///
    /// # Panics
    /// Panics if the record holds no solution.
    pub fn tour(&self) -> &[usize] {
        self.solution
            .as_deref()
            .expect("individual has no solution")
    }
}

/// Orders by tour length, shorter first; unset lengths sort last.
pub fn compare_by_tour_length(a: &Individual, b: &Individual) -> Ordering {
    a.tour_length.cmp(&b.tour_length)
}

/// Orders by fitness, smaller first; `NaN` (unset) sorts last.
pub fn compare_by_fitness(a: &Individual, b: &Individual) -> Ordering {
    match (a.fitness.is_nan(), b.fitness.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.fitness.total_cmp(&b.fitness),
    }
}

/// Returns `true` if `tour` contains every node of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &node in tour {
        if node >= n || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

/// A uniformly random tour over `0..n`.
pub fn random_tour<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut tour: Vec<usize> = (0..n).collect();
    crate::random::shuffle(&mut tour, rng);
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::DistanceMatrix;
    use crate::random::create_rng;

    fn line() -> DistanceMatrix {
        DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
    }

    #[test]
    fn test_new_has_sentinels() {
        let ind = Individual::new();
        assert!(!ind.has_solution());
        assert!(!ind.is_evaluated());
        assert_eq!(ind.tour_length, UNSET_LENGTH);
        assert!(ind.fitness.is_nan());
    }

    #[test]
    fn test_from_tour_evaluates() {
        let ind = Individual::from_tour(vec![0, 2, 1, 3], &line());
        // 2 + 1 + 2 + 3
        assert_eq!(ind.tour_length, 8);
        assert_eq!(ind.fitness, 8.0);
        assert_eq!(ind.tour(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_clear_and_clear_evaluation() {
        let mut ind = Individual::from_tour(vec![0, 1, 2, 3], &line());
        ind.clear_evaluation();
        assert!(ind.has_solution());
        assert!(!ind.is_evaluated());
        assert!(ind.fitness.is_nan());

        ind.clear();
        assert!(!ind.has_solution());
    }

    #[test]
    fn test_assign_copies_values() {
        let src = Individual::from_tour(vec![3, 2, 1, 0], &line());
        let mut dst = Individual::from_tour(vec![0, 1, 2, 3], &line());
        dst.assign(&src);
        assert_eq!(dst, src);

        let mut empty = Individual::new();
        empty.assign(&src);
        assert_eq!(empty.tour(), &[3, 2, 1, 0]);

        empty.assign(&Individual::new());
        assert!(!empty.has_solution());
    }

    #[test]
    fn test_assign_keeps_producer() {
        let mut src = Individual::from_tour(vec![3, 2, 1, 0], &line());
        src.producer = Some("vns");
        let mut dst = Individual::new();
        dst.producer = Some("random");
        dst.assign(&src);
        assert_eq!(dst.tour(), src.tour());
        assert_eq!(dst.tour_length, src.tour_length);
        assert_eq!(dst.producer, Some("random"));
    }

    #[test]
    fn test_compare_by_tour_length() {
        let m = line();
        let short = Individual::from_tour(vec![0, 1, 2, 3], &m);
        let long = Individual::from_tour(vec![0, 2, 1, 3], &m);
        let unset = Individual::new();
        let mut v = vec![unset.clone(), long.clone(), short.clone()];
        v.sort_by(compare_by_tour_length);
        assert_eq!(v[0].tour_length, 6);
        assert_eq!(v[1].tour_length, 8);
        assert!(!v[2].is_evaluated());
    }

    #[test]
    fn test_compare_by_fitness_nan_last() {
        let mut a = Individual::new();
        a.fitness = 3.0;
        let mut b = Individual::new();
        b.fitness = 1.0;
        let c = Individual::new();
        assert_eq!(compare_by_fitness(&a, &b), Ordering::Greater);
        assert_eq!(compare_by_fitness(&c, &a), Ordering::Greater);
        assert_eq!(compare_by_fitness(&a, &c), Ordering::Less);
        assert_eq!(compare_by_fitness(&c, &c), Ordering::Equal);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[2, 0, 0], 3));
        assert!(!is_permutation(&[2, 0, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(is_permutation(&[], 0));
    }

    #[test]
    fn test_random_tour_is_permutation() {
        let mut rng = create_rng(42);
        for n in 0..12 {
            assert!(is_permutation(&random_tour(n, &mut rng), n));
        }
    }
}
