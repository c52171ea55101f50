//! The four permutation moves: swap, reverse, rotate-left, rotate-right.
//!
//! Every delta touches at most six edges, independent of `n` and of the
//! window length. Positions are cyclic: the node before position `0` is the
//! last node and the node after position `n - 1` is the first.
//!
//! # Reference
//!
//! Weise, T. et al. (2014). "Benchmarking Optimization Algorithms: An Open
//! Source Framework for the Traveling Salesman Problem", *IEEE Computational
//! Intelligence Magazine* 9(3), 40-52.

use super::types::Neighborhood;
use crate::objective::Distances;

/// A closed set of permutation update operators.
///
/// # Examples
///
/// ```
/// use tsp_neighborhood::neighborhood::{Neighborhood, PermutationMove};
/// use tsp_neighborhood::objective::{DistanceMatrix, Distances};
///
/// let m = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let mut tour = vec![0, 2, 1, 3];
/// let before = m.tour_length(&tour);
/// let delta = PermutationMove::Reverse.delta(&tour, &m, 1, 2);
/// PermutationMove::Reverse.apply(&mut tour, 1, 2);
/// assert_eq!(tour, vec![0, 1, 2, 3]);
/// assert_eq!(m.tour_length(&tour), before + delta);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PermutationMove {
    /// Exchange the nodes at positions `i` and `j`.
    Swap,
    /// Reverse the segment `[i, j]` (a 2-opt move).
    Reverse,
    /// Shift `[i, j]` left by one; the node at `i` moves to `j`.
    RotateLeft,
    /// Shift `[i, j]` right by one; the node at `j` moves to `i`.
    RotateRight,
}

impl PermutationMove {
    /// All moves, in declaration order.
    pub const ALL: [PermutationMove; 4] = [
        PermutationMove::Swap,
        PermutationMove::Reverse,
        PermutationMove::RotateLeft,
        PermutationMove::RotateRight,
    ];
}

impl Neighborhood for PermutationMove {
    fn name(&self) -> &'static str {
        match self {
            PermutationMove::Swap => "swap",
            PermutationMove::Reverse => "reverse",
            PermutationMove::RotateLeft => "rotate-left",
            PermutationMove::RotateRight => "rotate-right",
        }
    }

    #[inline]
    fn delta<D: Distances + ?Sized>(&self, tour: &[usize], distances: &D, i: usize, j: usize) -> i64 {
        debug_assert!(i < j && j < tour.len(), "invalid pair ({i}, {j})");
        match self {
            PermutationMove::Swap => swap_delta(tour, distances, i, j),
            PermutationMove::Reverse => reverse_delta(tour, distances, i, j),
            PermutationMove::RotateLeft => rotate_left_delta(tour, distances, i, j),
            PermutationMove::RotateRight => rotate_right_delta(tour, distances, i, j),
        }
    }

    #[inline]
    fn apply(&self, tour: &mut [usize], i: usize, j: usize) {
        match self {
            PermutationMove::Swap => tour.swap(i, j),
            PermutationMove::Reverse => tour[i..=j].reverse(),
            PermutationMove::RotateLeft => tour[i..=j].rotate_left(1),
            PermutationMove::RotateRight => tour[i..=j].rotate_right(1),
        }
    }
}

#[inline]
fn before(tour: &[usize], k: usize) -> usize {
    if k == 0 {
        tour[tour.len() - 1]
    } else {
        tour[k - 1]
    }
}

#[inline]
fn after(tour: &[usize], k: usize) -> usize {
    if k + 1 == tour.len() {
        tour[0]
    } else {
        tour[k + 1]
    }
}

fn swap_delta<D: Distances + ?Sized>(tour: &[usize], d: &D, i: usize, j: usize) -> i64 {
    let n = tour.len();
    let x = tour[i];
    let y = tour[j];

    if j == i + 1 {
        if n == 2 {
            return 0;
        }
        // a x y b -> a y x b
        let a = before(tour, i);
        let b = after(tour, j);
        return d.distance(a, y) + d.distance(x, b) - d.distance(a, x) - d.distance(y, b);
    }

    if i == 0 && j == n - 1 {
        // y precedes x cyclically: c y | x e -> c x | y e
        let c = tour[j - 1];
        let e = tour[1];
        return d.distance(c, x) + d.distance(y, e) - d.distance(c, y) - d.distance(x, e);
    }

    let a = before(tour, i);
    let e = tour[i + 1];
    let c = tour[j - 1];
    let b = after(tour, j);
    d.distance(a, y) + d.distance(y, e) + d.distance(c, x) + d.distance(x, b)
        - d.distance(a, x)
        - d.distance(x, e)
        - d.distance(c, y)
        - d.distance(y, b)
}

fn reverse_delta<D: Distances + ?Sized>(tour: &[usize], d: &D, i: usize, j: usize) -> i64 {
    let n = tour.len();
    // Reversing n or n - 1 positions yields the mirrored cycle.
    if j - i + 2 >= n {
        return 0;
    }
    let a = before(tour, i);
    let b = after(tour, j);
    let x = tour[i];
    let y = tour[j];
    d.distance(a, y) + d.distance(x, b) - d.distance(a, x) - d.distance(y, b)
}

fn rotate_left_delta<D: Distances + ?Sized>(tour: &[usize], d: &D, i: usize, j: usize) -> i64 {
    if j - i + 1 == tour.len() {
        return 0;
    }
    // a x x1 .. y b -> a x1 .. y x b
    let a = before(tour, i);
    let b = after(tour, j);
    let x = tour[i];
    let x1 = tour[i + 1];
    let y = tour[j];
    d.distance(a, x1) + d.distance(y, x) + d.distance(x, b)
        - d.distance(a, x)
        - d.distance(x, x1)
        - d.distance(y, b)
}

fn rotate_right_delta<D: Distances + ?Sized>(tour: &[usize], d: &D, i: usize, j: usize) -> i64 {
    if j - i + 1 == tour.len() {
        return 0;
    }
    // a x .. w y b -> a y x .. w b
    let a = before(tour, i);
    let b = after(tour, j);
    let x = tour[i];
    let w = tour[j - 1];
    let y = tour[j];
    d.distance(a, y) + d.distance(y, x) + d.distance(w, b)
        - d.distance(a, x)
        - d.distance(w, y)
        - d.distance(y, b)
}
