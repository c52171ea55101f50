//! Dense symmetric distance matrix.

use std::fmt;

use super::types::Distances;

/// Reasons a raw matrix is rejected by [`DistanceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Row `row` has `len` entries instead of `n`.
    NotSquare { row: usize, len: usize, n: usize },
    /// `d(a, b) != d(b, a)`.
    Asymmetric { a: usize, b: usize },
    /// A negative edge length.
    Negative { a: usize, b: usize },
    /// A node with non-zero distance to itself.
    NonZeroDiagonal { node: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::NotSquare { row, len, n } => {
                write!(f, "row {row} has {len} entries, expected {n}")
            }
            MatrixError::Asymmetric { a, b } => {
                write!(f, "distance({a}, {b}) differs from distance({b}, {a})")
            }
            MatrixError::Negative { a, b } => write!(f, "distance({a}, {b}) is negative"),
            MatrixError::NonZeroDiagonal { node } => {
                write!(f, "distance({node}, {node}) must be zero")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Symmetric integer distances stored row-major.
///
/// # Examples
///
/// ```
/// use tsp_neighborhood::objective::{DistanceMatrix, Distances};
///
/// let m = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
/// assert_eq!(m.distance(0, 2), 5);
/// assert_eq!(m.tour_length(&[0, 1, 2]), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<i64>,
}

impl DistanceMatrix {
    /// Builds a matrix from explicit rows, checking shape and symmetry.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        for (row, r) in rows.iter().enumerate() {
            if r.len() != n {
                return Err(MatrixError::NotSquare {
                    row,
                    len: r.len(),
                    n,
                });
            }
        }
        for a in 0..n {
            if rows[a][a] != 0 {
                return Err(MatrixError::NonZeroDiagonal { node: a });
            }
            for b in (a + 1)..n {
                if rows[a][b] < 0 {
                    return Err(MatrixError::Negative { a, b });
                }
                if rows[a][b] != rows[b][a] {
                    return Err(MatrixError::Asymmetric { a, b });
                }
            }
        }
        Ok(Self {
            n,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Euclidean distances rounded to the nearest integer (TSPLIB `EUC_2D`).
    pub fn from_coordinates(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut data = vec![0i64; n * n];
        for a in 0..n {
            for b in (a + 1)..n {
                let dx = points[a].0 - points[b].0;
                let dy = points[a].1 - points[b].1;
                let d = ((dx * dx + dy * dy).sqrt() + 0.5).floor() as i64;
                data[a * n + b] = d;
                data[b * n + a] = d;
            }
        }
        Self { n, data }
    }
}

impl Distances for DistanceMatrix {
    #[inline]
    fn n(&self) -> usize {
        self.n
    }

    #[inline]
    fn distance(&self, a: usize, b: usize) -> i64 {
        self.data[a * self.n + b]
    }
}
