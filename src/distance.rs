//! Symmetric distance matrix shared read-only by all solvers.

use crate::error::{Result, TspError};

/// Smallest instance for which a non-degenerate 2-opt move exists.
pub const MIN_CITIES: usize = 4;

/// Dense `n x n` matrix of pairwise city distances.
///
/// Entries are finite and non-negative, the matrix is symmetric and its
/// diagonal is zero; 2-opt deltas rely on symmetry. The matrix never
/// changes after construction, so solvers borrow it immutably.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidInput`] if the rows are not square, the
    /// matrix is not symmetric with a zero diagonal, or an entry is
    /// negative, NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_metaheur::DistanceMatrix;
    ///
    /// let m = DistanceMatrix::from_rows(vec![
    ///     vec![0.0, 2.0],
    ///     vec![2.0, 0.0],
    /// ]).unwrap();
    /// assert_eq!(m.get(0, 1), 2.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::InvalidInput(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_flat(n, data)
    }

    /// Builds the Euclidean distance matrix of a set of planar points.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidInput`] if a coordinate is not finite.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Result<Self> {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (xi, yi) = points[i];
                let (xj, yj) = points[j];
                let d = (xi - xj).hypot(yi - yj);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::from_flat(n, data)
    }

    fn from_flat(n: usize, data: Vec<f64>) -> Result<Self> {
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(TspError::InvalidInput(format!(
                "distance ({}, {}) = {} is not a finite non-negative number",
                pos / n,
                pos % n,
                data[pos]
            )));
        }
        for i in 0..n {
            if data[i * n + i] != 0.0 {
                return Err(TspError::InvalidInput(format!(
                    "distance ({i}, {i}) = {} must be zero",
                    data[i * n + i]
                )));
            }
            for j in (i + 1)..n {
                if data[i * n + j] != data[j * n + i] {
                    return Err(TspError::InvalidInput(format!(
                        "distance ({i}, {j}) = {} differs from ({j}, {i}) = {}",
                        data[i * n + j],
                        data[j * n + i]
                    )));
                }
            }
        }
        Ok(Self { n, data })
    }

    /// Distance between cities `from` and `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Number of cities.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Checks that the instance admits at least one 2-opt move.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidInput`] for fewer than [`MIN_CITIES`] cities.
    pub fn ensure_searchable(&self) -> Result<()> {
        if self.n < MIN_CITIES {
            return Err(TspError::InvalidInput(format!(
                "need at least {MIN_CITIES} cities for 2-opt search, got {}",
                self.n
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coordinates_symmetric_zero_diagonal() {
        let m = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]).unwrap();
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!((m.get(0, 1) - 5.0).abs() < 1e-12);
        assert!((m.get(0, 2) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_nan() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]]);
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_infinite_coordinate() {
        let err = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (f64::INFINITY, 1.0)]);
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_negative() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![-1.0, 0.0]]);
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_asymmetric() {
        let rows = vec![
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1.0, 0.0, 1.0, 2.0, 3.0],
            vec![2.0, 1.0, 0.0, 1.0, 2.0],
            vec![3.0, 2.0, 1.0, 0.0, 1.0],
            vec![7.0, 3.0, 2.0, 1.0, 0.0],
        ];
        let err = DistanceMatrix::from_rows(rows);
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_nonzero_diagonal() {
        let err = DistanceMatrix::from_rows(vec![vec![3.0, 1.0], vec![1.0, 3.0]]);
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(matches!(err, Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_ensure_searchable() {
        let small =
            DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
        assert!(small.ensure_searchable().is_err());

        let square =
            DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
                .unwrap();
        assert!(square.ensure_searchable().is_ok());
    }
}
