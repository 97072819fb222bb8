//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::{QuboError, Result};

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Node 0 is the depot. Entries are finite and non-negative and the
/// diagonal is zero; the matrix may be asymmetric.
///
/// # Examples
///
/// ```
/// use qubo_routing::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 4.0],
///     vec![8.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// Fails if the rows do not form a non-empty square, or if any entry is
    /// negative, non-finite, or a non-zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(QuboError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(QuboError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Self::from_data(size, data)
    }

    /// Creates a distance matrix from a flat row-major grid.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(QuboError::EmptyMatrix);
        }
        if data.len() != size * size {
            return Err(QuboError::NotSquare {
                row: data.len() / size,
                len: data.len() % size,
                expected: size,
            });
        }
        let dm = Self { data, size };
        dm.validate()?;
        Ok(dm)
    }

    fn validate(&self) -> Result<()> {
        for from in 0..self.size {
            for to in 0..self.size {
                let value = self.get(from, to);
                if from == to {
                    if value != 0.0 {
                        return Err(QuboError::NonZeroDiagonal { node: from, value });
                    }
                } else if !value.is_finite() || value < 0.0 {
                    return Err(QuboError::InvalidDistance { from, to, value });
                }
            }
        }
        Ok(())
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Largest off-diagonal entry, or `0.0` for a single node.
    pub fn max_distance(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Returns the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size).map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = QuboError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(dm: DistanceMatrix) -> Self {
        dm.to_rows()
    }
}
