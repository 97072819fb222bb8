//! Dense matrix form used by the bundled solvers.

use super::QuadraticExpression;

/// `E(x) = c + Σ h_i·x_i + Σ_{i<j} Q_ij·x_i·x_j` with `Q` stored as a full
/// symmetric `n×n` matrix with zero diagonal.
///
/// `Q[i][j]` and `Q[j][i]` both hold the full pair coefficient, so a single
/// row gives the local field of a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseQubo {
    size: usize,
    linear: Vec<f64>,
    couplings: Vec<f64>,
    constant: f64,
}

impl DenseQubo {
    /// Lays out `expression` over `size` variables.
    ///
    /// # Panics
    ///
    /// Panics if the expression references a variable `>= size`.
    pub fn from_expression(expression: &QuadraticExpression, size: usize) -> Self {
        let mut linear = vec![0.0; size];
        let mut couplings = vec![0.0; size * size];
        for (v, c) in expression.linear_terms() {
            linear[v.index()] += c;
        }
        for ((a, b), c) in expression.quadratic_terms() {
            let (a, b) = (a.index(), b.index());
            couplings[a * size + b] += c;
            couplings[b * size + a] += c;
        }
        Self {
            size,
            linear,
            couplings,
            constant: expression.constant_term(),
        }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if there are no variables.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Constant term.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Linear vector `h`.
    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    /// Pair coefficient `Q_ab`.
    pub fn coupling(&self, a: usize, b: usize) -> f64 {
        self.couplings[a * self.size + b]
    }

    /// Row `i` of `Q`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.couplings[i * self.size..(i + 1) * self.size]
    }

    /// Energy of a bit vector.
    pub fn energy(&self, x: &[bool]) -> f64 {
        let mut total = self.constant;
        for i in 0..self.size {
            if !x[i] {
                continue;
            }
            total += self.linear[i];
            let row = self.row(i);
            for j in (i + 1)..self.size {
                if x[j] {
                    total += row[j];
                }
            }
        }
        total
    }

    /// Energy change from flipping bit `i`.
    pub fn flip_delta(&self, x: &[bool], i: usize) -> f64 {
        let row = self.row(i);
        let mut field = self.linear[i];
        for (j, &q) in row.iter().enumerate() {
            if x[j] {
                field += q;
            }
        }
        if x[i] {
            -field
        } else {
            field
        }
    }

    /// Upper bound on the magnitude of any single-flip energy change.
    pub fn max_flip_magnitude(&self) -> f64 {
        (0..self.size)
            .map(|i| self.linear[i].abs() + self.row(i).iter().map(|q| q.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }
}
