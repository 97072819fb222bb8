//! Ising (spin) form of a QUBO.
//!
//! Substituting `x = (1 − z)/2` with spins `z ∈ {+1, −1}` maps
//! `c·x` to `c/2 − (c/2)·z` and `c·x_a·x_b` to
//! `(c/4)·(1 − z_a − z_b + z_a·z_b)`.

use std::collections::BTreeMap;

use super::QuadraticExpression;

const DROP_TOLERANCE: f64 = 1e-9;

/// `H(z) = offset + Σ h_i·z_i + Σ_{i<j} J_ij·z_i·z_j`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsingHamiltonian {
    offset: f64,
    fields: BTreeMap<usize, f64>,
    couplings: BTreeMap<(usize, usize), f64>,
}

impl IsingHamiltonian {
    /// Converts a binary expression, dropping coefficients with magnitude
    /// at most `1e-9`.
    pub fn from_expression(expression: &QuadraticExpression) -> Self {
        let mut offset = expression.constant_term();
        let mut fields: BTreeMap<usize, f64> = BTreeMap::new();
        let mut couplings: BTreeMap<(usize, usize), f64> = BTreeMap::new();

        for (v, c) in expression.linear_terms() {
            offset += c / 2.0;
            *fields.entry(v.index()).or_insert(0.0) -= c / 2.0;
        }
        for ((a, b), c) in expression.quadratic_terms() {
            offset += c / 4.0;
            *fields.entry(a.index()).or_insert(0.0) -= c / 4.0;
            *fields.entry(b.index()).or_insert(0.0) -= c / 4.0;
            *couplings.entry((a.index(), b.index())).or_insert(0.0) += c / 4.0;
        }

        fields.retain(|_, c| c.abs() > DROP_TOLERANCE);
        couplings.retain(|_, c| c.abs() > DROP_TOLERANCE);

        Self {
            offset,
            fields,
            couplings,
        }
    }

    /// Identity (constant) term.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Single-spin `Z_i` coefficients.
    pub fn fields(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.fields.iter().map(|(&i, &c)| (i, c))
    }

    /// Two-spin `Z_i·Z_j` coefficients with `i < j`.
    pub fn couplings(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.couplings.iter().map(|(&k, &c)| (k, c))
    }

    /// Number of non-identity terms.
    pub fn num_terms(&self) -> usize {
        self.fields.len() + self.couplings.len()
    }

    /// Energy of a spin configuration (`+1` or `−1` per variable).
    pub fn energy(&self, spins: &[i8]) -> f64 {
        let z = |i: usize| f64::from(spins[i]);
        self.offset
            + self.fields.iter().map(|(&i, &h)| h * z(i)).sum::<f64>()
            + self
                .couplings
                .iter()
                .map(|(&(a, b), &j)| j * z(a) * z(b))
                .sum::<f64>()
    }
}
