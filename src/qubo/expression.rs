//! Quadratic expressions over binary arc variables.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, Mul};

use crate::models::VarId;

/// `constant + Σ a_i·x_i + Σ_{i<j} b_ij·x_i·x_j` over binary variables.
///
/// A plain value: combining two expressions with `+` yields a new one, and
/// scaling with `* f64` scales every term. Pair keys are stored with the
/// smaller variable first; terms iterate in variable order, so evaluation
/// and export are deterministic.
///
/// # Examples
///
/// ```
/// use qubo_routing::models::VarId;
/// use qubo_routing::qubo::QuadraticExpression;
///
/// let (a, b) = (VarId::new(0), VarId::new(1));
/// let e = QuadraticExpression::linear(a, 2.0)
///     + QuadraticExpression::pair(b, a, 3.0)
///     + QuadraticExpression::constant(1.0);
/// assert_eq!(e.quadratic_coefficient(a, b), 3.0);
/// assert_eq!(e.evaluate(&[1.0, 1.0]), 6.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadraticExpression {
    constant: f64,
    linear: BTreeMap<VarId, f64>,
    quadratic: BTreeMap<(VarId, VarId), f64>,
}

impl QuadraticExpression {
    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant expression.
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            ..Self::default()
        }
    }

    /// The single term `coefficient·x`.
    pub fn linear(var: VarId, coefficient: f64) -> Self {
        let mut e = Self::zero();
        e.add_linear(var, coefficient);
        e
    }

    /// The single term `coefficient·x_a·x_b`.
    ///
    /// With `a == b` the term collapses to `coefficient·x_a`, since `x² = x`
    /// for binary `x`.
    pub fn pair(a: VarId, b: VarId, coefficient: f64) -> Self {
        let mut e = Self::zero();
        e.add_pair(a, b, coefficient);
        e
    }

    pub(crate) fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    pub(crate) fn add_linear(&mut self, var: VarId, coefficient: f64) {
        *self.linear.entry(var).or_insert(0.0) += coefficient;
    }

    pub(crate) fn add_pair(&mut self, a: VarId, b: VarId, coefficient: f64) {
        if a == b {
            self.add_linear(a, coefficient);
            return;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        *self.quadratic.entry(key).or_insert(0.0) += coefficient;
    }

    /// Constant term.
    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Linear coefficient of `var` (zero if absent).
    pub fn linear_coefficient(&self, var: VarId) -> f64 {
        self.linear.get(&var).copied().unwrap_or(0.0)
    }

    /// Pair coefficient of `x_a·x_b` (zero if absent), order-insensitive.
    pub fn quadratic_coefficient(&self, a: VarId, b: VarId) -> f64 {
        let key = if a < b { (a, b) } else { (b, a) };
        self.quadratic.get(&key).copied().unwrap_or(0.0)
    }

    /// Linear terms in variable order.
    pub fn linear_terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.linear.iter().map(|(&v, &c)| (v, c))
    }

    /// Pair terms in `(smaller, larger)` variable order.
    pub fn quadratic_terms(&self) -> impl Iterator<Item = ((VarId, VarId), f64)> + '_ {
        self.quadratic.iter().map(|(&k, &c)| (k, c))
    }

    /// Number of distinct linear terms.
    pub fn num_linear(&self) -> usize {
        self.linear.len()
    }

    /// Number of distinct pair terms.
    pub fn num_quadratic(&self) -> usize {
        self.quadratic.len()
    }

    /// Largest variable index referenced plus one.
    pub fn num_variables(&self) -> usize {
        let lin = self.linear.keys().next_back().map(|v| v.index() + 1);
        let quad = self.quadratic.keys().map(|(_, b)| b.index() + 1).max();
        lin.into_iter().chain(quad).max().unwrap_or(0)
    }

    /// Evaluates the expression; variables beyond `values` count as 0.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        let x = |v: VarId| values.get(v.index()).copied().unwrap_or(0.0);
        let mut total = self.constant;
        for (&v, &c) in &self.linear {
            total += c * x(v);
        }
        for (&(a, b), &c) in &self.quadratic {
            total += c * x(a) * x(b);
        }
        total
    }

    /// Returns `true` if both expressions have the same terms with
    /// coefficients equal within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        (self.constant - other.constant).abs() <= tol
            && self.linear.len() == other.linear.len()
            && self.quadratic.len() == other.quadratic.len()
            && self
                .linear
                .iter()
                .all(|(v, c)| other.linear.get(v).is_some_and(|o| (c - o).abs() <= tol))
            && self
                .quadratic
                .iter()
                .all(|(k, c)| other.quadratic.get(k).is_some_and(|o| (c - o).abs() <= tol))
    }
}

impl Add for QuadraticExpression {
    type Output = QuadraticExpression;

    fn add(mut self, rhs: QuadraticExpression) -> QuadraticExpression {
        self.constant += rhs.constant;
        for (v, c) in rhs.linear {
            self.add_linear(v, c);
        }
        for ((a, b), c) in rhs.quadratic {
            self.add_pair(a, b, c);
        }
        self
    }
}

impl Mul<f64> for QuadraticExpression {
    type Output = QuadraticExpression;

    fn mul(mut self, factor: f64) -> QuadraticExpression {
        self.constant *= factor;
        self.linear.values_mut().for_each(|c| *c *= factor);
        self.quadratic.values_mut().for_each(|c| *c *= factor);
        self
    }
}

impl Sum for QuadraticExpression {
    fn sum<I: Iterator<Item = QuadraticExpression>>(iter: I) -> Self {
        iter.fold(QuadraticExpression::zero(), |acc, e| acc + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VarId {
        VarId::new(i)
    }

    #[test]
    fn test_zero() {
        let e = QuadraticExpression::zero();
        assert_eq!(e.evaluate(&[1.0, 1.0]), 0.0);
        assert_eq!(e.num_variables(), 0);
    }

    #[test]
    fn test_add_merges_terms() {
        let e = QuadraticExpression::linear(v(0), 1.5)
            + QuadraticExpression::linear(v(0), 2.5)
            + QuadraticExpression::pair(v(2), v(1), 1.0)
            + QuadraticExpression::pair(v(1), v(2), 2.0);
        assert_eq!(e.num_linear(), 1);
        assert_eq!(e.linear_coefficient(v(0)), 4.0);
        assert_eq!(e.num_quadratic(), 1);
        assert_eq!(e.quadratic_coefficient(v(2), v(1)), 3.0);
        assert_eq!(e.num_variables(), 3);
    }

    #[test]
    fn test_self_pair_collapses() {
        let e = QuadraticExpression::pair(v(3), v(3), 5.0);
        assert_eq!(e.num_quadratic(), 0);
        assert_eq!(e.linear_coefficient(v(3)), 5.0);
    }

    #[test]
    fn test_scale() {
        let e = (QuadraticExpression::constant(1.0)
            + QuadraticExpression::linear(v(0), -2.0)
            + QuadraticExpression::pair(v(0), v(1), 4.0))
            * 10.0;
        assert_eq!(e.constant_term(), 10.0);
        assert_eq!(e.linear_coefficient(v(0)), -20.0);
        assert_eq!(e.quadratic_coefficient(v(0), v(1)), 40.0);
    }

    #[test]
    fn test_evaluate_missing_values_are_zero() {
        let e = QuadraticExpression::linear(v(5), 7.0) + QuadraticExpression::constant(1.0);
        assert_eq!(e.evaluate(&[1.0]), 1.0);
    }

    #[test]
    fn test_sum_and_approx_eq() {
        let parts = vec![
            QuadraticExpression::linear(v(0), 0.1),
            QuadraticExpression::linear(v(0), 0.2),
        ];
        let total: QuadraticExpression = parts.into_iter().sum();
        let expected = QuadraticExpression::linear(v(0), 0.3);
        assert!(total.approx_eq(&expected, 1e-12));
        assert!(!total.approx_eq(&QuadraticExpression::linear(v(1), 0.3), 1e-12));
    }
}
