//! Degree penalty terms.
//!
//! A degree constraint "exactly `t` of the binary variables `v_1..v_m` are 1"
//! becomes the penalty `A·(Σv − t)²`. Because `v² = v` for binary `v`, the
//! square expands to
//!
//! ```text
//! A·( Σv + 2·Σ_{a<b} v_a·v_b − 2t·Σv + t² )
//! ```
//!
//! which has no squared terms: each variable gets the linear coefficient
//! `A·(1 − 2t)`, each unordered pair gets `2A`, and the constant is `A·t²`.
//! The penalty is zero exactly when the constraint holds and grows with the
//! square of the deviation otherwise.

use crate::models::{DegreeConstraint, VarId, VariableGrid};

use super::QuadraticExpression;

/// Builds `weight·(Σ variables − target)²` over binary variables.
///
/// `variables` must be pairwise distinct. With no variables the result is
/// the constant `weight·target²`.
///
/// # Examples
///
/// ```
/// use qubo_routing::models::VarId;
/// use qubo_routing::qubo::build_degree_penalty;
///
/// let vars = [VarId::new(0), VarId::new(1), VarId::new(2)];
/// let p = build_degree_penalty(&vars, 1, 10.0);
///
/// assert_eq!(p.linear_coefficient(vars[0]), -10.0);
/// assert_eq!(p.quadratic_coefficient(vars[0], vars[2]), 20.0);
/// assert_eq!(p.constant_term(), 10.0);
/// // exactly one selected: no penalty
/// assert_eq!(p.evaluate(&[0.0, 1.0, 0.0]), 0.0);
/// // two selected: one unit of deviation
/// assert_eq!(p.evaluate(&[1.0, 1.0, 0.0]), 10.0);
/// ```
pub fn build_degree_penalty(variables: &[VarId], target: usize, weight: f64) -> QuadraticExpression {
    let t = target as f64;
    let mut penalty = QuadraticExpression::zero();

    // Σv (from v² = v) combined with −2t·Σv
    let linear = weight * (1.0 - 2.0 * t);
    for &v in variables {
        penalty.add_linear(v, linear);
    }

    // 2·Σ_{a<b} v_a·v_b
    for (a, &va) in variables.iter().enumerate() {
        for &vb in &variables[a + 1..] {
            penalty.add_pair(va, vb, 2.0 * weight);
        }
    }

    penalty.add_constant(weight * t * t);
    penalty
}

/// Builds the penalty for one degree constraint, selecting the node's
/// outgoing or incoming arc variables from `grid`.
pub fn degree_penalty(
    grid: &VariableGrid,
    constraint: &DegreeConstraint,
    weight: f64,
) -> QuadraticExpression {
    let variables = grid.incident(constraint.node, constraint.direction);
    build_degree_penalty(&variables, constraint.target, weight)
}
