//! Arc decision variables.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Direction;

/// Index of a binary arc variable within a [`VariableGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(usize);

impl VarId {
    /// Wraps a raw variable index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw variable index, usable as a position in an assignment vector.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The binary variable `x[from][to]`: 1 if the arc `from → to` is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcVariable {
    /// Variable index.
    pub id: VarId,
    /// Tail node.
    pub from: usize,
    /// Head node.
    pub to: usize,
}

impl ArcVariable {
    /// Variable name in the `x_i_j` convention used for export.
    pub fn name(&self) -> String {
        format!("x_{}_{}", self.from, self.to)
    }
}

impl fmt::Display for ArcVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Box bounds and integrality hint for one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableBounds {
    pub lower: f64,
    pub upper: f64,
    pub binary: bool,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            binary: true,
        }
    }
}

/// The n×n grid of arc variables with the diagonal removed.
///
/// Exactly one variable exists per ordered pair `(i, j)` with `i != j`;
/// `x[i][i]` is the constant 0 and has no variable. Variables are numbered
/// row-major, skipping the diagonal, so there are `n·(n−1)` of them.
///
/// # Examples
///
/// ```
/// use qubo_routing::models::{Direction, VariableGrid};
///
/// let grid = VariableGrid::new(3);
/// assert_eq!(grid.len(), 6);
/// assert!(grid.var(1, 1).is_none());
///
/// let x12 = grid.var(1, 2).unwrap();
/// assert_eq!(x12.index(), 3);
/// assert_eq!(grid.arc(x12).name(), "x_1_2");
/// assert_eq!(grid.incident(0, Direction::In).len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableGrid {
    nodes: usize,
}

impl VariableGrid {
    /// Creates the grid for `nodes` nodes (depot included).
    pub fn new(nodes: usize) -> Self {
        Self { nodes }
    }

    /// Number of nodes, depot included.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of arc variables, `n·(n−1)`.
    pub fn len(&self) -> usize {
        self.nodes * self.nodes.saturating_sub(1)
    }

    /// Returns `true` if the grid has no variables (fewer than two nodes).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the variable for arc `from → to`, or `None` on the diagonal
    /// or out of range.
    pub fn var(&self, from: usize, to: usize) -> Option<VarId> {
        if from == to || from >= self.nodes || to >= self.nodes {
            return None;
        }
        let column = if to < from { to } else { to - 1 };
        Some(VarId(from * (self.nodes - 1) + column))
    }

    /// Returns the arc behind a variable.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a variable of this grid.
    pub fn arc(&self, id: VarId) -> ArcVariable {
        assert!(id.0 < self.len(), "variable {} out of range", id.0);
        let from = id.0 / (self.nodes - 1);
        let column = id.0 % (self.nodes - 1);
        let to = if column < from { column } else { column + 1 };
        ArcVariable { id, from, to }
    }

    /// All arc variables in index order.
    pub fn arcs(&self) -> impl Iterator<Item = ArcVariable> + '_ {
        (0..self.len()).map(move |idx| self.arc(VarId(idx)))
    }

    /// The `n−1` variables incident to `node` in the given direction, in
    /// increasing order of the other endpoint.
    ///
    /// `Out` selects `x[node][j]`, `In` selects `x[j][node]`, for all `j != node`.
    pub fn incident(&self, node: usize, direction: Direction) -> Vec<VarId> {
        (0..self.nodes)
            .filter(|&other| other != node)
            .filter_map(|other| match direction {
                Direction::Out => self.var(node, other),
                Direction::In => self.var(other, node),
            })
            .collect()
    }

    /// Bounds for every variable: `[0, 1]` with a binary hint.
    pub fn bounds(&self) -> Vec<VariableBounds> {
        vec![VariableBounds::default(); self.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_variable_per_ordered_pair() {
        for n in 1..8 {
            let grid = VariableGrid::new(n);
            assert_eq!(grid.len(), n * n.saturating_sub(1));
            let mut seen = vec![false; grid.len()];
            for i in 0..n {
                for j in 0..n {
                    match grid.var(i, j) {
                        Some(id) => {
                            assert_ne!(i, j);
                            assert!(!seen[id.index()]);
                            seen[id.index()] = true;
                            let arc = grid.arc(id);
                            assert_eq!((arc.from, arc.to), (i, j));
                        }
                        None => assert_eq!(i, j),
                    }
                }
            }
            assert!(seen.into_iter().all(|s| s));
        }
    }

    #[test]
    fn test_row_major_order() {
        let grid = VariableGrid::new(5);
        let pairs: Vec<(usize, usize)> = grid.arcs().map(|a| (a.from, a.to)).collect();
        assert_eq!(&pairs[..5], &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 0)]);
        assert_eq!(pairs[19], (4, 3));
    }

    #[test]
    fn test_incident_directions() {
        let grid = VariableGrid::new(4);
        let out: Vec<(usize, usize)> = grid
            .incident(2, Direction::Out)
            .into_iter()
            .map(|id| (grid.arc(id).from, grid.arc(id).to))
            .collect();
        assert_eq!(out, vec![(2, 0), (2, 1), (2, 3)]);
        let inc: Vec<(usize, usize)> = grid
            .incident(2, Direction::In)
            .into_iter()
            .map(|id| (grid.arc(id).from, grid.arc(id).to))
            .collect();
        assert_eq!(inc, vec![(0, 2), (1, 2), (3, 2)]);
    }

    #[test]
    fn test_out_of_range() {
        let grid = VariableGrid::new(3);
        assert!(grid.var(3, 0).is_none());
        assert!(grid.var(0, 3).is_none());
        assert!(VariableGrid::new(1).is_empty());
    }

    #[test]
    fn test_bounds() {
        let bounds = VariableGrid::new(3).bounds();
        assert_eq!(bounds.len(), 6);
        assert!(bounds.iter().all(|b| b.lower == 0.0 && b.upper == 1.0 && b.binary));
    }
}
