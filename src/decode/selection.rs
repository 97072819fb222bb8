//! Thresholded arc selection.

use std::collections::VecDeque;

use crate::models::VariableGrid;
use crate::solver::Assignment;

/// Threshold above which an arc variable counts as selected.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// The set of arcs `i → j` whose variable value exceeds a threshold.
///
/// Arcs are kept sorted by `(from, to)` and never include self-loops.
///
/// # Examples
///
/// ```
/// use qubo_routing::decode::ArcSelection;
///
/// let sel = ArcSelection::from_arcs(3, [(0, 2), (0, 1), (1, 0), (2, 2)]);
/// assert_eq!(sel.arcs(), &[(0, 1), (0, 2), (1, 0)]);
/// assert_eq!(sel.out_degree(0), 2);
/// assert_eq!(sel.in_degree(0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcSelection {
    nodes: usize,
    arcs: Vec<(usize, usize)>,
}

impl ArcSelection {
    /// Selects arcs whose assignment value is strictly greater than
    /// `threshold`.
    pub fn from_assignment(grid: &VariableGrid, assignment: &Assignment, threshold: f64) -> Self {
        let arcs = grid
            .arcs()
            .filter(|arc| assignment.value(arc.id) > threshold)
            .map(|arc| (arc.from, arc.to))
            .collect();
        Self {
            nodes: grid.nodes(),
            arcs,
        }
    }

    /// Builds a selection from explicit arcs; self-loops, out-of-range arcs
    /// and duplicates are dropped.
    pub fn from_arcs(nodes: usize, arcs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut arcs: Vec<(usize, usize)> = arcs
            .into_iter()
            .filter(|&(i, j)| i != j && i < nodes && j < nodes)
            .collect();
        arcs.sort_unstable();
        arcs.dedup();
        Self { nodes, arcs }
    }

    /// Number of nodes.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Selected arcs in `(from, to)` order.
    pub fn arcs(&self) -> &[(usize, usize)] {
        &self.arcs
    }

    /// Returns `true` if `from → to` is selected.
    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.arcs.binary_search(&(from, to)).is_ok()
    }

    /// Number of selected arcs leaving `node`.
    pub fn out_degree(&self, node: usize) -> usize {
        self.arcs.iter().filter(|&&(i, _)| i == node).count()
    }

    /// Number of selected arcs entering `node`.
    pub fn in_degree(&self, node: usize) -> usize {
        self.arcs.iter().filter(|&&(_, j)| j == node).count()
    }

    /// Per-node FIFO queues of selected successors, in increasing order.
    pub fn successors(&self) -> Vec<VecDeque<usize>> {
        let mut succ = vec![VecDeque::new(); self.nodes];
        for &(i, j) in &self.arcs {
            succ[i].push_back(j);
        }
        succ
    }
}
