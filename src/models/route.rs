//! Decoded vehicle routes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// Index of the depot node.
pub const DEPOT: usize = 0;

/// An ordered node sequence walked by one vehicle, starting at the depot.
///
/// A decoded route may end back at the depot (closed) or stop early
/// (truncated) when the arc selection runs out of successors.
///
/// # Examples
///
/// ```
/// use qubo_routing::models::Route;
///
/// let mut route = Route::new(0);
/// route.push(3);
/// route.push(0);
/// assert!(route.is_closed());
/// assert_eq!(route.customers(), vec![3]);
/// assert_eq!(route.to_string(), "0 -> 3 -> 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle: usize,
    nodes: Vec<usize>,
}

impl Route {
    /// Creates a route for `vehicle` positioned at the depot.
    pub fn new(vehicle: usize) -> Self {
        Self {
            vehicle,
            nodes: vec![DEPOT],
        }
    }

    /// Appends the next visited node.
    pub fn push(&mut self, node: usize) {
        self.nodes.push(node);
    }

    /// Vehicle index (0-based).
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Full node trace, depot first.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Node the route currently ends at.
    pub fn last(&self) -> usize {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of arcs travelled.
    pub fn num_arcs(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if the route never left the depot.
    pub fn is_empty(&self) -> bool {
        self.num_arcs() == 0
    }

    /// Returns `true` if the route left the depot and came back to it.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.last() == DEPOT
    }

    /// Visited non-depot nodes in visit order.
    pub fn customers(&self) -> Vec<usize> {
        self.nodes.iter().copied().filter(|&n| n != DEPOT).collect()
    }

    /// Consecutive `(from, to)` pairs travelled.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total travel cost of the trace.
    pub fn distance(&self, distances: &DistanceMatrix) -> f64 {
        self.arcs().map(|(from, to)| distances.get(from, to)).sum()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(1);
        assert!(r.is_empty());
        assert!(!r.is_closed());
        assert_eq!(r.vehicle(), 1);
        assert_eq!(r.nodes(), &[DEPOT]);
        assert_eq!(r.to_string(), "0");
    }

    #[test]
    fn test_route_truncated() {
        let mut r = Route::new(0);
        r.push(2);
        r.push(3);
        assert!(!r.is_closed());
        assert_eq!(r.last(), 3);
        assert_eq!(r.num_arcs(), 2);
        assert_eq!(r.arcs().collect::<Vec<_>>(), vec![(0, 2), (2, 3)]);
    }

    #[test]
    fn test_route_distance() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0],
            vec![3.0, 0.0, 1.0],
            vec![4.0, 7.0, 0.0],
        ])
        .expect("valid");
        let mut r = Route::new(0);
        r.push(1);
        r.push(2);
        r.push(0);
        // 0→1 + 1→2 + 2→0 = 2 + 1 + 4
        assert!((r.distance(&dm) - 7.0).abs() < 1e-10);
        assert_eq!(r.customers(), vec![1, 2]);
    }
}
