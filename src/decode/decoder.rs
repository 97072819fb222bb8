//! Greedy route decoding.
//!
//! Each vehicle starts at the depot and repeatedly takes the first remaining
//! selected successor of its current node, until it is back at the depot,
//! the current node has no successor left, or `2n` steps were taken.
//! Successor queues are shared by all vehicles of one decode call, so an arc
//! taken by one vehicle is gone for the next.
//!
//! The walk is a best-effort trace: subtours, unvisited customers, and arc
//! sets that are not vertex-disjoint paths pass through undetected.

use log::debug;

use crate::models::{Route, VariableGrid, DEPOT};
use crate::solver::Assignment;

use super::{ArcSelection, DEFAULT_THRESHOLD};

/// Decodes solver assignments into vehicle routes.
///
/// # Examples
///
/// ```
/// use qubo_routing::decode::{ArcSelection, RouteDecoder};
///
/// let sel = ArcSelection::from_arcs(4, [(0, 1), (1, 0), (0, 2), (2, 3), (3, 0)]);
/// let routes = RouteDecoder::default().decode_selection(&sel, 2);
/// assert_eq!(routes[0].to_string(), "0 -> 1 -> 0");
/// assert_eq!(routes[1].to_string(), "0 -> 2 -> 3 -> 0");
/// ```
#[derive(Debug, Clone)]
pub struct RouteDecoder {
    threshold: f64,
}

impl RouteDecoder {
    /// Creates a decoder selecting arcs with value strictly above `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Selection threshold; arcs must exceed it strictly.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Thresholds `assignment` and walks `vehicles` routes.
    pub fn decode(
        &self,
        grid: &VariableGrid,
        assignment: &Assignment,
        vehicles: usize,
    ) -> Vec<Route> {
        let selection = ArcSelection::from_assignment(grid, assignment, self.threshold);
        self.decode_selection(&selection, vehicles)
    }

    /// Walks `vehicles` routes over an already thresholded selection.
    pub fn decode_selection(&self, selection: &ArcSelection, vehicles: usize) -> Vec<Route> {
        let max_steps = 2 * selection.nodes();
        let mut succ = selection.successors();
        let mut routes = Vec::with_capacity(vehicles);

        for vehicle in 0..vehicles {
            let mut route = Route::new(vehicle);
            if succ.is_empty() {
                routes.push(route);
                continue;
            }
            let mut current = DEPOT;
            let mut steps = 0;
            while steps < max_steps {
                let Some(next) = succ[current].pop_front() else {
                    break;
                };
                route.push(next);
                current = next;
                steps += 1;
                if current == DEPOT {
                    break;
                }
            }
            if !route.is_closed() {
                debug!("route {} not closed: {}", vehicle + 1, route);
            }
            routes.push(route);
        }
        routes
    }
}

impl Default for RouteDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Shorthand for `RouteDecoder::default().decode(grid, assignment, vehicles)`.
pub fn decode(grid: &VariableGrid, assignment: &Assignment, vehicles: usize) -> Vec<Route> {
    RouteDecoder::default().decode(grid, assignment, vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn traces(routes: &[Route]) -> Vec<Vec<usize>> {
        routes.iter().map(|r| r.nodes().to_vec()).collect()
    }

    #[test]
    fn test_two_closed_routes() {
        let sel = ArcSelection::from_arcs(5, [(0, 1), (1, 0), (0, 3), (3, 2), (2, 4), (4, 0)]);
        let routes = RouteDecoder::default().decode_selection(&sel, 2);
        assert_eq!(traces(&routes), vec![vec![0, 1, 0], vec![0, 3, 2, 4, 0]]);
        assert!(routes.iter().all(Route::is_closed));
        assert_eq!(routes[1].vehicle(), 1);
    }

    #[test]
    fn test_no_depot_successor_gives_truncated_routes() {
        let sel = ArcSelection::from_arcs(3, [(1, 2), (2, 1)]);
        let routes = RouteDecoder::default().decode_selection(&sel, 2);
        assert_eq!(traces(&routes), vec![vec![0], vec![0]]);
    }

    #[test]
    fn test_dead_end() {
        let sel = ArcSelection::from_arcs(4, [(0, 1), (1, 2)]);
        let routes = RouteDecoder::default().decode_selection(&sel, 1);
        assert_eq!(traces(&routes), vec![vec![0, 1, 2]]);
        assert!(!routes[0].is_closed());
    }

    #[test]
    fn test_cycle_excluding_depot_consumes_arcs() {
        // 1 → 2 and 2 → 1 are each taken once, then node 1 has no successor
        let sel = ArcSelection::from_arcs(3, [(0, 1), (1, 2), (2, 1)]);
        let routes = RouteDecoder::default().decode_selection(&sel, 1);
        assert_eq!(traces(&routes), vec![vec![0, 1, 2, 1]]);
    }

    #[test]
    fn test_shared_queues_across_vehicles() {
        // a single depot arc can only be used by the first vehicle
        let sel = ArcSelection::from_arcs(3, [(0, 1), (1, 0)]);
        let routes = RouteDecoder::default().decode_selection(&sel, 2);
        assert_eq!(traces(&routes), vec![vec![0, 1, 0], vec![0]]);
    }

    #[test]
    fn test_step_cap() {
        let sel = ArcSelection::from_arcs(
            5,
            [
                (0, 1),
                (1, 2),
                (1, 3),
                (1, 4),
                (2, 1),
                (2, 3),
                (2, 4),
                (3, 2),
                (3, 4),
                (4, 1),
                (4, 2),
            ],
        );
        let routes = RouteDecoder::default().decode_selection(&sel, 1);
        // stops after 2n = 10 arcs although 2 → 4 is still unused
        assert_eq!(traces(&routes), vec![vec![0, 1, 2, 1, 3, 2, 3, 4, 1, 4, 2]]);
    }

    #[test]
    fn test_decode_from_assignment() {
        let grid = VariableGrid::new(3);
        let mut values = vec![0.0; grid.len()];
        for (i, j) in [(0, 2), (2, 1), (1, 0)] {
            values[grid.var(i, j).unwrap().index()] = 0.97;
        }
        let routes = decode(&grid, &Assignment::new(values), 1);
        assert_eq!(traces(&routes), vec![vec![0, 2, 1, 0]]);
    }

    #[test]
    fn test_custom_threshold() {
        let grid = VariableGrid::new(3);
        let mut values = vec![0.0; grid.len()];
        values[grid.var(0, 1).unwrap().index()] = 0.8;
        values[grid.var(1, 0).unwrap().index()] = 0.95;
        let assignment = Assignment::new(values);

        let strict = RouteDecoder::new(0.9);
        assert_eq!(strict.threshold(), 0.9);
        assert_eq!(traces(&strict.decode(&grid, &assignment, 1)), vec![vec![0]]);
        assert_eq!(
            traces(&RouteDecoder::default().decode(&grid, &assignment, 1)),
            vec![vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_zero_vehicles() {
        let sel = ArcSelection::from_arcs(3, [(0, 1), (1, 0)]);
        assert!(RouteDecoder::default().decode_selection(&sel, 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_terminates_within_bound(
            n in 1usize..=50,
            raw in proptest::collection::vec((0usize..50, 0usize..50), 0..400),
            k in 0usize..6,
        ) {
            let sel = ArcSelection::from_arcs(n, raw);
            let routes = RouteDecoder::default().decode_selection(&sel, k);
            prop_assert_eq!(routes.len(), k);
            for route in &routes {
                prop_assert_eq!(route.nodes()[0], DEPOT);
                prop_assert!(route.num_arcs() <= 2 * n + 1);
            }
        }

        #[test]
        fn prop_decode_is_idempotent(
            n in 2usize..=20,
            raw in proptest::collection::vec((0usize..20, 0usize..20), 0..100),
            k in 1usize..4,
        ) {
            let sel = ArcSelection::from_arcs(n, raw);
            let decoder = RouteDecoder::default();
            prop_assert_eq!(decoder.decode_selection(&sel, k), decoder.decode_selection(&sel, k));
        }
    }
}
