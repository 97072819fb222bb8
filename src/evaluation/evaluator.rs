//! Solution evaluator that splits the objective and lists violations.

use serde::Serialize;

use crate::decode::{ArcSelection, DEFAULT_THRESHOLD};
use crate::distance::DistanceMatrix;
use crate::models::{Direction, Route, Violation, ViolationType, DEPOT};
use crate::qubo::QuboObjective;
use crate::solver::Assignment;

/// Breakdown of one solved assignment and its decoded routes.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    /// Arcs selected by the threshold, in `(from, to)` order.
    pub selected_arcs: Vec<(usize, usize)>,
    /// Full objective value.
    pub objective_value: f64,
    /// Travel-cost part of the objective.
    pub arc_cost: f64,
    /// Penalty part of the objective (objective − travel cost).
    pub penalty: f64,
    /// Travel cost of each decoded route.
    pub route_distances: Vec<f64>,
    /// Everything that keeps the routes from being a valid solution.
    pub violations: Vec<Violation>,
}

impl SolutionReport {
    /// Returns `true` if no violation was found.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// Sum of decoded route distances.
    pub fn total_route_distance(&self) -> f64 {
        self.route_distances.iter().sum()
    }
}

/// Evaluates an assignment against the objective it was solved for.
///
/// Reports degree mismatches, customers no route reaches, and routes that
/// do not return to the depot. Nothing is repaired.
///
/// # Examples
///
/// ```
/// use qubo_routing::decode::decode;
/// use qubo_routing::distance::DistanceMatrix;
/// use qubo_routing::evaluation::SolutionEvaluator;
/// use qubo_routing::qubo::assemble;
/// use qubo_routing::solver::Assignment;
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).unwrap();
/// let objective = assemble(&dm, 1, 100.0);
/// let assignment = Assignment::new(vec![1.0, 1.0]);
/// let routes = decode(objective.grid(), &assignment, 1);
///
/// let report = SolutionEvaluator::new(&dm, &objective).evaluate(&assignment, &routes);
/// assert!(report.is_feasible());
/// assert_eq!(report.penalty, 0.0);
/// assert_eq!(report.route_distances, vec![7.0]);
/// ```
pub struct SolutionEvaluator<'a> {
    distances: &'a DistanceMatrix,
    objective: &'a QuboObjective,
    threshold: f64,
}

impl<'a> SolutionEvaluator<'a> {
    /// Creates an evaluator using the default selection threshold.
    pub fn new(distances: &'a DistanceMatrix, objective: &'a QuboObjective) -> Self {
        Self {
            distances,
            objective,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Uses a different selection threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Evaluates `assignment` and the `routes` decoded from it.
    pub fn evaluate(&self, assignment: &Assignment, routes: &[Route]) -> SolutionReport {
        let values = assignment.values();
        let objective_value = self.objective.evaluate(values);
        let arc_cost = self.objective.travel_cost(values);
        let selection =
            ArcSelection::from_assignment(self.objective.grid(), assignment, self.threshold);

        let mut violations = self.degree_violations(&selection);

        let n = self.distances.size();
        let mut visited = vec![false; n];
        for route in routes {
            for &node in route.nodes() {
                visited[node] = true;
            }
        }
        for customer in (0..n).filter(|&c| c != DEPOT && !visited[c]) {
            violations.push(Violation::new(ViolationType::UnvisitedCustomer { customer }));
        }

        for route in routes.iter().filter(|r| !r.is_closed()) {
            violations.push(Violation::new(ViolationType::OpenRoute {
                vehicle: route.vehicle(),
                last: route.last(),
            }));
        }

        SolutionReport {
            selected_arcs: selection.arcs().to_vec(),
            objective_value,
            arc_cost,
            penalty: objective_value - arc_cost,
            route_distances: routes.iter().map(|r| r.distance(self.distances)).collect(),
            violations,
        }
    }

    fn degree_violations(&self, selection: &ArcSelection) -> Vec<Violation> {
        self.objective
            .constraints()
            .iter()
            .filter_map(|c| {
                let actual = match c.direction {
                    Direction::Out => selection.out_degree(c.node),
                    Direction::In => selection.in_degree(c.node),
                };
                (actual != c.target).then(|| {
                    Violation::new(ViolationType::DegreeMismatch {
                        node: c.node,
                        direction: c.direction,
                        expected: c.target,
                        actual,
                    })
                })
            })
            .collect()
    }
}
