//! End-to-end run: assemble, solve, decode, evaluate.

use log::{info, warn};

use crate::config::RunConfig;
use crate::decode::RouteDecoder;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::{SolutionEvaluator, SolutionReport};
use crate::models::Route;
use crate::qubo::{QuboAssembler, QuboObjective};
use crate::solver::{Assignment, QuboSolver, SolveStatus};

/// Everything produced by a successful run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub objective: QuboObjective,
    pub status: SolveStatus,
    pub assignment: Assignment,
    pub objective_value: f64,
    pub routes: Vec<Route>,
    pub report: SolutionReport,
}

/// Runs the full pipeline with the solver described by `config`.
///
/// Fails with [`crate::QuboError::SolverFailed`] when the solver reports
/// `Infeasible` or `Error`, or returns no assignment.
///
/// # Examples
///
/// ```
/// use qubo_routing::config::RunConfig;
/// use qubo_routing::distance::sample;
/// use qubo_routing::pipeline::run;
///
/// let cfg = RunConfig { vehicles: 2, ..RunConfig::default() };
/// let result = run(&sample::four_node(), &cfg).unwrap();
/// assert_eq!(result.routes.len(), 2);
/// assert!(result.report.is_feasible());
/// ```
pub fn run(distances: &DistanceMatrix, config: &RunConfig) -> Result<RunResult> {
    config.validate()?;
    let solver = config.build_solver();
    run_with(distances, config, solver.as_ref())
}

/// Runs the full pipeline with an explicit solver.
pub fn run_with(
    distances: &DistanceMatrix,
    config: &RunConfig,
    solver: &dyn QuboSolver,
) -> Result<RunResult> {
    let objective =
        QuboAssembler::new(distances, config.vehicles, config.penalty_weight).assemble();

    info!(
        "solving {} variables with the {} solver",
        objective.num_variables(),
        solver.name()
    );
    let outcome = solver.solve(&objective);
    let status = outcome.status;
    let (assignment, objective_value) = outcome.into_solution()?;
    info!("solver status {}, objective {:.4}", status, objective_value);

    let routes = RouteDecoder::new(config.threshold).decode(
        objective.grid(),
        &assignment,
        config.vehicles,
    );
    let report = SolutionEvaluator::new(distances, &objective)
        .with_threshold(config.threshold)
        .evaluate(&assignment, &routes);
    if !report.is_feasible() {
        warn!(
            "decoded solution has {} violation(s)",
            report.violations.len()
        );
    }

    Ok(RunResult {
        objective,
        status,
        assignment,
        objective_value,
        routes,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::sample;
    use crate::error::QuboError;
    use crate::models::{Direction, ViolationType};
    use crate::solver::{ExhaustiveSolver, SolverKind, SolverOutcome};

    struct InfeasibleSolver;

    impl QuboSolver for InfeasibleSolver {
        fn name(&self) -> &'static str {
            "infeasible"
        }
        fn solve(&self, _objective: &QuboObjective) -> SolverOutcome {
            SolverOutcome::failed(SolveStatus::Infeasible)
        }
    }

    fn five_node_config() -> RunConfig {
        RunConfig {
            vehicles: sample::FIVE_NODE_VEHICLES,
            penalty_weight: 1000.0,
            solver: SolverKind::Exhaustive,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_five_node_end_to_end() {
        let dm = sample::five_node();
        let result = run(&dm, &five_node_config()).expect("solved");
        assert_eq!(result.status, SolveStatus::Optimal);

        // every degree target met exactly
        assert!(result
            .report
            .violations
            .iter()
            .all(|v| !matches!(v.kind, ViolationType::DegreeMismatch { .. })));
        assert!(result.report.penalty.abs() < 1e-6);
        let arcs = &result.report.selected_arcs;
        assert_eq!(arcs.iter().filter(|a| a.0 == 0).count(), 2);
        assert_eq!(arcs.iter().filter(|a| a.1 == 0).count(), 2);
        for node in 1..5 {
            assert_eq!(arcs.iter().filter(|a| a.0 == node).count(), 1);
            assert_eq!(arcs.iter().filter(|a| a.1 == node).count(), 1);
        }

        // both routes leave and return to the depot
        assert_eq!(result.routes.len(), 2);
        assert!(result.routes.iter().all(|r| r.is_closed()));

        // without subtour elimination the minimizer strands 2 ⇄ 3
        assert_eq!(
            arcs,
            &vec![(0, 1), (0, 4), (1, 0), (2, 3), (3, 2), (4, 0)]
        );
        assert_eq!(result.routes[0].nodes(), &[0, 1, 0]);
        assert_eq!(result.routes[1].nodes(), &[0, 4, 0]);
        assert!((result.objective_value - 128.544).abs() < 1e-6);
    }

    #[test]
    fn test_small_penalty_breaks_degrees() {
        let cfg = RunConfig {
            penalty_weight: 1.0,
            ..five_node_config()
        };
        let result = run(&sample::five_node(), &cfg).expect("solved");
        // selecting nothing costs 16·A = 16, cheaper than any tour
        assert!(result.report.selected_arcs.is_empty());
        assert!(result.report.violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::DegreeMismatch {
                node: 0,
                direction: Direction::Out,
                ..
            }
        )));
    }

    #[test]
    fn test_solver_failure_propagates() {
        let err = run_with(&sample::four_node(), &five_node_config(), &InfeasibleSolver)
            .unwrap_err();
        assert!(matches!(
            err,
            QuboError::SolverFailed {
                status: SolveStatus::Infeasible
            }
        ));
    }

    #[test]
    fn test_exhaustive_limit_surfaces_as_error() {
        let err = run_with(
            &sample::five_node(),
            &five_node_config(),
            &ExhaustiveSolver::new(10),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QuboError::SolverFailed {
                status: SolveStatus::Error
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = RunConfig {
            vehicles: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            run(&sample::four_node(), &cfg),
            Err(QuboError::InvalidConfig(_))
        ));
    }
}
