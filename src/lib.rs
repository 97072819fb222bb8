//! # qubo-routing
//!
//! Multi-vehicle routing expressed as a Quadratic Unconstrained Binary
//! Optimization (QUBO) problem: one binary variable per arc, the travel cost
//! as the linear part, and every degree constraint folded into the objective
//! as an exact quadratic penalty. A solver minimizes the objective and the
//! selected arcs are walked back into vehicle routes.
//!
//! Subtours are not eliminated, the vehicle count is not checked against the
//! number of customers, and the penalty weight is a fixed constant that is
//! never tuned to the cost scale.
//!
//! ## Modules
//!
//! - [`models`] — Arc variable grid, degree constraints, routes, violations
//! - [`distance`] — Validated distance matrix and sample instances
//! - [`qubo`] — Quadratic expressions, degree penalties, objective assembly
//! - [`solver`] — Solver trait, exhaustive and annealing solvers
//! - [`decode`] — Arc thresholding and greedy route decoding
//! - [`evaluation`] — Objective breakdown and violation report
//! - [`export`] — CPLEX LP export
//! - [`config`] — Run configuration and problem input files
//! - [`pipeline`] — End-to-end run
//!
//! ```
//! use qubo_routing::decode::decode;
//! use qubo_routing::distance::sample;
//! use qubo_routing::qubo::assemble;
//! use qubo_routing::solver::{ExhaustiveSolver, QuboSolver};
//!
//! let dm = sample::four_node();
//! let objective = assemble(&dm, 2, 1000.0);
//! let (assignment, _) = ExhaustiveSolver::default()
//!     .solve(&objective)
//!     .into_solution()
//!     .unwrap();
//! let routes = decode(objective.grid(), &assignment, 2);
//! assert_eq!(routes.len(), 2);
//! ```

pub mod config;
pub mod decode;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod qubo;
pub mod solver;

pub use error::{QuboError, Result};
