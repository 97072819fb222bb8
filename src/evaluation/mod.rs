//! Diagnostic evaluation of solved assignments.
//!
//! Splits the objective into travel cost and penalty and lists the ways the
//! decoded routes fall short of a valid solution.

mod evaluator;

pub use evaluator::{SolutionEvaluator, SolutionReport};
