//! Domain model types for routing-as-QUBO.
//!
//! Provides the arc variable grid, degree constraints, decoded routes, and
//! the violation types used when evaluating a decoded solution.

mod degree;
mod grid;
mod route;
mod solution;

pub use degree::{DegreeConstraint, Direction};
pub use grid::{ArcVariable, VarId, VariableBounds, VariableGrid};
pub use route::{Route, DEPOT};
pub use solution::{Violation, ViolationType};
