//! Routing-as-QUBO model construction.
//!
//! - [`QuadraticExpression`] — immutable quadratic polynomial over arc variables
//! - [`build_degree_penalty`] — exact `A·(Σv − t)²` expansion for binary variables
//! - [`QuboAssembler`] — travel cost plus `2n` degree penalties
//! - [`DenseQubo`] / [`IsingHamiltonian`] — matrix and spin forms of the objective

mod assembler;
mod dense;
mod expression;
mod ising;
mod penalty;

pub use assembler::{assemble, QuboAssembler, QuboObjective};
pub use dense::DenseQubo;
pub use expression::QuadraticExpression;
pub use ising::IsingHamiltonian;
pub use penalty::{build_degree_penalty, degree_penalty};
