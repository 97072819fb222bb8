//! Crate error type.

use thiserror::Error;

use crate::solver::SolveStatus;

/// Errors raised while building inputs, loading configuration, or running
/// the end-to-end pipeline.
///
/// The algebraic core (penalty building, assembly, decoding) never fails;
/// only validation and the solver boundary produce errors.
#[derive(Debug, Error)]
pub enum QuboError {
    #[error("Distance matrix is empty")]
    EmptyMatrix,
    #[error("Distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("Distance D[{from}][{to}] = {value} must be finite and non-negative")]
    InvalidDistance { from: usize, to: usize, value: f64 },
    #[error("Diagonal entry D[{node}][{node}] = {value} must be zero")]
    NonZeroDiagonal { node: usize, value: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Solver finished with status {status} and no usable solution")]
    SolverFailed { status: SolveStatus },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias using [`QuboError`].
pub type Result<T> = std::result::Result<T, QuboError>;
