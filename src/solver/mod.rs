//! Solver boundary and bundled QUBO solvers.
//!
//! The assembled objective is handed to a [`QuboSolver`], which returns a
//! [`SolverOutcome`]: a status, and when one was found, an assignment and
//! its objective value.
//!
//! - [`ExhaustiveSolver`] — Gray-code enumeration, proves optimality for small models
//! - [`AnnealingSolver`] — single-flip simulated annealing with restarts
//! - [`AutoSolver`] — picks one of the above by model size

mod annealing;
mod exhaustive;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QuboError, Result};
use crate::models::VarId;
use crate::qubo::QuboObjective;

pub use annealing::{AnnealingConfig, AnnealingSolver};
pub use exhaustive::ExhaustiveSolver;

/// Terminal state reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// Proven minimum found.
    Optimal,
    /// No assignment satisfies the model.
    Infeasible,
    /// Search stopped without proof; a solution may be attached.
    Unknown,
    /// Solver could not run.
    Error,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Value of every arc variable, indexed by [`VarId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// Wraps per-variable values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Builds a 0/1 assignment from bits.
    pub fn from_bits(bits: &[bool]) -> Self {
        Self::new(bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect())
    }

    /// Value of `var`; variables outside the assignment read as 0.
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }

    /// All values in variable order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of variables covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no variable is covered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of one solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: SolveStatus,
    pub assignment: Option<Assignment>,
    pub objective_value: Option<f64>,
}

impl SolverOutcome {
    /// A run that found an assignment.
    pub fn solved(status: SolveStatus, assignment: Assignment, objective_value: f64) -> Self {
        Self {
            status,
            assignment: Some(assignment),
            objective_value: Some(objective_value),
        }
    }

    /// A run without a usable assignment.
    pub fn failed(status: SolveStatus) -> Self {
        Self {
            status,
            assignment: None,
            objective_value: None,
        }
    }

    /// Returns the assignment and objective value, or
    /// [`QuboError::SolverFailed`] when the status is `Infeasible`/`Error`
    /// or no assignment is attached.
    pub fn into_solution(self) -> Result<(Assignment, f64)> {
        match (self.status, self.assignment, self.objective_value) {
            (SolveStatus::Optimal | SolveStatus::Unknown, Some(assignment), Some(value)) => {
                Ok((assignment, value))
            }
            (status, _, _) => Err(QuboError::SolverFailed { status }),
        }
    }
}

/// A minimizer of assembled QUBO objectives.
///
/// Implementations receive the objective (whose variables are all boxed to
/// `[0, 1]` with a binary hint, see [`QuboObjective::bounds`]) and return a
/// status with an optional assignment.
pub trait QuboSolver {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Minimizes `objective`.
    fn solve(&self, objective: &QuboObjective) -> SolverOutcome;
}

/// Which bundled solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Exhaustive when the model is small enough, annealing otherwise.
    #[default]
    Auto,
    Exhaustive,
    Annealing,
}

impl std::str::FromStr for SolverKind {
    type Err = QuboError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(SolverKind::Auto),
            "exhaustive" => Ok(SolverKind::Exhaustive),
            "annealing" => Ok(SolverKind::Annealing),
            other => Err(QuboError::InvalidConfig(format!("unknown solver '{other}'"))),
        }
    }
}

/// Runs [`ExhaustiveSolver`] when the model has at most `limit` variables,
/// [`AnnealingSolver`] otherwise.
#[derive(Debug, Clone)]
pub struct AutoSolver {
    exhaustive: ExhaustiveSolver,
    annealing: AnnealingSolver,
}

impl AutoSolver {
    /// Combines the two solvers; the exhaustive limit decides which runs.
    pub fn new(exhaustive: ExhaustiveSolver, annealing: AnnealingSolver) -> Self {
        Self {
            exhaustive,
            annealing,
        }
    }
}

impl QuboSolver for AutoSolver {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn solve(&self, objective: &QuboObjective) -> SolverOutcome {
        if objective.num_variables() <= self.exhaustive.limit() {
            self.exhaustive.solve(objective)
        } else {
            self.annealing.solve(objective)
        }
    }
}
