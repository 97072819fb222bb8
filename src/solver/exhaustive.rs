//! Exhaustive enumeration.

use log::{debug, error};

use crate::qubo::QuboObjective;

use super::{Assignment, QuboSolver, SolveStatus, SolverOutcome};

/// Default variable limit: `2^24` assignments.
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 24;

/// Enumerates all `2^N` binary assignments in Gray-code order, so each step
/// flips one bit and updates the energy in `O(N)`.
///
/// Returns `Optimal` with the first minimizer found, or `Error` if the model
/// has more than `limit` variables.
///
/// # Examples
///
/// ```
/// use qubo_routing::distance::sample;
/// use qubo_routing::qubo::assemble;
/// use qubo_routing::solver::{ExhaustiveSolver, QuboSolver, SolveStatus};
///
/// let objective = assemble(&sample::four_node(), 2, 1000.0);
/// let outcome = ExhaustiveSolver::default().solve(&objective);
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver {
    limit: usize,
}

impl ExhaustiveSolver {
    /// Creates a solver that refuses models with more than `limit` variables.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Largest variable count this solver accepts.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXHAUSTIVE_LIMIT)
    }
}

impl QuboSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, objective: &QuboObjective) -> SolverOutcome {
        let n = objective.num_variables();
        if n > self.limit || n >= u64::BITS as usize {
            error!(
                "exhaustive search refused: {} variables exceeds limit {}",
                n, self.limit
            );
            return SolverOutcome::failed(SolveStatus::Error);
        }

        let dense = objective.to_dense();
        let mut x = vec![false; n];
        let mut energy = dense.energy(&x);
        let mut best_energy = energy;
        let mut best = x.clone();

        let total: u64 = 1 << n;
        for step in 1..total {
            let bit = step.trailing_zeros() as usize;
            energy += dense.flip_delta(&x, bit);
            x[bit] = !x[bit];
            if energy < best_energy {
                best_energy = energy;
                best.clone_from(&x);
            }
        }

        // recompute to shed accumulated rounding
        let best_energy = dense.energy(&best);
        debug!("exhaustive: {} assignments, best {:.6}", total, best_energy);
        SolverOutcome::solved(SolveStatus::Optimal, Assignment::from_bits(&best), best_energy)
    }
}
