//! Simulated annealing over single bit flips.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::qubo::{DenseQubo, QuboObjective};

use super::{Assignment, QuboSolver, SolveStatus, SolverOutcome};

/// Annealing schedule parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Full passes over all variables per restart.
    pub sweeps: usize,
    /// Independent restarts from random states.
    pub restarts: usize,
    /// Starting temperature; derived from the largest possible flip
    /// magnitude when `None`.
    pub initial_temperature: Option<f64>,
    /// Temperature reached on the last sweep.
    pub final_temperature: f64,
    /// RNG seed; restart `r` uses `seed + r`.
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            sweeps: 2000,
            restarts: 4,
            initial_temperature: None,
            final_temperature: 1e-3,
            seed: 42,
        }
    }
}

/// Single-flip Metropolis annealing with geometric cooling.
///
/// Deterministic for a fixed seed. Reports `Unknown` with the best
/// assignment seen, since annealing proves nothing about optimality.
///
/// # Examples
///
/// ```
/// use qubo_routing::distance::sample;
/// use qubo_routing::qubo::assemble;
/// use qubo_routing::solver::{AnnealingSolver, QuboSolver, SolveStatus};
///
/// let objective = assemble(&sample::four_node(), 2, 1000.0);
/// let outcome = AnnealingSolver::default().solve(&objective);
/// assert_eq!(outcome.status, SolveStatus::Unknown);
/// assert!(outcome.assignment.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnealingSolver {
    config: AnnealingConfig,
}

impl AnnealingSolver {
    /// Creates a solver with the given schedule.
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    /// Annealing schedule in use.
    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    fn run_once(&self, dense: &DenseQubo, t0: f64, rng: &mut StdRng) -> (Vec<bool>, f64) {
        let n = dense.len();
        let mut x: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();
        let mut energy = dense.energy(&x);
        let mut best = x.clone();
        let mut best_energy = energy;

        let sweeps = self.config.sweeps.max(1);
        let t1 = self.config.final_temperature.min(t0);
        let cooling = if sweeps > 1 {
            (t1 / t0).powf(1.0 / (sweeps - 1) as f64)
        } else {
            1.0
        };

        let mut temperature = t0;
        for _ in 0..sweeps {
            for i in 0..n {
                let delta = dense.flip_delta(&x, i);
                if delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                    x[i] = !x[i];
                    energy += delta;
                    if energy < best_energy {
                        best_energy = energy;
                        best.clone_from(&x);
                    }
                }
            }
            temperature *= cooling;
        }

        let best_energy = dense.energy(&best);
        (best, best_energy)
    }
}

impl QuboSolver for AnnealingSolver {
    fn name(&self) -> &'static str {
        "annealing"
    }

    fn solve(&self, objective: &QuboObjective) -> SolverOutcome {
        let dense = objective.to_dense();
        let t0 = self
            .config
            .initial_temperature
            .unwrap_or_else(|| dense.max_flip_magnitude())
            .max(f64::MIN_POSITIVE);

        let mut best: Option<(Vec<bool>, f64)> = None;
        for restart in 0..self.config.restarts.max(1) {
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(restart as u64));
            let (x, energy) = self.run_once(&dense, t0, &mut rng);
            debug!("annealing restart {}: energy {:.6}", restart + 1, energy);
            if best.as_ref().map_or(true, |(_, e)| energy < *e) {
                best = Some((x, energy));
            }
        }

        match best {
            Some((x, energy)) => {
                info!(
                    "annealing: best energy {:.6} over {} restarts",
                    energy,
                    self.config.restarts.max(1)
                );
                SolverOutcome::solved(SolveStatus::Unknown, Assignment::from_bits(&x), energy)
            }
            None => SolverOutcome::failed(SolveStatus::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{sample, DistanceMatrix};
    use crate::qubo::assemble;
    use crate::solver::ExhaustiveSolver;

    #[test]
    fn test_deterministic_for_seed() {
        let obj = assemble(&sample::five_node(), 2, 1000.0);
        let solver = AnnealingSolver::new(AnnealingConfig {
            sweeps: 200,
            ..AnnealingConfig::default()
        });
        assert_eq!(solver.solve(&obj), solver.solve(&obj));
    }

    #[test]
    fn test_never_beats_exhaustive() {
        let obj = assemble(&sample::four_node(), 2, 1000.0);
        let (_, exact) = ExhaustiveSolver::default()
            .solve(&obj)
            .into_solution()
            .expect("solved");
        let (assignment, value) = AnnealingSolver::default()
            .solve(&obj)
            .into_solution()
            .expect("solved");
        assert!(value + 1e-6 >= exact);
        assert!((obj.evaluate(assignment.values()) - value).abs() < 1e-6);
    }

    #[test]
    fn test_two_node_round_trip() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).expect("valid");
        let obj = assemble(&dm, 1, 100.0);
        let (assignment, value) = AnnealingSolver::default()
            .solve(&obj)
            .into_solution()
            .expect("solved");
        assert_eq!(assignment.values(), &[1.0, 1.0]);
        assert!((value - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let cfg: AnnealingConfig = serde_json::from_str(r#"{"sweeps": 10}"#).expect("valid");
        assert_eq!(cfg.sweeps, 10);
        assert_eq!(cfg.restarts, 4);
        assert_eq!(cfg.initial_temperature, None);
    }
}
