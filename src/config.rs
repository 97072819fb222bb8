//! Run configuration and problem input files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decode::DEFAULT_THRESHOLD;
use crate::distance::DistanceMatrix;
use crate::error::{QuboError, Result};
use crate::solver::{
    AnnealingConfig, AnnealingSolver, AutoSolver, ExhaustiveSolver, QuboSolver, SolverKind,
};

/// Default penalty weight `A`.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 1000.0;

/// Settings for one end-to-end run.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
///
/// # Examples
///
/// ```
/// use qubo_routing::config::RunConfig;
/// use qubo_routing::solver::SolverKind;
///
/// let cfg: RunConfig = serde_json::from_str(r#"{"vehicles": 3, "solver": "annealing"}"#).unwrap();
/// assert_eq!(cfg.vehicles, 3);
/// assert_eq!(cfg.solver, SolverKind::Annealing);
/// assert_eq!(cfg.penalty_weight, 1000.0);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Vehicle count `k`, the depot degree target.
    pub vehicles: usize,
    /// Penalty weight `A`. Fixed; not derived from the distance scale.
    pub penalty_weight: f64,
    /// Arc selection threshold used when decoding.
    pub threshold: f64,
    /// Which bundled solver to run.
    pub solver: SolverKind,
    /// Largest variable count solved by exhaustive enumeration.
    pub exhaustive_limit: usize,
    /// Annealing schedule.
    pub annealing: AnnealingConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            vehicles: 1,
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
            threshold: DEFAULT_THRESHOLD,
            solver: SolverKind::Auto,
            exhaustive_limit: ExhaustiveSolver::default().limit(),
            annealing: AnnealingConfig::default(),
        }
    }
}

impl RunConfig {
    /// Loads a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_file_layered(path).map(|(cfg, _)| cfg)
    }

    /// Loads a config from a JSON file and reports whether the file set
    /// `vehicles` itself rather than leaving it to the default.
    pub fn from_json_file_layered(path: impl AsRef<Path>) -> Result<(Self, bool)> {
        let text = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        let sets_vehicles = value.get("vehicles").is_some();
        let cfg: Self = serde_json::from_value(value)?;
        Ok((cfg, sets_vehicles))
    }

    /// Rejects settings no run can use.
    ///
    /// The vehicle count is not compared with the number of customers.
    pub fn validate(&self) -> Result<()> {
        if self.vehicles == 0 {
            return Err(QuboError::InvalidConfig("vehicles must be at least 1".into()));
        }
        if !(self.penalty_weight.is_finite() && self.penalty_weight > 0.0) {
            return Err(QuboError::InvalidConfig(format!(
                "penalty_weight must be positive, got {}",
                self.penalty_weight
            )));
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(QuboError::InvalidConfig(format!(
                "threshold must lie in [0, 1), got {}",
                self.threshold
            )));
        }
        let a = &self.annealing;
        if !(a.final_temperature.is_finite() && a.final_temperature > 0.0) {
            return Err(QuboError::InvalidConfig(
                "annealing.final_temperature must be positive".into(),
            ));
        }
        if let Some(t0) = a.initial_temperature {
            if !(t0.is_finite() && t0 >= a.final_temperature) {
                return Err(QuboError::InvalidConfig(
                    "annealing.initial_temperature must be at least final_temperature".into(),
                ));
            }
        }
        Ok(())
    }

    /// Builds the configured solver.
    pub fn build_solver(&self) -> Box<dyn QuboSolver> {
        let exhaustive = ExhaustiveSolver::new(self.exhaustive_limit);
        let annealing = AnnealingSolver::new(self.annealing.clone());
        match self.solver {
            SolverKind::Auto => Box::new(AutoSolver::new(exhaustive, annealing)),
            SolverKind::Exhaustive => Box::new(exhaustive),
            SolverKind::Annealing => Box::new(annealing),
        }
    }
}

/// A routing instance read from JSON.
///
/// Accepts either `{"distances": [[..]], "vehicles": k}` or a bare matrix
/// `[[..]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProblemInput {
    Instance {
        distances: DistanceMatrix,
        #[serde(default)]
        vehicles: Option<usize>,
    },
    Matrix(DistanceMatrix),
}

impl ProblemInput {
    /// Loads and validates an instance file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let input: Self = serde_json::from_str(&text)?;
        Ok(input)
    }

    /// Validated distance matrix of the instance.
    pub fn distances(&self) -> &DistanceMatrix {
        match self {
            ProblemInput::Instance { distances, .. } | ProblemInput::Matrix(distances) => distances,
        }
    }

    /// Vehicle count given in the file, if any.
    pub fn vehicles(&self) -> Option<usize> {
        match self {
            ProblemInput::Instance { vehicles, .. } => *vehicles,
            ProblemInput::Matrix(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.penalty_weight, 1000.0);
        assert_eq!(cfg.threshold, 0.5);
        assert_eq!(cfg.exhaustive_limit, 24);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_solver().name(), "auto");
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            RunConfig {
                vehicles: 0,
                ..RunConfig::default()
            },
            RunConfig {
                penalty_weight: -1.0,
                ..RunConfig::default()
            },
            RunConfig {
                threshold: 1.0,
                ..RunConfig::default()
            },
            RunConfig {
                annealing: AnnealingConfig {
                    initial_temperature: Some(1e-6),
                    ..AnnealingConfig::default()
                },
                ..RunConfig::default()
            },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(QuboError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"{{"vehicles": 2, "penalty_weight": 500, "annealing": {{"seed": 7}}}}"#
        )
        .expect("write");
        let cfg = RunConfig::from_json_file(file.path()).expect("load");
        assert_eq!(cfg.vehicles, 2);
        assert_eq!(cfg.penalty_weight, 500.0);
        assert_eq!(cfg.annealing.seed, 7);
        assert_eq!(cfg.annealing.sweeps, 2000);
        assert_eq!(cfg.build_solver().name(), "auto");
    }

    #[test]
    fn test_layered_load_reports_vehicles() {
        let mut with = tempfile::NamedTempFile::new().expect("tempfile");
        write!(with, r#"{{"vehicles": 3}}"#).expect("write");
        let (cfg, sets_vehicles) = RunConfig::from_json_file_layered(with.path()).expect("load");
        assert_eq!(cfg.vehicles, 3);
        assert!(sets_vehicles);

        let mut without = tempfile::NamedTempFile::new().expect("tempfile");
        write!(without, r#"{{"penalty_weight": 200}}"#).expect("write");
        let (cfg, sets_vehicles) =
            RunConfig::from_json_file_layered(without.path()).expect("load");
        assert_eq!(cfg.vehicles, 1);
        assert!(!sets_vehicles);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RunConfig::from_json_file("/nonexistent/qubo.json"),
            Err(QuboError::Io(_))
        ));
    }

    #[test]
    fn test_problem_input_forms() {
        let full: ProblemInput =
            serde_json::from_str(r#"{"distances": [[0, 1], [1, 0]], "vehicles": 1}"#).expect("valid");
        assert_eq!(full.vehicles(), Some(1));
        assert_eq!(full.distances().size(), 2);

        let bare: ProblemInput = serde_json::from_str("[[0, 2], [3, 0]]").expect("valid");
        assert_eq!(bare.vehicles(), None);
        assert_eq!(bare.distances().get(1, 0), 3.0);

        assert!(serde_json::from_str::<ProblemInput>("[[0, -2], [3, 0]]").is_err());
    }

    #[test]
    fn test_problem_input_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "[[0, 5], [5, 0]]").expect("write");
        let input = ProblemInput::from_json_file(file.path()).expect("load");
        assert_eq!(input.distances().get(0, 1), 5.0);
    }
}
