//! # qubo-routing CLI
//!
//! Builds the routing QUBO for a distance matrix, solves it with a bundled
//! solver, and prints the selected arcs and decoded routes.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use qubo_routing::config::{ProblemInput, RunConfig};
use qubo_routing::distance::{sample, DistanceMatrix};
use qubo_routing::export::{export_lp, LpOptions};
use qubo_routing::pipeline::{self, RunResult};
use qubo_routing::qubo::QuboAssembler;
use qubo_routing::solver::SolverKind;
use qubo_routing::{QuboError, Result};

/// Command-line interface for qubo-routing
#[derive(Parser)]
#[command(name = "qubo-routing", version)]
#[command(about = "Solve multi-vehicle routing as a QUBO and decode the routes")]
#[command(long_about = "Solve multi-vehicle routing as a QUBO and decode the routes:
  qubo-routing --sample                      # bundled 5-node instance, 2 vehicles
  qubo-routing -i problem.json -k 3          # JSON instance, 3 vehicles
  qubo-routing --sample --export-lp qubo.lp  # also write the model as CPLEX LP

Subtours are not eliminated; a route trace may stop early or miss customers.")]
struct Cli {
    /// Problem file: {\"distances\": [[..]], \"vehicles\": k} or a bare matrix
    #[arg(short, long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Use the bundled five-node instance (default when no input is given)
    #[arg(long)]
    sample: bool,

    /// Number of vehicles (depot degree target)
    #[arg(short = 'k', long)]
    vehicles: Option<usize>,

    /// Penalty weight A applied to every degree constraint
    #[arg(short = 'A', long)]
    penalty: Option<f64>,

    /// Solver: auto, exhaustive or annealing
    #[arg(long)]
    solver: Option<SolverKind>,

    /// Annealing RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// JSON run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the objective in CPLEX LP format to this path
    #[arg(long)]
    export_lp: Option<PathBuf>,

    /// Mark variables as binary in the LP export
    #[arg(long, requires = "export_lp")]
    binaries: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    match run(&cli) {
        Ok(()) => {}
        Err(QuboError::SolverFailed { status }) => {
            eprintln!("No solution (solver status {status})");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (mut config, config_sets_vehicles) = match &cli.config {
        Some(path) => RunConfig::from_json_file_layered(path)?,
        None => (RunConfig::default(), false),
    };

    let distances = load_problem(cli, &mut config, config_sets_vehicles)?;
    apply_overrides(cli, &mut config);
    config.validate()?;

    if let Some(path) = &cli.export_lp {
        let objective =
            QuboAssembler::new(&distances, config.vehicles, config.penalty_weight).assemble();
        export_lp(
            &objective,
            path,
            LpOptions {
                binaries: cli.binaries,
            },
        )?;
        info!("wrote LP model to {}", path.display());
    }

    let result = pipeline::run(&distances, &config)?;
    print_result(&result);
    Ok(())
}

/// Reads the distance matrix, letting a vehicle count found in the input
/// override the config file. The bundled instance only supplies its vehicle
/// count when the config file did not set one.
fn load_problem(
    cli: &Cli,
    config: &mut RunConfig,
    config_sets_vehicles: bool,
) -> Result<DistanceMatrix> {
    match &cli.input {
        Some(path) => {
            let input = ProblemInput::from_json_file(path)?;
            if let Some(k) = input.vehicles() {
                config.vehicles = k;
            }
            Ok(input.distances().clone())
        }
        None => {
            if !cli.sample {
                info!("no input given, using the bundled five-node instance");
            }
            if !config_sets_vehicles {
                config.vehicles = sample::FIVE_NODE_VEHICLES;
            }
            Ok(sample::five_node())
        }
    }
}

fn apply_overrides(cli: &Cli, config: &mut RunConfig) {
    if let Some(k) = cli.vehicles {
        config.vehicles = k;
    }
    if let Some(a) = cli.penalty {
        config.penalty_weight = a;
    }
    if let Some(kind) = cli.solver {
        config.solver = kind;
    }
    if let Some(seed) = cli.seed {
        config.annealing.seed = seed;
    }
}

fn print_result(result: &RunResult) {
    let report = &result.report;
    println!("Status: {}", result.status);
    println!("QUBO objective: {:.2}", result.objective_value);
    println!("Arc cost: {:.2}", report.arc_cost);
    println!("Penalty term: {:.2}", report.penalty);

    println!("Arcs with x=1:");
    for (i, j) in &report.selected_arcs {
        println!("  {i} -> {j}");
    }

    for (route, distance) in result.routes.iter().zip(&report.route_distances) {
        println!("Route {}: {}  (cost {:.2})", route.vehicle() + 1, route, distance);
    }

    if !report.violations.is_empty() {
        println!("Violations:");
        for v in &report.violations {
            println!("  {v}");
        }
    }
}
