//! QUBO assembly for the multi-vehicle routing problem.

use log::{debug, warn};

use crate::distance::DistanceMatrix;
use crate::models::{DegreeConstraint, VariableBounds, VariableGrid};

use super::dense::DenseQubo;
use super::ising::IsingHamiltonian;
use super::penalty::degree_penalty;
use super::QuadraticExpression;

/// The assembled objective: travel cost plus weighted degree penalties.
///
/// Minimizing it over binary arc variables favours arc sets that satisfy
/// every degree target; constraint satisfaction is entirely soft and depends
/// on the penalty weight dominating the achievable travel-cost variation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuboObjective {
    grid: VariableGrid,
    vehicles: usize,
    penalty_weight: f64,
    constraints: Vec<DegreeConstraint>,
    travel: QuadraticExpression,
    expression: QuadraticExpression,
}

impl QuboObjective {
    /// Variable grid the objective is defined over.
    pub fn grid(&self) -> &VariableGrid {
        &self.grid
    }

    /// Vehicle count used as the depot degree target.
    pub fn vehicles(&self) -> usize {
        self.vehicles
    }

    /// Penalty weight `A`.
    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    /// The `2n` degree constraints, in assembly order.
    pub fn constraints(&self) -> &[DegreeConstraint] {
        &self.constraints
    }

    /// Linear travel-cost part `Σ D[i][j]·x[i][j]`.
    pub fn travel(&self) -> &QuadraticExpression {
        &self.travel
    }

    /// Complete objective expression.
    pub fn expression(&self) -> &QuadraticExpression {
        &self.expression
    }

    /// Number of arc variables, `n·(n−1)`.
    pub fn num_variables(&self) -> usize {
        self.grid.len()
    }

    /// Box bounds handed to a solver for each variable.
    pub fn bounds(&self) -> Vec<VariableBounds> {
        self.grid.bounds()
    }

    /// Objective value at `values`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.expression.evaluate(values)
    }

    /// Travel-cost part of the objective at `values`.
    pub fn travel_cost(&self, values: &[f64]) -> f64 {
        self.travel.evaluate(values)
    }

    /// Dense linear vector / coupling matrix form.
    pub fn to_dense(&self) -> DenseQubo {
        DenseQubo::from_expression(&self.expression, self.num_variables())
    }

    /// Ising (spin) form of the objective.
    pub fn to_ising(&self) -> IsingHamiltonian {
        IsingHamiltonian::from_expression(&self.expression)
    }
}

/// Builds a [`QuboObjective`] from a distance matrix, a vehicle count and a
/// penalty weight.
///
/// # Examples
///
/// ```
/// use qubo_routing::distance::sample;
/// use qubo_routing::qubo::QuboAssembler;
///
/// let dm = sample::five_node();
/// let objective = QuboAssembler::new(&dm, 2, 1000.0).assemble();
/// assert_eq!(objective.num_variables(), 20);
/// assert_eq!(objective.constraints().len(), 10);
/// ```
pub struct QuboAssembler<'a> {
    distances: &'a DistanceMatrix,
    vehicles: usize,
    penalty_weight: f64,
}

impl<'a> QuboAssembler<'a> {
    /// Creates an assembler. The vehicle count is not checked against the
    /// number of customers and the weight is not checked against the cost
    /// scale.
    pub fn new(distances: &'a DistanceMatrix, vehicles: usize, penalty_weight: f64) -> Self {
        Self {
            distances,
            vehicles,
            penalty_weight,
        }
    }

    /// Linear travel term `Σ_{i≠j} D[i][j]·x[i][j]`.
    pub fn travel_term(&self, grid: &VariableGrid) -> QuadraticExpression {
        let mut travel = QuadraticExpression::zero();
        for arc in grid.arcs() {
            travel.add_linear(arc.id, self.distances.get(arc.from, arc.to));
        }
        travel
    }

    /// Assembles travel cost plus one weighted penalty per degree
    /// constraint, summed in a fixed order.
    pub fn assemble(&self) -> QuboObjective {
        let n = self.distances.size();
        let grid = VariableGrid::new(n);
        let constraints = DegreeConstraint::for_instance(n, self.vehicles);

        let max_distance = self.distances.max_distance();
        if self.penalty_weight <= max_distance {
            warn!(
                "penalty weight {} does not exceed the largest arc cost {}; degree constraints may be violated",
                self.penalty_weight, max_distance
            );
        }

        let travel = self.travel_term(&grid);
        let penalties: QuadraticExpression = constraints
            .iter()
            .map(|c| degree_penalty(&grid, c, self.penalty_weight))
            .sum();
        let expression = travel.clone() + penalties;

        debug!(
            "assembled QUBO: {} nodes, {} vehicles, {} variables, {} linear / {} quadratic terms",
            n,
            self.vehicles,
            grid.len(),
            expression.num_linear(),
            expression.num_quadratic()
        );

        QuboObjective {
            grid,
            vehicles: self.vehicles,
            penalty_weight: self.penalty_weight,
            constraints,
            travel,
            expression,
        }
    }
}

/// Shorthand for `QuboAssembler::new(distances, vehicles, penalty_weight).assemble()`.
pub fn assemble(distances: &DistanceMatrix, vehicles: usize, penalty_weight: f64) -> QuboObjective {
    QuboAssembler::new(distances, vehicles, penalty_weight).assemble()
}
