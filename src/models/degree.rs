//! Degree constraints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which arcs of a node a degree constraint counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Arcs leaving the node, `x[i][j]`.
    Out,
    /// Arcs entering the node, `x[j][i]`.
    In,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Out => f.write_str("out"),
            Direction::In => f.write_str("in"),
        }
    }
}

/// "Exactly `target` selected arcs in `direction` at `node`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeConstraint {
    pub node: usize,
    pub target: usize,
    pub direction: Direction,
}

impl DegreeConstraint {
    /// Requires exactly `target` selected arcs at `node` in `direction`.
    pub fn new(node: usize, target: usize, direction: Direction) -> Self {
        Self {
            node,
            target,
            direction,
        }
    }

    /// The `2n` constraints of a routing instance with `nodes` nodes and
    /// `vehicles` vehicles.
    ///
    /// Customers `1..n` require one arc out and one in; the depot requires
    /// `vehicles` of each. Order: customer out-degrees, customer in-degrees,
    /// depot out-degree, depot in-degree.
    pub fn for_instance(nodes: usize, vehicles: usize) -> Vec<Self> {
        if nodes == 0 {
            return Vec::new();
        }
        let mut constraints = Vec::with_capacity(2 * nodes);
        constraints.extend((1..nodes).map(|i| Self::new(i, 1, Direction::Out)));
        constraints.extend((1..nodes).map(|i| Self::new(i, 1, Direction::In)));
        constraints.push(Self::new(0, vehicles, Direction::Out));
        constraints.push(Self::new(0, vehicles, Direction::In));
        constraints
    }
}
