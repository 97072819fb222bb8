//! Violation types reported by solution evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Direction;

/// A way in which a decoded solution departs from a valid set of routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Selected arc count at a node differs from its degree target.
    DegreeMismatch {
        /// Node index.
        node: usize,
        /// Counted direction.
        direction: Direction,
        /// Degree target.
        expected: usize,
        /// Selected arcs counted.
        actual: usize,
    },
    /// Customer not reached by any decoded route.
    UnvisitedCustomer {
        /// Customer node.
        customer: usize,
    },
    /// Route that did not return to the depot.
    OpenRoute {
        /// Vehicle index.
        vehicle: usize,
        /// Node the trace stopped at.
        last: usize,
    },
}

/// A violation found in a decoded solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationType::DegreeMismatch {
                node,
                direction,
                expected,
                actual,
            } => write!(
                f,
                "node {node}: {direction}-degree {actual}, expected {expected}"
            ),
            ViolationType::UnvisitedCustomer { customer } => {
                write!(f, "customer {customer} not on any route")
            }
            ViolationType::OpenRoute { vehicle, last } => {
                write!(f, "route {} stops at node {last}", vehicle + 1)
            }
        }
    }
}
