//! From solver output back to routes.
//!
//! - [`ArcSelection`] — arcs whose value exceeds the selection threshold
//! - [`RouteDecoder`] — greedy successor walk from the depot, one per vehicle

mod decoder;
mod selection;

pub use decoder::{decode, RouteDecoder};
pub use selection::{ArcSelection, DEFAULT_THRESHOLD};
