//! Distance matrices.
//!
//! Provides a validated dense travel-cost matrix and the bundled sample
//! instances.

mod matrix;
pub mod sample;

pub use matrix::DistanceMatrix;
