//! Bundled benchmark instances.

use super::DistanceMatrix;

/// Vehicle count used with [`five_node`].
pub const FIVE_NODE_VEHICLES: usize = 2;

/// Four-node symmetric instance (depot plus three customers).
pub fn four_node() -> DistanceMatrix {
    rows_to_matrix(vec![
        vec![0.0, 36.84, 5.06, 30.63],
        vec![36.84, 0.0, 24.55, 63.22],
        vec![5.06, 24.55, 0.0, 15.50],
        vec![30.63, 63.22, 15.50, 0.0],
    ])
}

/// Five-node symmetric instance (depot plus four customers), solved with
/// [`FIVE_NODE_VEHICLES`] vehicles.
pub fn five_node() -> DistanceMatrix {
    rows_to_matrix(vec![
        vec![0.0, 6.794, 61.653, 24.557, 47.767],
        vec![6.794, 0.0, 87.312, 47.262, 39.477],
        vec![61.653, 87.312, 0.0, 9.711, 42.887],
        vec![24.557, 47.262, 9.711, 0.0, 40.980],
        vec![47.767, 39.477, 42.887, 40.980, 0.0],
    ])
}

fn rows_to_matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
    let size = rows.len();
    let mut dm = DistanceMatrix::new(size);
    for (i, row) in rows.into_iter().enumerate() {
        for (j, d) in row.into_iter().enumerate() {
            dm.set(i, j, d);
        }
    }
    dm
}
