use serde::{Deserialize, Serialize};

/// Weight matrix of a dense layer: `rows` inputs by `cols` outputs.
///
/// Stored as nested rows so the serialized form reads naturally in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Builds a matrix from its rows. Returns `None` for ragged input.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        let matrix = Matrix { rows, cols, data };
        matrix.is_consistent().then_some(matrix)
    }

    /// True when `rows`/`cols` describe `data` exactly.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    /// Row vector × matrix: `out[j] = Σ_i input[i] * data[i][j]`.
    ///
    /// The caller guarantees `input.len() == self.rows`.
    pub fn left_mul(&self, input: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.cols];
        for (x, row) in input.iter().zip(&self.data) {
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        out
    }
}
