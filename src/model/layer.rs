use serde::{Deserialize, Serialize};

use crate::error::ModelLoadError;
use crate::model::{activation::ActivationFunction, matrix::Matrix};

/// Fully connected layer: `activation(input · weights + biases)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activation: ActivationFunction,
}

impl DenseLayer {
    pub fn new(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> DenseLayer {
        DenseLayer { weights, biases, activation }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn output_size(&self) -> usize {
        self.weights.cols
    }

    /// The caller guarantees `input.len() == self.input_size()`.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.left_mul(input);
        for (v, b) in z.iter_mut().zip(&self.biases) {
            *v += b;
        }
        self.activation.apply(&mut z);
        z
    }

    /// Checks the layer's own shape and that it accepts `fan_in` inputs.
    pub fn validate(&self, index: usize, fan_in: Option<usize>) -> Result<(), ModelLoadError> {
        let malformed = |reason: String| ModelLoadError::Malformed { layer: index, reason };

        if !self.weights.is_consistent() {
            return Err(malformed(format!(
                "weights declare {}x{} but data does not match",
                self.weights.rows, self.weights.cols
            )));
        }
        if self.weights.rows == 0 || self.weights.cols == 0 {
            return Err(malformed("weights are empty".into()));
        }
        if self.biases.len() != self.weights.cols {
            return Err(malformed(format!(
                "{} biases for {} outputs",
                self.biases.len(),
                self.weights.cols
            )));
        }
        match fan_in {
            Some(n) if n != self.weights.rows => Err(malformed(format!(
                "expects {} inputs but previous layer produces {}",
                self.weights.rows, n
            ))),
            _ => Ok(()),
        }
    }
}
