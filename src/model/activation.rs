use serde::{Deserialize, Serialize};
use std::f64::consts::{E, PI};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    /// Normalizes the whole layer output; not an element-wise function.
    Softmax,
    Tanh,
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
    Gelu,
    Swish,
}

impl ActivationFunction {
    /// Applies the activation to a layer's pre-activation vector in place.
    pub fn apply(&self, z: &mut [f64]) {
        match self {
            ActivationFunction::Softmax => softmax(z),
            other => z.iter_mut().for_each(|x| *x = other.scalar(*x)),
        }
    }

    fn scalar(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 { x } else { alpha * (E.powf(x) - 1.0) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x / (1.0 + E.powf(-x)),
        }
    }
}

/// Shifted by the maximum so large logits don't overflow `exp`.
fn softmax(z: &mut [f64]) {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for x in z.iter_mut() {
        *x = (*x - max).exp();
        sum += *x;
    }
    if sum > 0.0 {
        z.iter_mut().for_each(|x| *x /= sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_is_a_distribution_even_for_huge_logits() {
        let mut z = vec![1000.0, 1001.0, 1002.0];
        ActivationFunction::Softmax.apply(&mut z);
        let sum: f64 = z.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(z[2] > z[1] && z[1] > z[0]);
    }

    #[test]
    fn element_wise_functions() {
        let mut z = vec![-2.0, 0.0, 3.0];
        ActivationFunction::ReLU.apply(&mut z);
        assert_eq!(z, vec![0.0, 0.0, 3.0]);

        let mut z = vec![-2.0, 3.0];
        ActivationFunction::LeakyReLU { alpha: 0.1 }.apply(&mut z);
        assert_eq!(z, vec![-0.2, 3.0]);

        let mut z = vec![0.0];
        ActivationFunction::Sigmoid.apply(&mut z);
        assert_eq!(z, vec![0.5]);
    }

    #[test]
    fn serialized_names_match_model_files() {
        let relu: ActivationFunction = serde_json::from_str("\"ReLU\"").unwrap();
        assert_eq!(relu, ActivationFunction::ReLU);
        let leaky: ActivationFunction = serde_json::from_str(r#"{"LeakyReLU":{"alpha":0.01}}"#).unwrap();
        assert_eq!(leaky, ActivationFunction::LeakyReLU { alpha: 0.01 });
    }
}
