use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ModelLoadError, PredictionError};
use crate::model::layer::DenseLayer;

/// Optional annotations stored next to the weights.
/// Every field is optional so bare weight files load as well.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// `[height, width, channels]` the model was trained on.
    pub input_shape: Option<[usize; 3]>,
}

/// A serialized feed-forward classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
    pub layers: Vec<DenseLayer>,
}

impl Network {
    /// Builds a network and checks that consecutive layers line up.
    pub fn new(layers: Vec<DenseLayer>, metadata: Option<ModelMetadata>) -> Result<Network, ModelLoadError> {
        let network = Network { metadata, layers };
        network.validate()?;
        Ok(network)
    }

    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.layers.is_empty() {
            return Err(ModelLoadError::Empty);
        }
        let mut fan_in = None;
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(i, fan_in)?;
            fan_in = Some(layer.output_size());
        }
        if let Some(shape) = self.metadata.as_ref().and_then(|m| m.input_shape) {
            let declared = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
            if declared != Some(self.input_size()) {
                let held = declared.map_or_else(|| "more than usize::MAX".to_owned(), |n| n.to_string());
                return Err(ModelLoadError::Malformed {
                    layer: 0,
                    reason: format!(
                        "metadata input shape {:?} holds {} values, layer expects {}",
                        shape, held, self.input_size()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Number of values the first layer consumes.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_size)
    }

    pub fn input_shape(&self) -> Option<[usize; 3]> {
        self.metadata.as_ref().and_then(|m| m.input_shape)
    }

    /// Runs `input` through every layer and returns the last activation.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if input.len() != self.input_size() {
            return Err(PredictionError::InputSizeMismatch {
                expected: self.input_size(),
                actual: input.len(),
            });
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        Ok(current)
    }

    /// Parses and validates a network from JSON text.
    /// `location` only labels error messages.
    pub fn from_json_str(json: &str, location: &str) -> Result<Network, ModelLoadError> {
        let network: Network = serde_json::from_str(json).map_err(|source| ModelLoadError::Parse {
            location: location.to_owned(),
            source,
        })?;
        network.validate()?;
        Ok(network)
    }

    pub fn load_json(path: &Path) -> Result<Network, ModelLoadError> {
        let location = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            location: location.clone(),
            source,
        })?;
        Network::from_json_str(&json, &location)
    }

    /// Writes the network as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(std::io::Error::other)
    }
}
