use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ModelLoadError, PredictionError};
use crate::model::network::Network;
use crate::model::scores::ScoreVector;
use crate::preprocess::buffer::{PixelBuffer, CHANNELS};

/// Where the default artifact lives, relative to the working directory.
pub const DEFAULT_MODEL_LOCATION: &str = "best-model.json";

/// A classifier runtime reduced to the two calls the pipeline needs.
///
/// Implementations must be shareable across the worker threads that run
/// predictions.
pub trait InferenceBackend: Send + Sync {
    type Model;

    /// Fetches and parses the artifact.
    fn load(&self) -> Result<Self::Model, ModelLoadError>;

    /// Scores one prepared buffer.
    fn run(&self, model: &Self::Model, input: &PixelBuffer) -> Result<ScoreVector, PredictionError>;
}

/// Runs JSON-serialized [`Network`]s read from a fixed location.
#[derive(Debug, Clone)]
pub struct NetworkBackend {
    location: PathBuf,
}

impl NetworkBackend {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        NetworkBackend { location: location.into() }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl Default for NetworkBackend {
    fn default() -> Self {
        NetworkBackend::new(DEFAULT_MODEL_LOCATION)
    }
}

impl InferenceBackend for NetworkBackend {
    type Model = Network;

    fn load(&self) -> Result<Network, ModelLoadError> {
        let network = Network::load_json(&self.location)?;
        info!(
            location = %self.location.display(),
            layers = network.layers.len(),
            inputs = network.input_size(),
            outputs = network.output_size(),
            "model loaded"
        );
        Ok(network)
    }

    fn run(&self, model: &Network, input: &PixelBuffer) -> Result<ScoreVector, PredictionError> {
        let actual = [input.height(), input.width(), CHANNELS];
        if let Some(expected) = model.input_shape() {
            if expected != actual {
                return Err(PredictionError::ShapeMismatch { expected, actual });
            }
        }
        debug!(shape = ?input.shape(), "running model");
        let output = model.forward(&input.to_f64_vec())?;
        Ok(ScoreVector::new(output))
    }
}
