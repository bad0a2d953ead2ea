use clap::Args;
use std::path::PathBuf;

use crate::model::backend::{NetworkBackend, DEFAULT_MODEL_LOCATION};
use crate::pipeline::Predictor;
use crate::preprocess::{ImagePreprocessor, PreprocessConfig};

/// Model and preprocessing options shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Classifier artifact (JSON)
    #[arg(long, default_value = DEFAULT_MODEL_LOCATION)]
    pub model: PathBuf,

    /// Widest surface the image is drawn onto
    #[arg(long, default_value_t = PreprocessConfig::default().max_width)]
    pub max_width: u32,

    /// Tallest surface the image is drawn onto
    #[arg(long, default_value_t = PreprocessConfig::default().max_height)]
    pub max_height: u32,
}

impl ModelArgs {
    pub fn preprocess_config(&self) -> PreprocessConfig {
        PreprocessConfig { max_width: self.max_width, max_height: self.max_height }
    }

    pub fn predictor(&self) -> Predictor<NetworkBackend> {
        Predictor::new(
            NetworkBackend::new(&self.model),
            ImagePreprocessor::new(self.preprocess_config()),
        )
    }
}
