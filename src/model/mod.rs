pub mod activation;
pub mod backend;
pub mod layer;
pub mod matrix;
pub mod network;
pub mod scores;

pub use activation::ActivationFunction;
pub use backend::{InferenceBackend, NetworkBackend};
pub use layer::DenseLayer;
pub use matrix::Matrix;
pub use network::{ModelMetadata, Network};
pub use scores::ScoreVector;
