pub mod cli;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod preprocess;
pub mod session;

// Convenience re-exports
pub use error::{DecodeError, ModelLoadError, PredictError, PredictionError, UserMessage};
pub use model::{InferenceBackend, Network, NetworkBackend, ScoreVector};
pub use pipeline::Predictor;
pub use preprocess::{fit_dimensions, ImagePreprocessor, PixelBuffer, PreprocessConfig};
pub use session::{PredictionSession, PreviewRegistry};
