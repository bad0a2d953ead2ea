use thiserror::Error;

/// The uploaded bytes could not be turned into a bitmap.
#[derive(Debug, Error)]
#[error("image decode failed: {0}")]
pub struct DecodeError(#[from] pub image::ImageError);

/// The classifier artifact could not be fetched or parsed.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("could not read model artifact '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact '{location}' is not valid JSON: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact has no layers")]
    Empty,
    #[error("layer {layer} is malformed: {reason}")]
    Malformed { layer: usize, reason: String },
}

/// The prepared buffer does not fit what the model expects.
#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("input shape {actual:?} does not match model input shape {expected:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },
    #[error("model expects {expected} input values, buffer holds {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
}

/// Anything that can go wrong between "predict" and a score vector.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    /// The backend panicked mid-request.
    #[error("prediction aborted: {0}")]
    Aborted(String),
}

impl PredictError {
    /// The fixed string shown to the user for this failure.
    pub fn user_message(&self) -> UserMessage {
        match self {
            PredictError::ModelLoad(_)  => UserMessage::ModelFailedToLoad,
            PredictError::Decode(_)     => UserMessage::UnreadableImage,
            PredictError::Prediction(_) |
            PredictError::Aborted(_)    => UserMessage::PredictionFailed,
        }
    }
}

/// User-facing strings. None of them is fatal; the user re-triggers manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMessage {
    SelectImage,
    ModelFailedToLoad,
    PredictionFailed,
    UnreadableImage,
}

impl UserMessage {
    pub fn text(self) -> &'static str {
        match self {
            UserMessage::SelectImage       => "Select an image.",
            UserMessage::ModelFailedToLoad => "The model failed to load due to an error.",
            UserMessage::PredictionFailed  => "Prediction Error.",
            UserMessage::UnreadableImage   => "The image could not be read.",
        }
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
