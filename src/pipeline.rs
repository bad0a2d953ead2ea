//! The linear prediction sequence: load model → preprocess → run.

use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info, warn};

use crate::error::PredictError;
use crate::model::backend::InferenceBackend;
use crate::model::scores::ScoreVector;
use crate::preprocess::processor::ImagePreprocessor;

/// Pairs an inference backend with the image preprocessor.
#[derive(Debug, Clone)]
pub struct Predictor<B> {
    backend: B,
    preprocessor: ImagePreprocessor,
}

impl<B: InferenceBackend> Predictor<B> {
    pub fn new(backend: B, preprocessor: ImagePreprocessor) -> Self {
        Predictor { backend, preprocessor }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preprocessor(&self) -> &ImagePreprocessor {
        &self.preprocessor
    }

    /// Scores one image blob.
    ///
    /// The model is loaded afresh for every call and before the image is
    /// decoded, so a missing artifact is reported even for unreadable images.
    pub fn predict(&self, image: &[u8]) -> Result<ScoreVector, PredictError> {
        let result = self.predict_inner(image);
        match &result {
            Ok(scores) => info!(classes = scores.len(), "prediction finished"),
            Err(e)     => warn!(error = %e, "prediction failed"),
        }
        result
    }

    /// Like [`predict`](Self::predict), but a panic inside the backend comes
    /// back as [`PredictError::Aborted`] so the caller can always settle its
    /// request.
    pub fn predict_settled(&self, image: &[u8]) -> Result<ScoreVector, PredictError> {
        catch_unwind(AssertUnwindSafe(|| self.predict(image))).unwrap_or_else(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            error!(%reason, "prediction panicked");
            Err(PredictError::Aborted(reason))
        })
    }

    fn predict_inner(&self, image: &[u8]) -> Result<ScoreVector, PredictError> {
        let model = self.backend.load()?;
        let buffer = self.preprocessor.preprocess(image)?;
        Ok(self.backend.run(&model, &buffer)?)
    }
}
