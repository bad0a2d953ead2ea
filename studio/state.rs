use std::sync::{Arc, Mutex};

use rps_predict::session::{PredictionSession, PreviewRegistry};
use rps_predict::{NetworkBackend, Predictor};

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// Selection / prediction lifecycle of the page.
    pub session:   PredictionSession,
    /// Bytes behind every live preview URL.
    pub previews:  PreviewRegistry,
    /// Shared with prediction worker threads.
    pub predictor: Arc<Predictor<NetworkBackend>>,
}

impl StudioState {
    pub fn new(predictor: Predictor<NetworkBackend>) -> Self {
        StudioState {
            session:   PredictionSession::new(),
            previews:  PreviewRegistry::new(),
            predictor: Arc::new(predictor),
        }
    }
}

/// Shared state type — an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;
