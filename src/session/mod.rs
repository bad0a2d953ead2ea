pub mod preview;
pub mod state;

pub use preview::{PreviewBlob, PreviewHandle, PreviewRegistry};
pub use state::{BeginError, Completion, Phase, PredictionSession, PredictionTicket, SelectedFile};
