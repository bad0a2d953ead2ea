use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{PredictError, UserMessage};
use crate::model::scores::ScoreVector;
use crate::session::preview::{PreviewHandle, PreviewRegistry};

/// An image the user picked.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

/// Where the page is in the select → predict → result cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Nothing selected; predict disabled.
    Idle,
    /// File and preview available; predict enabled.
    FileSelected,
    /// A request is in flight; predict disabled until it settles.
    Predicting,
    /// Scores available; predict enabled for another run on the same file.
    Resulted(ScoreVector),
    /// Load, decode or run failure; predict enabled.
    Error(UserMessage),
}

/// Issued when a prediction starts. Carries what the worker needs and the
/// sequence number that decides whether its result still applies.
#[derive(Debug, Clone)]
pub struct PredictionTicket {
    seq: u64,
    pub image: Arc<[u8]>,
}

impl PredictionTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Why a prediction could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginError {
    NoFile,
    InFlight,
}

/// What happened to a finished prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer selection or request superseded it; the result was dropped.
    Stale,
}

/// Selection/result state of the page.
///
/// Every selection and every prediction start bumps `seq`; a completion is
/// applied only if its ticket still carries the current value.
#[derive(Debug)]
pub struct PredictionSession {
    phase: Phase,
    file: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
    notice: Option<UserMessage>,
    seq: u64,
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionSession {
    pub fn new() -> Self {
        PredictionSession {
            phase: Phase::Idle,
            file: None,
            preview: None,
            notice: None,
            seq: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn predict_enabled(&self) -> bool {
        matches!(
            self.phase,
            Phase::FileSelected | Phase::Resulted(_) | Phase::Error(_)
        )
    }

    pub fn is_predicting(&self) -> bool {
        self.phase == Phase::Predicting
    }

    /// Text for the result line, if any.
    pub fn result_text(&self) -> Option<String> {
        if let Some(notice) = self.notice {
            return Some(notice.text().to_owned());
        }
        match &self.phase {
            Phase::Resulted(scores) => Some(scores.to_string()),
            Phase::Error(msg)       => Some(msg.text().to_owned()),
            _ => None,
        }
    }

    /// Shows a prompt without changing phase.
    pub fn notify(&mut self, message: UserMessage) {
        self.notice = Some(message);
    }

    /// Replaces the selection. Always lands in `FileSelected`, whatever the
    /// prior phase; an in-flight prediction keeps running but its result will
    /// be discarded.
    pub fn select_file(&mut self, file: SelectedFile, previews: &mut PreviewRegistry) {
        self.release_preview(previews);
        self.preview = Some(previews.create(file.content_type.clone(), file.bytes.clone()));
        if self.phase == Phase::Predicting {
            debug!(seq = self.seq, "selection replaced an in-flight prediction");
        }
        info!(name = %file.name, bytes = file.bytes.len(), "file selected");
        self.file = Some(file);
        self.notice = None;
        self.seq += 1;
        self.phase = Phase::FileSelected;
    }

    /// Starts a prediction for the current file.
    ///
    /// Without a file this only sets the "select an image" prompt.
    pub fn begin_prediction(&mut self) -> Result<PredictionTicket, BeginError> {
        let image = match &self.file {
            Some(file) => file.bytes.clone(),
            None => {
                self.notice = Some(UserMessage::SelectImage);
                return Err(BeginError::NoFile);
            }
        };
        if self.phase == Phase::Predicting {
            return Err(BeginError::InFlight);
        }
        self.seq += 1;
        self.notice = None;
        self.phase = Phase::Predicting;
        debug!(seq = self.seq, "prediction started");
        Ok(PredictionTicket { seq: self.seq, image })
    }

    /// Settles a prediction started by [`begin_prediction`](Self::begin_prediction).
    pub fn complete(
        &mut self,
        ticket: PredictionTicket,
        outcome: Result<ScoreVector, PredictError>,
    ) -> Completion {
        if ticket.seq != self.seq || self.phase != Phase::Predicting {
            warn!(ticket = ticket.seq, current = self.seq, "discarding stale prediction result");
            return Completion::Stale;
        }
        self.phase = match outcome {
            Ok(scores) => Phase::Resulted(scores),
            Err(e)     => Phase::Error(e.user_message()),
        };
        Completion::Applied
    }

    /// View teardown: releases the preview and forgets the selection.
    pub fn teardown(&mut self, previews: &mut PreviewRegistry) {
        self.release_preview(previews);
        self.file = None;
        self.notice = None;
        self.seq += 1;
        self.phase = Phase::Idle;
    }

    fn release_preview(&mut self, previews: &mut PreviewRegistry) {
        if let Some(handle) = self.preview.take() {
            previews.revoke(&handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ModelLoadError, PredictionError};

    fn file(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_owned(),
            content_type: "image/png".to_owned(),
            bytes: Arc::from(name.as_bytes()),
        }
    }

    fn scores() -> ScoreVector {
        ScoreVector::new(vec![0.1, 0.7, 0.2])
    }

    #[test]
    fn starts_idle_with_predict_disabled() {
        let session = PredictionSession::new();
        assert_eq!(session.phase(), &Phase::Idle);
        assert!(!session.predict_enabled());
        assert_eq!(session.result_text(), None);
    }

    #[test]
    fn predict_without_file_prompts_and_hands_out_no_ticket() {
        let mut session = PredictionSession::new();
        assert_eq!(session.begin_prediction().unwrap_err(), BeginError::NoFile);
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.result_text().as_deref(), Some("Select an image."));
    }

    #[test]
    fn full_cycle_reaches_resulted_and_reenables_predict() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();

        session.select_file(file("rock.png"), &mut previews);
        assert_eq!(session.phase(), &Phase::FileSelected);
        assert!(session.predict_enabled());

        let ticket = session.begin_prediction().unwrap();
        assert!(session.is_predicting());
        assert!(!session.predict_enabled());
        assert_eq!(&*ticket.image, b"rock.png");

        assert_eq!(session.complete(ticket, Ok(scores())), Completion::Applied);
        assert_eq!(session.phase(), &Phase::Resulted(scores()));
        assert!(session.predict_enabled());
        assert_eq!(session.result_text().as_deref(), Some("0.1,0.7,0.2"));

        // Re-running on the same file is allowed.
        assert!(session.begin_prediction().is_ok());
    }

    #[test]
    fn second_trigger_while_in_flight_is_refused() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();
        session.select_file(file("a.png"), &mut previews);

        let first = session.begin_prediction().unwrap();
        assert_eq!(session.begin_prediction().unwrap_err(), BeginError::InFlight);
        assert_eq!(session.complete(first, Ok(scores())), Completion::Applied);
    }

    #[test]
    fn failures_surface_their_message() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();
        session.select_file(file("a.png"), &mut previews);

        let ticket = session.begin_prediction().unwrap();
        session.complete(ticket, Err(ModelLoadError::Empty.into()));
        assert_eq!(session.phase(), &Phase::Error(UserMessage::ModelFailedToLoad));
        assert!(session.predict_enabled());

        let ticket = session.begin_prediction().unwrap();
        let err = PredictionError::InputSizeMismatch { expected: 1, actual: 2 };
        session.complete(ticket, Err(err.into()));
        assert_eq!(session.result_text().as_deref(), Some("Prediction Error."));
    }

    #[test]
    fn reselecting_while_predicting_drops_the_stale_result() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();
        session.select_file(file("old.png"), &mut previews);
        let stale = session.begin_prediction().unwrap();

        session.select_file(file("new.png"), &mut previews);
        assert_eq!(session.phase(), &Phase::FileSelected);

        assert_eq!(session.complete(stale, Ok(scores())), Completion::Stale);
        assert_eq!(session.phase(), &Phase::FileSelected);
        assert_eq!(session.file().unwrap().name, "new.png");

        // A fresh request on the new file goes through normally.
        let fresh = session.begin_prediction().unwrap();
        assert_eq!(session.complete(fresh, Ok(scores())), Completion::Applied);
    }

    #[test]
    fn stale_ticket_cannot_settle_a_newer_request() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();
        session.select_file(file("a.png"), &mut previews);
        let old = session.begin_prediction().unwrap();
        session.select_file(file("a.png"), &mut previews);
        let current = session.begin_prediction().unwrap();

        assert_eq!(session.complete(old, Err(ModelLoadError::Empty.into())), Completion::Stale);
        assert!(session.is_predicting());
        assert_eq!(session.complete(current, Ok(scores())), Completion::Applied);
    }

    #[test]
    fn replacing_a_file_releases_the_previous_preview() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();

        session.select_file(file("a.png"), &mut previews);
        let first_id = session.preview().unwrap().id();
        session.select_file(file("b.png"), &mut previews);

        assert_eq!(previews.live_count(), 1);
        assert!(previews.get(first_id).is_none());
        assert!(previews.get(session.preview().unwrap().id()).is_some());
    }

    #[test]
    fn teardown_releases_preview_exactly_once() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();
        session.select_file(file("a.png"), &mut previews);

        session.teardown(&mut previews);
        session.teardown(&mut previews);

        assert_eq!(previews.live_count(), 0);
        assert_eq!(session.phase(), &Phase::Idle);
        assert!(session.preview().is_none());
        assert!(!session.predict_enabled());
    }

    #[test]
    fn selecting_clears_an_earlier_prompt() {
        let mut previews = PreviewRegistry::new();
        let mut session = PredictionSession::new();
        let _ = session.begin_prediction();
        session.select_file(file("a.png"), &mut previews);
        assert_eq!(session.result_text(), None);
    }
}
