use std::io::Cursor;
use std::sync::Arc;
use tiny_http::{Request, Response};
use tracing::{debug, warn};

use rps_predict::session::{BeginError, Completion, SelectedFile};
use rps_predict::UserMessage;

use crate::render::{html_escape, render_page};
use crate::state::{SharedState, StudioState};
use crate::util::multipart::{extract_boundary, extract_file_part, FilePart};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st = state.lock().unwrap();
    let session = &st.session;
    let view = PageView {
        predicting:      session.is_predicting(),
        predict_enabled: session.predict_enabled(),
        preview_url:     session.preview().map(|p| p.url()),
        file_name:       session.file().map(|f| f.name.clone()),
        result:          session.result_text(),
    };
    drop(st);

    crate::routes::html_response(build_page(&view))
}

// ---------------------------------------------------------------------------
// POST /select
// ---------------------------------------------------------------------------

pub fn handle_select(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let mut body: Vec<u8> = Vec::new();
    let part = match request.as_reader().read_to_end(&mut body) {
        Ok(_) => accepted_upload(&content_type, &body),
        Err(e) => {
            warn!(error = %e, "could not read upload body");
            None
        }
    };

    apply_upload(&mut state.lock().unwrap(), part);

    crate::routes::redirect("/")
}

/// The uploaded file, if the body carries a non-empty image part.
fn accepted_upload(content_type: &str, body: &[u8]) -> Option<FilePart> {
    extract_boundary(content_type)
        .and_then(|boundary| extract_file_part(body, &boundary))
        .filter(|p| p.is_image() && !p.bytes.is_empty())
}

/// Selects `part`, or leaves the phase alone and prompts for an image.
fn apply_upload(st: &mut StudioState, part: Option<FilePart>) {
    match part {
        Some(part) => {
            let file = SelectedFile {
                name:         part.filename,
                content_type: part.content_type,
                bytes:        Arc::from(part.bytes),
            };
            st.session.select_file(file, &mut st.previews);
        }
        None => st.session.notify(UserMessage::SelectImage),
    }
}

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Starts a prediction on a worker thread and returns immediately; the page
/// polls until the session leaves `Predicting`.
pub fn handle_predict(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let started = st.session.begin_prediction();
    let predictor = st.predictor.clone();
    drop(st);

    match started {
        Ok(ticket) => {
            std::thread::spawn(move || {
                let outcome = predictor.predict_settled(&ticket.image);
                let seq = ticket.seq();
                let mut st = state.lock().unwrap();
                if st.session.complete(ticket, outcome) == Completion::Stale {
                    debug!(seq, "result arrived after the selection changed");
                }
            });
        }
        Err(BeginError::NoFile)   => debug!("predict pressed with no file selected"),
        Err(BeginError::InFlight) => debug!("predict pressed while a request is in flight"),
    }

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /reset
// ---------------------------------------------------------------------------

pub fn handle_reset(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut guard = state.lock().unwrap();
    let st = &mut *guard;
    st.session.teardown(&mut st.previews);
    drop(guard);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

/// Snapshot of the session taken under the lock.
struct PageView {
    predicting:      bool,
    predict_enabled: bool,
    preview_url:     Option<String>,
    file_name:       Option<String>,
    result:          Option<String>,
}

fn build_page(view: &PageView) -> String {
    let preview_section = match (&view.preview_url, &view.file_name) {
        (Some(url), name) => format!(
            r#"<div class="image-container"><img src="{url}" alt="{alt}" class="uploaded-image"></div>"#,
            url = html_escape(url),
            alt = html_escape(name.as_deref().unwrap_or("Uploaded")),
        ),
        (None, _) => String::new(),
    };

    let disabled = if view.predict_enabled { "" } else { " disabled" };
    let label = if view.predicting { "Predicting..." } else { "Predict" };

    let result_section = view.result.as_ref()
        .map(|text| format!(r#"<p class="result">Result: {}</p>"#, html_escape(text)))
        .unwrap_or_default();

    let reset_section = if view.preview_url.is_some() {
        r#"<form method="POST" action="/reset"><button type="submit" class="reset-btn">Clear</button></form>"#
    } else {
        ""
    };

    render_page(view.predicting, |tmpl| {
        tmpl
            .replace("{{PREVIEW_SECTION}}", &preview_section)
            .replace("{{PREDICT_DISABLED}}", disabled)
            .replace("{{PREDICT_LABEL}}", label)
            .replace("{{RESULT_SECTION}}", &result_section)
            .replace("{{RESET_SECTION}}", reset_section)
    })
}
