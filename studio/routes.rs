use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Only for ASCII literals; uploaded values go through `content_type_header`.
fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}

fn content_type_header(value: &str) -> Header {
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes())
        .unwrap_or_else(|_| header("Content-Type", "application/octet-stream"))
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    bytes_response(body.into_bytes(), "text/html; charset=utf-8")
}

pub fn bytes_response(bytes: Vec<u8>, content_type: &str) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![
            content_type_header(content_type),
            header("Cache-Control", "no-store"),
        ],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(303),
        vec![
            header("Location", location),
            header("Content-Length", "0"),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![header("Content-Type", "text/plain")],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();
    debug!(%method, %path, "request");

    if method == Method::Get {
        if let Some(id) = path.strip_prefix("/preview/") {
            let resp = handlers::preview::handle_get(id, state);
            let _ = request.respond(resp);
            return;
        }
    }

    let response = match (method, path.as_str()) {
        (Method::Get,  "/")        => handlers::classify::handle_get(state),
        (Method::Post, "/select")  => handlers::classify::handle_select(&mut request, state),
        (Method::Post, "/predict") => handlers::classify::handle_predict(state),
        (Method::Post, "/reset")   => handlers::classify::handle_reset(state),
        _ => not_found(),
    };

    let _ = request.respond(response);
}
