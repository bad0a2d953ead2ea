use std::io::Cursor;
use tiny_http::Response;

use crate::state::SharedState;

/// `GET /preview/{id}`
///
/// Serves the bytes behind a live preview handle; revoked handles are 404.
pub fn handle_get(id: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let Ok(id) = id.parse::<u64>() else {
        return crate::routes::not_found();
    };

    let st = state.lock().unwrap();
    let blob = st.previews.get(id).cloned();
    drop(st);

    match blob {
        Some(blob) => crate::routes::bytes_response(blob.bytes.to_vec(), &blob.content_type),
        None       => crate::routes::not_found(),
    }
}
