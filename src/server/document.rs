//! Export endpoints for the finished document

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rpm_core::export::{self, WORD_MIME_TYPE};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use super::AppState;

const NO_DOCUMENT: &str = "Belum ada dokumen RPM yang selesai dibuat.";

/// Rich-text payload for the browser clipboard, with a plain-text fallback
#[derive(Debug, Serialize)]
pub struct ClipboardPayload {
    pub html: String,
    pub text: String,
}

fn no_document() -> Response {
    (StatusCode::CONFLICT, Json(json!({ "error": NO_DOCUMENT }))).into_response()
}

/// GET /api/document/download
///
/// Word-compatible HTML served as `.doc`, named after the subject and class.
pub async fn download(State(state): State<AppState>) -> Response {
    let export = {
        let session = state.session().lock();
        match (session.completed_document(), session.submitted_request()) {
            (Some(document), Some(request)) => Some((
                export::word_document(document),
                export::download_filename(request),
            )),
            _ => None,
        }
    };

    let Some((body, filename)) = export else {
        return no_document();
    };

    info!(%filename, bytes = body.len(), "document downloaded");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, WORD_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /api/document/clipboard
pub async fn clipboard(State(state): State<AppState>) -> Response {
    let payload = {
        let session = state.session().lock();
        session.completed_document().map(|document| ClipboardPayload {
            html: export::clipboard_html(document),
            text: export::plain_text(document),
        })
    };

    match payload {
        Some(payload) => Json(payload).into_response(),
        None => no_document(),
    }
}
