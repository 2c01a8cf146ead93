//! Server-Sent Events carrying `UiState` snapshots

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::AppState;

/// GET /api/events
///
/// Sends the current snapshot immediately, then one `state` event per
/// published change. Intermediate snapshots may be coalesced under load;
/// each event is complete on its own.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE client connected");
    let mut updates = state.events.clone();

    let stream = async_stream::stream! {
        loop {
            let snapshot = updates.borrow_and_update().clone();
            match Event::default().event("state").json_data(&snapshot) {
                Ok(event) => yield Ok(event),
                Err(error) => warn!(%error, "failed to encode state event"),
            }

            if updates.changed().await.is_err() {
                debug!("state channel closed, ending SSE stream");
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
