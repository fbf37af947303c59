//! Server-Sent Events stream for development-mode auto-reload.
//!
//! Each connection receives one `boot` event carrying the process boot id and
//! is then held open. When the server restarts the browser reconnects, sees a
//! different id and reloads the page.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::StreamExt;

use crate::state::SharedState;

pub const RELOAD_PATH: &str = "/_reload";
pub const BOOT_EVENT: &str = "boot";

pub async fn reload_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let boot = Event::default().event(BOOT_EVENT).data(state.boot_id.to_string());
    let stream = tokio_stream::once(Ok::<_, Infallible>(boot)).chain(tokio_stream::pending());

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
