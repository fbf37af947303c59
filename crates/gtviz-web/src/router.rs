//! Axum router: maps URL paths to handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::handlers::dashboard::{dashboard, not_found};
use crate::sse::{reload_handler, RELOAD_PATH};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let debug = state.debug;
    let shared: SharedState = Arc::new(state);

    let mut router: Router<SharedState> = Router::new().route("/", get(dashboard));
    if debug {
        router = router.route(RELOAD_PATH, get(reload_handler));
    }

    router
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
