//! Dashboard handler: the single page, and a 404 for everything else.

use axum::{extract::State, http::Uri, response::Html};
use gtviz_common::ApiError;

use crate::state::SharedState;

pub async fn dashboard(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let page = state.page()?;
    Ok(Html(page.into_owned()))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
