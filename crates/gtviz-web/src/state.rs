//! Shared application state for the web server.

use std::borrow::Cow;
use std::sync::Arc;

use gtviz_common::Result;
use secrecy::SecretString;
use tracing::debug;
use uuid::Uuid;

use crate::layout::Dashboard;
use crate::render::{PageRenderer, ReloadHook};
use crate::sse::RELOAD_PATH;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub dashboard: Dashboard,
    renderer: PageRenderer,
    token: SecretString,
    /// Fresh per process; the reload stream announces it.
    pub boot_id: Uuid,
    pub debug: bool,
    /// The page, rendered once, outside development mode.
    rendered: Option<String>,
}

impl AppState {
    /// Renders the page once up front so template errors stop startup.
    pub fn new(dashboard: Dashboard, renderer: PageRenderer, token: SecretString, debug: bool) -> Result<Self> {
        let mut state = Self {
            dashboard,
            renderer,
            token,
            boot_id: Uuid::new_v4(),
            debug,
            rendered: None,
        };
        let page = state.render()?;
        debug!("Rendered page: {} bytes", page.len());
        if !debug {
            state.rendered = Some(page);
        }
        Ok(state)
    }

    pub fn reload_hook(&self) -> Option<ReloadHook> {
        self.debug.then(|| ReloadHook {
            path: RELOAD_PATH.to_string(),
            boot_id: self.boot_id.to_string(),
        })
    }

    pub fn render(&self) -> Result<String> {
        self.renderer.render(&self.dashboard, &self.token, self.reload_hook().as_ref())
    }

    /// The cached page, or a fresh render in development mode.
    pub fn page(&self) -> Result<Cow<'_, str>> {
        match &self.rendered {
            Some(page) => Ok(Cow::Borrowed(page)),
            None => self.render().map(Cow::Owned),
        }
    }
}

pub type SharedState = Arc<AppState>;
