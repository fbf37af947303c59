//! Page rendering with minijinja.
//!
//! Templates are compiled into the binary. In development mode they are read
//! from disk on every render instead, so edits show up on refresh.

use std::path::{Path, PathBuf};

use gtviz_charts::{ChartId, Figure};
use gtviz_common::{GtvizError, Result};
use gtviz_config::ServerConfig;
use minijinja::{context, path_loader, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info};

use crate::layout::Dashboard;

pub const PAGE_TEMPLATE: &str = "page.html";
pub const NAVBAR_TEMPLATE: &str = "navbar.html";

const PAGE_SOURCE: &str = include_str!("../templates/page.html");
const NAVBAR_SOURCE: &str = include_str!("../templates/navbar.html");

/// Tells the page where to listen for server restarts.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadHook {
    pub path: String,
    pub boot_id: String,
}

#[derive(Serialize)]
struct FigureSlot<'a> {
    id: ChartId,
    figure: &'a Figure,
}

/// Options passed to `Plotly.newPlot` for every chart.
#[derive(Serialize)]
struct PlotConfig<'a> {
    #[serde(rename = "mapboxAccessToken")]
    mapbox_access_token: &'a str,
    #[serde(rename = "displaylogo")]
    display_logo: bool,
}

pub struct PageRenderer {
    templates_dir: Option<PathBuf>,
    embedded: Environment<'static>,
}

fn template_error(err: minijinja::Error) -> GtvizError {
    GtvizError::Template(err.to_string())
}

impl PageRenderer {
    /// Render from the templates compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, PAGE_SOURCE).map_err(template_error)?;
        env.add_template(NAVBAR_TEMPLATE, NAVBAR_SOURCE).map_err(template_error)?;
        Ok(Self { templates_dir: None, embedded: env })
    }

    /// Re-read templates from `dir` on every render.
    pub fn live(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut renderer = Self::embedded()?;
        renderer.templates_dir = Some(dir.into());
        Ok(renderer)
    }

    /// Live templates in debug mode when the directory exists, embedded otherwise.
    pub fn from_config(server: &ServerConfig) -> Result<Self> {
        if server.debug && server.templates_dir.is_dir() {
            info!("Live templates from {}", server.templates_dir.display());
            Self::live(&server.templates_dir)
        } else {
            debug!("Using embedded templates");
            Self::embedded()
        }
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    pub fn render(
        &self,
        dashboard: &Dashboard,
        token: &SecretString,
        reload: Option<&ReloadHook>,
    ) -> Result<String> {
        match &self.templates_dir {
            Some(dir) => {
                let mut env = Environment::new();
                env.set_loader(path_loader(dir.clone()));
                render_page(&env, dashboard, token, reload)
            }
            None => render_page(&self.embedded, dashboard, token, reload),
        }
    }
}

fn render_page(
    env: &Environment<'_>,
    dashboard: &Dashboard,
    token: &SecretString,
    reload: Option<&ReloadHook>,
) -> Result<String> {
    let layout = &dashboard.layout;
    let figures: Vec<FigureSlot<'_>> = layout
        .chart_ids()
        .into_iter()
        .map(|id| FigureSlot { id, figure: &dashboard.charts.get(id).figure })
        .collect();
    let plot_config = PlotConfig { mapbox_access_token: token.expose_secret(), display_logo: false };

    env.get_template(PAGE_TEMPLATE)
        .and_then(|tmpl| {
            tmpl.render(context! {
                title => &layout.title,
                navbar => &layout.navbar,
                rows => &layout.rows,
                figures => figures,
                plot_config => plot_config,
                reload => reload,
            })
        })
        .map_err(template_error)
}
