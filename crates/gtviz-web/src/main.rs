//! gtviz dashboard server
//!
//! Run with: cargo run -p gtviz-web

use anyhow::Context;
use gtviz_config::Config;
use gtviz_data::load_token;
use gtviz_web::{assemble_layout, build_dashboard_state_with, build_router, AppState, PageRenderer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,gtviz_web=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("📊 gtviz starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().context("loading configuration")?;
    info!(
        "Configuration loaded. Source: {}, region: {:?}, debug: {}",
        config.data.source_path.display(),
        config.data.region,
        config.server.debug
    );

    let token = match load_token(&config.data.token_path) {
        Ok(token) => token,
        Err(e) => {
            if e.is_missing_file() {
                warn!("Put your Mapbox access token in {} (or set GTVIZ_TOKEN_PATH).", config.data.token_path.display());
            }
            return Err(e).context("reading map token");
        }
    };

    let state = build_dashboard_state_with(&config.data, &config.aggregation)
        .with_context(|| format!("building dashboard from {}", config.data.source_path.display()))?;
    info!("✅ Aggregates and charts built ({} of {} rows in region)", state.region_rows, state.total_rows);

    let dashboard = assemble_layout(state.charts)?;
    let renderer = PageRenderer::from_config(&config.server)?;
    let app = build_router(AppState::new(dashboard, renderer, token, config.server.debug)?);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("🚀 Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections...");
}
