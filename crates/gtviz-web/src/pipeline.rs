//! Load, filter, aggregate and chart, once, at startup.

use std::path::Path;

use gtviz_aggregate::{aggregate_all, Aggregates};
use gtviz_charts::{build_charts, ChartSet};
use gtviz_common::Result;
use gtviz_config::{AggregationConfig, DataConfig};
use gtviz_data::{filter_region, load_incidents};
use tracing::info;

/// Everything the page is built from. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub region: String,
    /// Rows in the source file.
    pub total_rows: usize,
    /// Rows matching `region`.
    pub region_rows: usize,
    pub aggregates: Aggregates,
    pub charts: ChartSet,
}

/// Build with default columns, encoding and limits.
pub fn build_dashboard_state(source_path: &Path, region: &str) -> Result<DashboardState> {
    let data = DataConfig {
        source_path: source_path.to_path_buf(),
        region: region.to_string(),
        ..DataConfig::default()
    };
    build_dashboard_state_with(&data, &AggregationConfig::default())
}

pub fn build_dashboard_state_with(data: &DataConfig, aggregation: &AggregationConfig) -> Result<DashboardState> {
    let full = load_incidents(data)?;
    let region = filter_region(&full, &data.region);
    let aggregates = aggregate_all(&full, &region, aggregation);
    let charts = build_charts(&aggregates)?;

    info!(
        "Dashboard ready: {} incidents, {} in {:?}",
        full.len(),
        region.len(),
        data.region
    );
    Ok(DashboardState {
        region: data.region.clone(),
        total_rows: full.len(),
        region_rows: region.len(),
        aggregates,
        charts,
    })
}
