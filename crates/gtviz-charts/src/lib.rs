//! gtviz-charts: Declarative chart specifications.
//!
//! Each aggregate becomes a [`ChartSpec`]: a chart kind, the aggregate fields
//! bound to each visual channel, presentation parameters, and a ready-to-plot
//! Plotly figure. Building a chart never touches the aggregate it reads.

pub mod palette;
pub mod figure;
pub mod spec;
pub mod builder;

pub use builder::{
    build_charts, country_bar_chart, group_pie_chart, incident_map_chart, matrix_bar_chart,
    series_area_chart, ChartSet,
};
pub use figure::Figure;
pub use spec::{Channels, ChartId, ChartKind, ChartSpec, ChartStyle, LegendAnchor, Margin};
