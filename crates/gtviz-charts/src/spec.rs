//! Chart specification types.

use gtviz_aggregate::AggregateTable;
use gtviz_common::{GtvizError, Result};
use serde::Serialize;

use crate::figure::Figure;

/// Identity of a chart slot on the page; doubles as its DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    ScatterMap,
    BarChart,
    PieChart,
    LineChart,
    StackedChart,
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        ChartId::ScatterMap,
        ChartId::BarChart,
        ChartId::PieChart,
        ChartId::LineChart,
        ChartId::StackedChart,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            ChartId::ScatterMap   => "scatter-map",
            ChartId::BarChart     => "bar-chart",
            ChartId::PieChart     => "pie-chart",
            ChartId::LineChart    => "line-chart",
            ChartId::StackedChart => "stacked-chart",
        }
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dom_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Points on a tile map.
    ScatterMapbox,
    /// Horizontal bars, one bar per measure side by side.
    HorizontalBar,
    Pie,
    /// One filled line per category, stacked.
    StackedArea,
    /// One bar series per column, stacked per x value.
    StackedBar,
}

impl ChartKind {
    /// Plotly trace type used to draw this kind.
    pub fn trace_type(self) -> &'static str {
        match self {
            ChartKind::ScatterMapbox => "scattermapbox",
            ChartKind::HorizontalBar | ChartKind::StackedBar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::StackedArea => "scatter",
        }
    }
}

/// Aggregate fields bound to each visual channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Channels {
    pub x: Vec<String>,
    pub y: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_name: Option<String>,
}

impl Channels {
    pub fn new(x: &[&str], y: &[&str]) -> Self {
        Self {
            x: x.iter().map(|s| s.to_string()).collect(),
            y: y.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn color(mut self, field: &str) -> Self {
        self.color = Some(field.to_string());
        self
    }

    pub fn hover_name(mut self, field: &str) -> Self {
        self.hover_name = Some(field.to_string());
        self
    }

    /// Every bound field, in channel order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.x
            .iter()
            .chain(&self.y)
            .chain(&self.color)
            .chain(&self.size)
            .chain(&self.hover_name)
            .map(String::as_str)
    }

    /// Fail if any bound field is not a column of `table`.
    pub fn check_against(&self, chart: ChartId, table: &dyn AggregateTable) -> Result<()> {
        let headers = table.headers();
        if let Some(missing) = self.fields().find(|f| !headers.contains(f)) {
            return Err(GtvizError::Schema(format!(
                "chart {chart}: field `{missing}` is not a column of its aggregate ({})",
                headers.join(", ")
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
}

impl Margin {
    pub const fn new(l: u32, r: u32, b: u32, t: u32, pad: u32) -> Self {
        Self { l, r, b, t, pad }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VAnchor {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HAnchor {
    Left,
    Right,
}

/// Corner the legend box is pinned to, in paper coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendAnchor {
    pub yanchor: VAnchor,
    pub y: f64,
    pub xanchor: HAnchor,
    pub x: f64,
}

impl LegendAnchor {
    pub const fn bottom_right() -> Self {
        Self { yanchor: VAnchor::Bottom, y: 0.01, xanchor: HAnchor::Right, x: 0.99 }
    }

    pub const fn top_left() -> Self {
        Self { yanchor: VAnchor::Top, y: 0.99, xanchor: HAnchor::Left, x: 0.01 }
    }

    pub const fn top_right() -> Self {
        Self { yanchor: VAnchor::Top, y: 0.99, xanchor: HAnchor::Right, x: 0.99 }
    }
}

/// Presentation parameters. `None` leaves the renderer's default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margin: Option<Margin>,
    pub legend: Option<LegendAnchor>,
    pub font_size: Option<u32>,
    pub show_legend: bool,
    pub zoom: Option<f64>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            margin: None,
            legend: None,
            font_size: None,
            show_legend: true,
            zoom: None,
        }
    }
}

impl ChartStyle {
    /// Compact card: 400×350, no outer margin, 9pt font.
    pub fn card(legend: LegendAnchor) -> Self {
        Self {
            width: Some(400),
            height: Some(350),
            margin: Some(Margin::new(0, 0, 0, 0, 3)),
            legend: Some(legend),
            font_size: Some(9),
            ..Default::default()
        }
    }
}

/// A finished chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    pub channels: Channels,
    pub style: ChartStyle,
    pub figure: Figure,
}
