//! Plotly figure JSON (`{ data, layout }`), as consumed by `Plotly.newPlot`.

use serde::Serialize;

use crate::spec::{ChartStyle, LegendAnchor, Margin};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// Column of trace values; absent numbers serialize as `null` gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Values {
    Numbers(Vec<Option<f64>>),
    Integers(Vec<i32>),
    Labels(Vec<String>),
}

impl Values {
    pub fn numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Values::Numbers(values.into_iter().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Values::Numbers(v) => v.len(),
            Values::Integers(v) => v.len(),
            Values::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stackgroup: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsetgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
}

impl Layout {
    /// Layout carrying a chart's presentation parameters.
    pub fn styled(style: &ChartStyle, legend_title: Option<&str>) -> Self {
        let legend = match (style.legend, legend_title) {
            (None, None) => None,
            (anchor, title) => Some(Legend { anchor, title: title.map(Title::new) }),
        };
        Self {
            width: style.width,
            height: style.height,
            margin: style.margin,
            showlegend: style.show_legend,
            legend,
            font: style.font_size.map(|size| Font { size }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    #[serde(flatten)]
    pub anchor: Option<LegendAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self { title: Title::new(text) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub center: Center,
    pub zoom: f64,
    pub style: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trace_omits_unset_fields() {
        let trace = Trace {
            trace_type: "bar",
            name: Some("nkill".into()),
            x: Some(Values::Numbers(vec![Some(1.0), None])),
            y: Some(Values::Labels(vec!["A".into(), "B".into()])),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&trace).unwrap(),
            json!({"type": "bar", "name": "nkill", "x": [1.0, null], "y": ["A", "B"]})
        );
    }

    #[test]
    fn test_styled_layout_flattens_legend_anchor() {
        let style = ChartStyle::card(LegendAnchor::bottom_right());
        let layout = Layout::styled(&style, Some("variable"));
        let v = serde_json::to_value(&layout).unwrap();
        assert_eq!(v["width"], 400);
        assert_eq!(v["height"], 350);
        assert_eq!(v["margin"], json!({"l": 0, "r": 0, "b": 0, "t": 0, "pad": 3}));
        assert_eq!(
            v["legend"],
            json!({"yanchor": "bottom", "y": 0.01, "xanchor": "right", "x": 0.99, "title": {"text": "variable"}})
        );
        assert_eq!(v["font"], json!({"size": 9}));
        assert_eq!(v["showlegend"], true);
    }
}
