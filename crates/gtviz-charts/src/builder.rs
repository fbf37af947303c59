//! One builder per aggregate. Builders read their aggregate and never mutate it.

use gtviz_aggregate::{Aggregates, AggregateTable, CountryTotals, GroupTotals, MapPoints, PivotMatrix, TimeSeries};
use gtviz_common::{GtvizError, Result};
use gtviz_data::{Field, COUNT_COLUMN};
use tracing::{debug, warn};

use crate::figure::{Axis, Center, Figure, Layout, Line, Mapbox, Marker, Trace, Values};
use crate::palette;
use crate::spec::{Channels, ChartId, ChartKind, ChartSpec, ChartStyle, LegendAnchor, Margin};

const MAP_ZOOM: f64 = 1.0;
const MAP_STYLE: &str = "basic";
/// Legend title plotly gives wide-form bars.
const VARIABLE_TITLE: &str = "variable";
const VALUE_TITLE: &str = "value";

fn warn_if_empty(id: ChartId, table: &dyn AggregateTable) {
    if table.is_empty() {
        warn!("Chart {} has no data to plot", id);
    }
}

/// Geographic scatter: one trace per group, hover label is the city.
pub fn incident_map_chart(points: &MapPoints) -> Result<ChartSpec> {
    let id = ChartId::ScatterMap;
    let channels = Channels::new(
        &[Field::Longitude.canonical_name()],
        &[Field::Latitude.canonical_name()],
    )
    .color(Field::Group.canonical_name())
    .hover_name(Field::City.canonical_name());
    channels.check_against(id, points)?;
    warn_if_empty(id, points);

    let data = points
        .groups()
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let rows: Vec<_> = points.rows.iter().filter(|r| r.group == group).collect();
            Trace {
                trace_type: ChartKind::ScatterMapbox.trace_type(),
                name: Some(group.to_string()),
                lat: Some(rows.iter().map(|r| r.latitude).collect()),
                lon: Some(rows.iter().map(|r| r.longitude).collect()),
                hovertext: Some(rows.iter().map(|r| r.city.clone().unwrap_or_default()).collect()),
                mode: Some("markers"),
                legendgroup: Some(group.to_string()),
                marker: Some(Marker { color: palette::color(i).to_string() }),
                ..Default::default()
            }
        })
        .collect();

    let style = ChartStyle { show_legend: false, zoom: Some(MAP_ZOOM), ..Default::default() };
    let (lat, lon) = points.center().unwrap_or((0.0, 0.0));
    let mut layout = Layout::styled(&style, None);
    layout.mapbox = Some(Mapbox { center: Center { lat, lon }, zoom: MAP_ZOOM, style: MAP_STYLE });

    Ok(ChartSpec {
        id,
        kind: ChartKind::ScatterMapbox,
        channels,
        style,
        figure: Figure { data, layout },
    })
}

/// Horizontal bars of fatalities and event count per country, side by side.
pub fn country_bar_chart(totals: &CountryTotals) -> Result<ChartSpec> {
    let id = ChartId::BarChart;
    let fatalities = Field::Fatalities.canonical_name();
    let country = Field::Country.canonical_name();
    let channels = Channels::new(&[fatalities, COUNT_COLUMN], &[country]);
    channels.check_against(id, totals)?;
    warn_if_empty(id, totals);

    let countries = Values::Labels(totals.rows.iter().map(|r| r.country.clone()).collect());
    let measures = [
        (fatalities, Values::numbers(totals.rows.iter().map(|r| r.fatalities))),
        (COUNT_COLUMN, Values::numbers(totals.rows.iter().map(|r| r.events as f64))),
    ];
    let data = measures
        .into_iter()
        .enumerate()
        .map(|(i, (name, values))| Trace {
            trace_type: ChartKind::HorizontalBar.trace_type(),
            name: Some(name.to_string()),
            x: Some(values),
            y: Some(countries.clone()),
            orientation: Some("h"),
            offsetgroup: Some(name.to_string()),
            legendgroup: Some(name.to_string()),
            marker: Some(Marker { color: palette::color(i).to_string() }),
            ..Default::default()
        })
        .collect();

    let style = ChartStyle::card(LegendAnchor::bottom_right());
    let mut layout = Layout::styled(&style, Some(VARIABLE_TITLE));
    layout.barmode = Some("group");
    layout.xaxis = Some(Axis::titled(VALUE_TITLE));
    layout.yaxis = Some(Axis::titled(country));

    Ok(ChartSpec {
        id,
        kind: ChartKind::HorizontalBar,
        channels,
        style,
        figure: Figure { data, layout },
    })
}

/// Share of fatalities per group.
pub fn group_pie_chart(totals: &GroupTotals) -> Result<ChartSpec> {
    let id = ChartId::PieChart;
    let channels = Channels::new(&[Field::Group.canonical_name()], &[Field::Fatalities.canonical_name()]);
    channels.check_against(id, totals)?;
    warn_if_empty(id, totals);

    let data = vec![Trace {
        trace_type: ChartKind::Pie.trace_type(),
        labels: Some(totals.names()),
        values: Some(totals.rows.iter().map(|r| r.fatalities).collect()),
        ..Default::default()
    }];

    let style = ChartStyle {
        width: Some(250),
        height: Some(250),
        margin: Some(Margin::new(50, 0, 0, 0, 3)),
        legend: Some(LegendAnchor::bottom_right()),
        font_size: Some(9),
        show_legend: false,
        zoom: None,
    };
    let layout = Layout::styled(&style, None);

    Ok(ChartSpec {
        id,
        kind: ChartKind::Pie,
        channels,
        style,
        figure: Figure { data, layout },
    })
}

/// Yearly fatalities of each series group, stacked as filled areas.
pub fn series_area_chart(series: &TimeSeries) -> Result<ChartSpec> {
    let id = ChartId::LineChart;
    let year = Field::Year.canonical_name();
    let fatalities = Field::Fatalities.canonical_name();
    let group = Field::Group.canonical_name();
    let channels = Channels::new(&[year], &[fatalities]).color(group);
    channels.check_against(id, series)?;
    warn_if_empty(id, series);

    let data = series
        .groups
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let points: Vec<_> = series.points_for(name).collect();
            let color = palette::color(i).to_string();
            Trace {
                trace_type: ChartKind::StackedArea.trace_type(),
                name: Some(name.clone()),
                x: Some(Values::Integers(points.iter().map(|p| p.year).collect())),
                y: Some(Values::numbers(points.iter().map(|p| p.fatalities))),
                mode: Some("lines"),
                stackgroup: Some("1"),
                legendgroup: Some(name.clone()),
                line: Some(Line { color: color.clone() }),
                marker: Some(Marker { color }),
                ..Default::default()
            }
        })
        .collect();

    let style = ChartStyle::card(LegendAnchor::top_left());
    let mut layout = Layout::styled(&style, Some(group));
    layout.xaxis = Some(Axis::titled(year));
    layout.yaxis = Some(Axis::titled(fatalities));

    Ok(ChartSpec {
        id,
        kind: ChartKind::StackedArea,
        channels,
        style,
        figure: Figure { data, layout },
    })
}

/// Per-country fatalities stacked by group, one bar series per group column.
pub fn matrix_bar_chart(matrix: &PivotMatrix) -> Result<ChartSpec> {
    let id = ChartId::StackedChart;
    check_matrix_shape(matrix)?;
    let country = Field::Country.canonical_name();
    let groups: Vec<&str> = matrix.groups.iter().map(String::as_str).collect();
    let channels = Channels::new(&[country], &groups);
    channels.check_against(id, matrix)?;
    warn_if_empty(id, matrix);

    let countries = Values::Labels(matrix.countries.clone());
    let data = matrix
        .groups
        .iter()
        .enumerate()
        .map(|(g, name)| Trace {
            trace_type: ChartKind::StackedBar.trace_type(),
            name: Some(name.clone()),
            x: Some(countries.clone()),
            y: Some(Values::Numbers(matrix.cells.iter().map(|row| row[g]).collect())),
            legendgroup: Some(name.clone()),
            marker: Some(Marker { color: palette::color(g).to_string() }),
            ..Default::default()
        })
        .collect();

    let style = ChartStyle::card(LegendAnchor::top_right());
    let mut layout = Layout::styled(&style, Some(VARIABLE_TITLE));
    layout.barmode = Some("relative");
    layout.xaxis = Some(Axis::titled(country));
    layout.yaxis = Some(Axis::titled(VALUE_TITLE));

    Ok(ChartSpec {
        id,
        kind: ChartKind::StackedBar,
        channels,
        style,
        figure: Figure { data, layout },
    })
}

fn check_matrix_shape(matrix: &PivotMatrix) -> Result<()> {
    let rows = matrix.countries.len();
    if matrix.cells.len() != rows || matrix.totals.len() != rows {
        return Err(GtvizError::Schema(format!(
            "chart {}: matrix has {} countries but {} cell rows and {} totals",
            ChartId::StackedChart,
            rows,
            matrix.cells.len(),
            matrix.totals.len()
        )));
    }
    let width = matrix.groups.len();
    if let Some((r, row)) = matrix.cells.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(GtvizError::Schema(format!(
            "chart {}: row {} ({}) has {} cells, expected {}",
            ChartId::StackedChart,
            r,
            matrix.countries[r],
            row.len(),
            width
        )));
    }
    Ok(())
}

/// The five dashboard charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub map: ChartSpec,
    pub bar: ChartSpec,
    pub pie: ChartSpec,
    pub line: ChartSpec,
    pub stacked: ChartSpec,
}

impl ChartSet {
    pub fn get(&self, id: ChartId) -> &ChartSpec {
        match id {
            ChartId::ScatterMap   => &self.map,
            ChartId::BarChart     => &self.bar,
            ChartId::PieChart     => &self.pie,
            ChartId::LineChart    => &self.line,
            ChartId::StackedChart => &self.stacked,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        ChartId::ALL.into_iter().map(move |id| self.get(id))
    }
}

pub fn build_charts(aggregates: &Aggregates) -> Result<ChartSet> {
    let charts = ChartSet {
        map: incident_map_chart(&aggregates.map)?,
        bar: country_bar_chart(&aggregates.top_countries)?,
        pie: group_pie_chart(&aggregates.top_groups)?,
        line: series_area_chart(&aggregates.series)?,
        stacked: matrix_bar_chart(&aggregates.matrix)?,
    };
    for chart in charts.iter() {
        debug!("Built {} ({} traces)", chart.id, chart.figure.data.len());
    }
    Ok(charts)
}
