//! Static page structure: navbar and a grid of chart slots.

use gtviz_charts::{ChartId, ChartSet};
use gtviz_common::{GtvizError, Result};
use serde::Serialize;

pub const BRAND: &str = "Global Terrorism Visualization";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn placeholder(label: &str) -> Self {
        Self { label: label.to_string(), href: "#".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    Link(NavLink),
    Dropdown {
        label: String,
        header: Option<String>,
        items: Vec<NavLink>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navbar {
    pub brand: String,
    pub brand_href: String,
    /// Bootstrap background colour name.
    pub color: String,
    pub dark: bool,
    pub items: Vec<NavItem>,
}

/// Grid column. `width` is out of 12; `None` spans the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub width: Option<u8>,
    pub chart: Option<ChartId>,
}

impl Column {
    pub fn full(chart: ChartId) -> Self {
        Self { width: None, chart: Some(chart) }
    }

    pub fn chart(width: u8, chart: ChartId) -> Self {
        Self { width: Some(width), chart: Some(chart) }
    }

    pub fn empty(width: u8) -> Self {
        Self { width: Some(width), chart: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub title: String,
    pub navbar: Navbar,
    pub rows: Vec<Row>,
}

impl PageLayout {
    /// Map across the top; bar and pie after an empty slot; area and stacked bar below.
    pub fn dashboard() -> Self {
        let navbar = Navbar {
            brand: BRAND.to_string(),
            brand_href: "#".to_string(),
            color: "dark".to_string(),
            dark: true,
            items: vec![
                NavItem::Link(NavLink::placeholder("Home")),
                NavItem::Dropdown {
                    label: "More".to_string(),
                    header: Some("More pages".to_string()),
                    items: vec![NavLink::placeholder("Page 2"), NavLink::placeholder("Page 3")],
                },
            ],
        };
        let rows = vec![
            Row { columns: vec![Column::full(ChartId::ScatterMap)] },
            Row {
                columns: vec![
                    Column::empty(4),
                    Column::chart(4, ChartId::BarChart),
                    Column::chart(4, ChartId::PieChart),
                ],
            },
            Row {
                columns: vec![
                    Column::chart(4, ChartId::LineChart),
                    Column::chart(4, ChartId::StackedChart),
                ],
            },
        ];
        Self { title: BRAND.to_string(), navbar, rows }
    }

    /// Charts referenced by the grid, in reading order.
    pub fn chart_ids(&self) -> Vec<ChartId> {
        self.rows
            .iter()
            .flat_map(|row| &row.columns)
            .filter_map(|col| col.chart)
            .collect()
    }

    /// Every chart placed exactly once.
    pub fn validate(&self) -> Result<()> {
        let placed = self.chart_ids();
        for id in ChartId::ALL {
            match placed.iter().filter(|p| **p == id).count() {
                1 => {}
                0 => return Err(GtvizError::Schema(format!("layout has no slot for chart {id}"))),
                n => return Err(GtvizError::Schema(format!("layout places chart {id} {n} times"))),
            }
        }
        if let Some(col) = self.rows.iter().flat_map(|r| &r.columns).find(|c| matches!(c.width, Some(w) if w == 0 || w > 12)) {
            return Err(GtvizError::Schema(format!("column width {:?} is outside 1..=12", col.width)));
        }
        Ok(())
    }
}

/// The assembled page: layout plus the charts it places.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub layout: PageLayout,
    pub charts: ChartSet,
}

pub fn assemble_layout(charts: ChartSet) -> Result<Dashboard> {
    let layout = PageLayout::dashboard();
    layout.validate()?;
    Ok(Dashboard { layout, charts })
}
