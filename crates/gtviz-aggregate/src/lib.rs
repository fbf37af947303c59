//! gtviz-aggregate: The derived tables behind each dashboard chart.
//!
//! Every function here is a pure function of an [`IncidentTable`] snapshot:
//!   - top countries by fatality sum (horizontal bar)
//!   - top perpetrator groups by fatality sum (pie)
//!   - yearly fatalities of the leading groups (stacked area)
//!   - country × group fatality matrix (stacked bar)
//!   - raw points for the map, drawn from the unfiltered table
//!
//! Grouping keys are visited in sorted order and every ranking uses a stable
//! sort, so ties keep that order. Absent fatality counts add nothing to a sum.

pub mod rank;
pub mod country;
pub mod group;
pub mod series;
pub mod matrix;
pub mod map;

use gtviz_config::AggregationConfig;
use gtviz_data::IncidentTable;
use tracing::{debug, warn};

pub use country::{top_countries, CountryTotal, CountryTotals};
pub use group::{group_totals, top_groups, GroupTotal, GroupTotals};
pub use map::{map_points, MapPoint, MapPoints};
pub use matrix::{country_group_sums, stacked_matrix, CountryGroupSum, PivotMatrix};
pub use series::{top_group_series, SeriesPoint, TimeSeries};

/// Column name of the row-wise sum in the pivoted matrix.
pub const TOTAL_COLUMN: &str = "total";

/// A derived table: named columns and a row count.
pub trait AggregateTable {
    /// Column names, key columns first where the shape allows.
    fn headers(&self) -> Vec<&str>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All five derived tables, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub top_countries: CountryTotals,
    pub top_groups: GroupTotals,
    pub series: TimeSeries,
    pub matrix: PivotMatrix,
    pub map: MapPoints,
}

/// Run every aggregation. `region` feeds the first four views, `full` the map.
pub fn aggregate_all(full: &IncidentTable, region: &IncidentTable, config: &AggregationConfig) -> Aggregates {
    let top_countries = top_countries(region, config.top_countries);
    let top_groups = top_groups(region, config.top_groups);
    let series = top_group_series(region, config.series_groups, config.series_ranking);
    let matrix = stacked_matrix(region, &top_groups, config.matrix_countries);
    let map = map_points(full, config.map_rows);

    let aggregates = Aggregates { top_countries, top_groups, series, matrix, map };
    for (name, table) in aggregates.tables() {
        if table.is_empty() {
            warn!("Aggregate {} is empty", name);
        } else {
            debug!("Aggregate {}: {} rows", name, table.len());
        }
    }
    aggregates
}

impl Aggregates {
    /// Every aggregate with a short name, in chart order.
    pub fn tables(&self) -> [(&'static str, &dyn AggregateTable); 5] {
        [
            ("map", &self.map),
            ("top_countries", &self.top_countries),
            ("top_groups", &self.top_groups),
            ("series", &self.series),
            ("matrix", &self.matrix),
        ]
    }
}
