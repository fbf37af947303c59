//! Points for the incident map.
//!
//! Drawn from the unfiltered table, unlike every other view.

use gtviz_data::{Field, IncidentTable};

use crate::AggregateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub group: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapPoints {
    pub rows: Vec<MapPoint>,
}

impl MapPoints {
    /// Groups in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.group.as_str()) {
                seen.push(row.group.as_str());
            }
        }
        seen
    }

    /// Mean of the present coordinates, `None` if there are none.
    pub fn center(&self) -> Option<(f64, f64)> {
        let located: Vec<(f64, f64)> = self
            .rows
            .iter()
            .filter_map(|r| Some((r.latitude?, r.longitude?)))
            .collect();
        if located.is_empty() {
            return None;
        }
        let n = located.len() as f64;
        let (lat, lon) = located
            .iter()
            .fold((0.0, 0.0), |(a, b), (lat, lon)| (a + lat, b + lon));
        Some((lat / n, lon / n))
    }
}

impl AggregateTable for MapPoints {
    fn headers(&self) -> Vec<&str> {
        vec![
            Field::Latitude.canonical_name(),
            Field::Longitude.canonical_name(),
            Field::City.canonical_name(),
            Field::Group.canonical_name(),
        ]
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The first `n` incidents of `table`, in source order.
pub fn map_points(table: &IncidentTable, n: usize) -> MapPoints {
    let rows = table
        .iter()
        .take(n)
        .map(|i| MapPoint {
            latitude: i.latitude,
            longitude: i.longitude,
            city: i.city.clone(),
            group: i.group.clone(),
        })
        .collect();
    MapPoints { rows }
}
