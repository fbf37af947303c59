//! Typed incident schema.
//!
//! Each [`Field`] the dashboard reads is bound to a source column by name
//! exactly once, when the header row is seen. Aggregates and charts refer to
//! fields by their canonical names.

use csv::StringRecord;
use gtviz_common::{GtvizError, Result};
use gtviz_config::ColumnConfig;

use crate::incident::Incident;

/// Synthetic per-row event counter, always 1.
pub const COUNT_COLUMN: &str = "count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Country,
    Region,
    Group,
    Latitude,
    Longitude,
    City,
    Fatalities,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Year,
        Field::Country,
        Field::Region,
        Field::Group,
        Field::Latitude,
        Field::Longitude,
        Field::City,
        Field::Fatalities,
    ];

    /// Column name used in aggregate headers and chart channels.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::Year       => "iyear",
            Field::Country    => "country_txt",
            Field::Region     => "region_txt",
            Field::Group      => "gname",
            Field::Latitude   => "latitude",
            Field::Longitude  => "longitude",
            Field::City       => "city",
            Field::Fatalities => "nkill",
        }
    }

    /// Column name this field is read from in the source file.
    pub fn source_name(self, columns: &ColumnConfig) -> &str {
        match self {
            Field::Year       => &columns.year,
            Field::Country    => &columns.country,
            Field::Region     => &columns.region,
            Field::Group      => &columns.group,
            Field::Latitude   => &columns.latitude,
            Field::Longitude  => &columns.longitude,
            Field::City       => &columns.city,
            Field::Fatalities => &columns.fatalities,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Positions of every typed field within a source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 8],
}

impl ColumnMap {
    /// Resolve all fields against `headers`, reporting every missing column at once.
    pub fn resolve(headers: &StringRecord, columns: &ColumnConfig) -> Result<Self> {
        let mut indices = [0usize; 8];
        let mut missing = Vec::new();

        for field in Field::ALL {
            let name = field.source_name(columns);
            match headers.iter().position(|h| h == name) {
                Some(idx) => indices[field.slot()] = idx,
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(GtvizError::Schema(format!(
                "required column(s) missing from source: {}",
                missing.join(", ")
            )));
        }
        Ok(Self { indices })
    }

    pub fn index(&self, field: Field) -> usize {
        self.indices[field.slot()]
    }
}

/// Header row used for tables built in memory rather than read from a file.
pub fn canonical_headers() -> StringRecord {
    Field::ALL.iter().map(|f| f.canonical_name()).collect()
}

/// Render an incident's typed fields as a record aligned with [`canonical_headers`].
pub fn canonical_record(incident: &Incident) -> StringRecord {
    fn opt(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }
    Field::ALL
        .iter()
        .map(|field| match field {
            Field::Year       => incident.year.to_string(),
            Field::Country    => incident.country.clone(),
            Field::Region     => incident.region.clone(),
            Field::Group      => incident.group.clone(),
            Field::Latitude   => opt(incident.latitude),
            Field::Longitude  => opt(incident.longitude),
            Field::City       => incident.city.clone().unwrap_or_default(),
            Field::Fatalities => opt(incident.fatalities),
        })
        .collect()
}
