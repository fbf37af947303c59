//! Fixtures shared by the gtviz test suites.

use std::path::{Path, PathBuf};

use gtviz_config::DataConfig;
use gtviz_data::schema::canonical_record;
use gtviz_data::{Incident, IncidentTable};

pub const MENA: &str = "Middle East & North Africa";
pub const SOUTH_ASIA: &str = "South Asia";

/// Builder for a single incident; unset fields get plausible defaults.
#[derive(Debug, Clone)]
pub struct IncidentBuilder {
    year: i32,
    country: String,
    region: String,
    group: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    fatalities: Option<f64>,
}

impl IncidentBuilder {
    pub fn new(country: &str, group: &str) -> Self {
        Self {
            year: 2000,
            country: country.to_string(),
            region: MENA.to_string(),
            group: group.to_string(),
            latitude: Some(30.0),
            longitude: Some(40.0),
            city: Some("Unknown".to_string()),
            fatalities: Some(0.0),
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn killed(mut self, n: f64) -> Self {
        self.fatalities = Some(n);
        self
    }

    /// Blank fatality cell.
    pub fn unknown_killed(mut self) -> Self {
        self.fatalities = None;
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn no_coordinates(mut self) -> Self {
        self.latitude = None;
        self.longitude = None;
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn build(self) -> Incident {
        let mut incident = Incident {
            year: self.year,
            country: self.country,
            region: self.region,
            group: self.group,
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            fatalities: self.fatalities,
            count: 1,
            record: csv::StringRecord::new(),
        };
        incident.record = canonical_record(&incident);
        incident
    }
}

/// Table over built incidents, in the given order.
pub fn table(rows: impl IntoIterator<Item = IncidentBuilder>) -> IncidentTable {
    IncidentTable::from_incidents(rows.into_iter().map(IncidentBuilder::build).collect())
}

/// GTD-shaped CSV text: an `eventid` column plus every typed column.
pub fn csv_fixture(rows: &[IncidentBuilder]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "eventid", "iyear", "country_txt", "region_txt", "city",
            "latitude", "longitude", "gname", "nkill",
        ])
        .expect("write header");

    fn opt(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }

    for (i, row) in rows.iter().enumerate() {
        writer
            .write_record([
                (197000000001 + i as u64).to_string(),
                row.year.to_string(),
                row.country.clone(),
                row.region.clone(),
                row.city.clone().unwrap_or_default(),
                opt(row.latitude),
                opt(row.longitude),
                row.group.clone(),
                opt(row.fatalities),
            ])
            .expect("write row");
    }
    String::from_utf8(writer.into_inner().expect("flush csv")).expect("utf-8 csv")
}

/// Write `contents` into `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// A temp dir holding `incidents.csv` and `.mapbox_token`, and a data config pointing at them.
pub fn fixture_dir(rows: &[IncidentBuilder], region: &str) -> (tempfile::TempDir, DataConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let source_path = write_fixture(dir.path(), "incidents.csv", csv_fixture(rows));
    let token_path = write_fixture(dir.path(), ".mapbox_token", "pk.test-token\n");
    let config = DataConfig {
        source_path,
        token_path,
        region: region.to_string(),
        ..DataConfig::default()
    };
    (dir, config)
}
