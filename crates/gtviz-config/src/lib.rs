//! Configuration loading for gtviz.
//! Reads gtviz.toml from the current directory or the path in the GTVIZ_CONFIG env var.
//! Every field has a default, so a missing default file yields the stock dashboard.

use std::path::{Path, PathBuf};

use gtviz_common::{GtvizError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "GTVIZ_CONFIG";

/// Config file looked up in the working directory when `GTVIZ_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "gtviz.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

// ── Data source ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    #[serde(default)]
    pub encoding: SourceEncoding,
    /// Plain-text access token for the map tile provider.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    /// The single region every region-dependent view is filtered to.
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub columns: ColumnConfig,
}

fn default_source_path() -> PathBuf { PathBuf::from("globalterrorismdb_0718dist.csv") }
fn default_token_path()  -> PathBuf { PathBuf::from(".mapbox_token") }
fn default_region()      -> String  { "Middle East & North Africa".to_string() }
fn default_delimiter()   -> char    { ',' }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            encoding: SourceEncoding::default(),
            token_path: default_token_path(),
            region: default_region(),
            delimiter: default_delimiter(),
            columns: ColumnConfig::default(),
        }
    }
}

/// Text encoding of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceEncoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[default]
    #[serde(rename = "iso-8859-1", alias = "latin1", alias = "latin-1")]
    Latin1,
}

/// Source column name for each typed incident field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_year_col")]
    pub year: String,
    #[serde(default = "default_country_col")]
    pub country: String,
    #[serde(default = "default_region_col")]
    pub region: String,
    #[serde(default = "default_group_col")]
    pub group: String,
    #[serde(default = "default_latitude_col")]
    pub latitude: String,
    #[serde(default = "default_longitude_col")]
    pub longitude: String,
    #[serde(default = "default_city_col")]
    pub city: String,
    #[serde(default = "default_fatalities_col")]
    pub fatalities: String,
}

fn default_year_col()       -> String { "iyear".to_string() }
fn default_country_col()    -> String { "country_txt".to_string() }
fn default_region_col()     -> String { "region_txt".to_string() }
fn default_group_col()      -> String { "gname".to_string() }
fn default_latitude_col()   -> String { "latitude".to_string() }
fn default_longitude_col()  -> String { "longitude".to_string() }
fn default_city_col()       -> String { "city".to_string() }
fn default_fatalities_col() -> String { "nkill".to_string() }

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            year: default_year_col(),
            country: default_country_col(),
            region: default_region_col(),
            group: default_group_col(),
            latitude: default_latitude_col(),
            longitude: default_longitude_col(),
            city: default_city_col(),
            fatalities: default_fatalities_col(),
        }
    }
}

// ── Aggregation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,
    #[serde(default = "default_top_groups")]
    pub top_groups: usize,
    #[serde(default = "default_series_groups")]
    pub series_groups: usize,
    #[serde(default = "default_matrix_countries")]
    pub matrix_countries: usize,
    #[serde(default = "default_map_rows")]
    pub map_rows: usize,
    #[serde(default)]
    pub series_ranking: SeriesRanking,
}

fn default_top_countries()    -> usize { 5 }
fn default_top_groups()       -> usize { 9 }
fn default_series_groups()    -> usize { 5 }
fn default_matrix_countries() -> usize { 10 }
fn default_map_rows()         -> usize { 1000 }

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_countries: default_top_countries(),
            top_groups: default_top_groups(),
            series_groups: default_series_groups(),
            matrix_countries: default_matrix_countries(),
            map_rows: default_map_rows(),
            series_ranking: SeriesRanking::default(),
        }
    }
}

/// How the time-series view picks its groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRanking {
    /// Rank groups by their fatality sum across all years.
    #[default]
    Total,
    /// Rank groups by their single worst year.
    PeakYear,
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Development mode: live template reload and browser auto-refresh.
    #[serde(default = "bool_true")]
    pub debug: bool,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
}

fn default_host()          -> String  { "127.0.0.1".to_string() }
fn default_port()          -> u16     { 8050 }
fn bool_true()             -> bool    { true }
fn default_templates_dir() -> PathBuf { PathBuf::from("crates/gtviz-web/templates") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: bool_true(),
            templates_dir: default_templates_dir(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}


impl Config {
    /// Load configuration from gtviz.toml, then apply env overrides.
    /// Checks the GTVIZ_CONFIG env var first, then the current directory.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load_from(DEFAULT_CONFIG_FILE)?,
            Err(_) => {
                info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file. A missing file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GtvizError::Config(format!(
                "Config file not found: {}\nCopy gtviz.example.toml to gtviz.toml and edit it.",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| GtvizError::from_io(path, e))?;
        debug!("Read config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GtvizError::Config(e.to_string()))
    }

    /// Apply `GTVIZ_*` overrides. `lookup` resolves a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("GTVIZ_DATA_PATH") {
            self.data.source_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("GTVIZ_TOKEN_PATH") {
            self.data.token_path = PathBuf::from(path);
        }
        if let Some(region) = lookup("GTVIZ_REGION") {
            self.data.region = region;
        }
        if let Some(host) = lookup("GTVIZ_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GTVIZ_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| GtvizError::Config(format!("GTVIZ_PORT is not a valid port: {port:?}")))?;
        }
        if let Some(debug) = lookup("GTVIZ_DEBUG") {
            self.server.debug = parse_flag(&debug)
                .ok_or_else(|| GtvizError::Config(format!("GTVIZ_DEBUG is not a boolean: {debug:?}")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.region.trim().is_empty() {
            return Err(GtvizError::Config("data.region must not be empty".into()));
        }
        if !self.data.delimiter.is_ascii() {
            return Err(GtvizError::Config(format!(
                "data.delimiter must be a single ASCII character, got {:?}",
                self.data.delimiter
            )));
        }
        let agg = &self.aggregation;
        let limits = [
            ("top_countries", agg.top_countries),
            ("top_groups", agg.top_groups),
            ("series_groups", agg.series_groups),
            ("matrix_countries", agg.matrix_countries),
            ("map_rows", agg.map_rows),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, n)| *n == 0) {
            return Err(GtvizError::Config(format!("aggregation.{name} must be at least 1")));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
