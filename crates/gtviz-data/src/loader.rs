//! Incident CSV loader.

use std::path::Path;

use csv::StringRecord;
use gtviz_common::{GtvizError, Result};
use gtviz_config::{ColumnConfig, DataConfig, SourceEncoding};
use tracing::{debug, info};

use crate::incident::{Incident, IncidentTable};
use crate::schema::{ColumnMap, Field};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load the whole source file named by `config`.
pub fn load_incidents(config: &DataConfig) -> Result<IncidentTable> {
    let path = config.source_path.as_path();
    info!("Loading incidents from {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| GtvizError::from_io(path, e))?;
    let text = decode(&bytes, config.encoding)?;
    let delimiter = u8::try_from(config.delimiter).map_err(|_| {
        GtvizError::Config(format!("delimiter {:?} is not a single byte", config.delimiter))
    })?;

    let table = parse_incidents(&text, delimiter, &config.columns)?;
    info!(
        "Loaded {} incidents ({} columns) from {}",
        table.len(),
        table.column_names().len(),
        file_name(path)
    );
    Ok(table)
}

/// Decode raw file bytes under the configured encoding.
pub fn decode(bytes: &[u8], encoding: SourceEncoding) -> Result<String> {
    match encoding {
        SourceEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            String::from_utf8(bytes.to_vec()).map_err(|e| {
                GtvizError::Encoding(format!(
                    "source is not valid UTF-8 (first bad byte at offset {}); try encoding = \"iso-8859-1\"",
                    e.utf8_error().valid_up_to()
                ))
            })
        }
        // ISO-8859-1 maps each byte to the code point of the same value.
        SourceEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Parse decoded CSV text into a table, validating the typed schema against the header row.
pub fn parse_incidents(text: &str, delimiter: u8, columns: &ColumnConfig) -> Result<IncidentTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let map = ColumnMap::resolve(&headers, columns)?;
    debug!("Resolved {} typed columns out of {}", Field::ALL.len(), headers.len());

    let mut incidents = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
        incidents.push(parse_row(record, &map, columns, line)?);
    }

    Ok(IncidentTable::new(headers, incidents))
}

fn parse_row(record: StringRecord, map: &ColumnMap, columns: &ColumnConfig, line: u64) -> Result<Incident> {
    let cell = |field: Field| record.get(map.index(field)).unwrap_or("").trim();
    let text = |field: Field| cell(field).to_string();

    let year = parse_year(cell(Field::Year)).ok_or_else(|| {
        GtvizError::Schema(format!(
            "line {line}: column `{}` is not an integer year: {:?}",
            Field::Year.source_name(columns),
            cell(Field::Year)
        ))
    })?;
    let float = |field: Field| -> Result<Option<f64>> {
        parse_float(cell(field)).map_err(|raw| {
            GtvizError::Schema(format!(
                "line {line}: column `{}` is not numeric: {raw:?}",
                field.source_name(columns)
            ))
        })
    };

    let latitude = float(Field::Latitude)?;
    let longitude = float(Field::Longitude)?;
    let fatalities = float(Field::Fatalities)?;
    let city = Some(text(Field::City)).filter(|c| !c.is_empty());
    let country = text(Field::Country);
    let region = text(Field::Region);
    let group = text(Field::Group);

    Ok(Incident {
        year,
        country,
        region,
        group,
        latitude,
        longitude,
        city,
        fatalities,
        count: 1,
        record,
    })
}

/// Integer years, also accepting whole floats such as `1970.0`.
fn parse_year(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.fract() == 0.0 && value.abs() <= i32::MAX as f64).then_some(value as i32)
}

/// Blank (or NaN) cells are absent; anything else must be a number.
fn parse_float(raw: &str) -> std::result::Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(raw.to_string()),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "eventid,iyear,country_txt,region_txt,city,latitude,longitude,gname,nkill\n";

    fn parse(body: &str) -> Result<IncidentTable> {
        parse_incidents(&format!("{HEADER}{body}"), b',', &ColumnConfig::default())
    }

    #[test]
    fn test_parse_typed_fields() {
        let table = parse("1,1970,Iraq,Middle East & North Africa,Baghdad,33.3,44.4,Unknown,2\n").unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.incidents()[0];
        assert_eq!(row.year, 1970);
        assert_eq!(row.country, "Iraq");
        assert_eq!(row.group, "Unknown");
        assert_eq!(row.city.as_deref(), Some("Baghdad"));
        assert_eq!(row.latitude, Some(33.3));
        assert_eq!(row.fatalities, Some(2.0));
        assert_eq!(row.count, 1);
        assert_eq!(table.field(0, "eventid"), Some("1"));
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let table = parse("1,1980,Iraq,Middle East & North Africa,,,,Unknown,\n").unwrap();
        let row = &table.incidents()[0];
        assert_eq!(row.city, None);
        assert_eq!(row.latitude, None);
        assert_eq!(row.longitude, None);
        assert_eq!(row.fatalities, None);
    }

    #[test]
    fn test_float_year_accepted() {
        let table = parse("1,1999.0,Iraq,Middle East & North Africa,,,,Unknown,1.0\n").unwrap();
        assert_eq!(table.incidents()[0].year, 1999);
    }

    #[test]
    fn test_bad_year_is_schema_error() {
        let err = parse("1,nineteen,Iraq,Middle East & North Africa,,,,Unknown,1\n").unwrap_err();
        assert!(matches!(err, GtvizError::Schema(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_non_numeric_fatalities_is_schema_error() {
        let err = parse("1,1990,Iraq,Middle East & North Africa,,,,Unknown,many\n").unwrap_err();
        assert!(err.to_string().contains("`nkill`"));
    }

    #[test]
    fn test_missing_column_fails_before_rows() {
        let text = "iyear,country_txt\n1970,Iraq\n";
        let err = parse_incidents(text, b',', &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, GtvizError::Schema(_)));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err = parse("1,1970,Iraq\n").unwrap_err();
        assert!(matches!(err, GtvizError::Csv(_)));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let text = "iyear;country_txt;region_txt;city;latitude;longitude;gname;nkill\n2010;Chad;Sub-Saharan Africa;;;;Boko Haram;4\n";
        let table = parse_incidents(text, b';', &ColumnConfig::default()).unwrap();
        assert_eq!(table.incidents()[0].group, "Boko Haram");
    }

    #[test]
    fn test_decode_latin1_maps_every_byte() {
        let bytes = b"S\xe3o Paulo";
        assert_eq!(decode(bytes, SourceEncoding::Latin1).unwrap(), "São Paulo");
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let bytes = b"\xEF\xBB\xBFiyear";
        assert_eq!(decode(bytes, SourceEncoding::Utf8).unwrap(), "iyear");
    }

    #[test]
    fn test_decode_invalid_utf8_is_encoding_error() {
        let err = decode(b"ab\xe3c", SourceEncoding::Utf8).unwrap_err();
        assert!(matches!(err, GtvizError::Encoding(_)));
        assert!(err.to_string().contains("offset 2"));
    }
}
