//! In-memory incident rows.

use csv::StringRecord;

use crate::schema::{canonical_headers, COUNT_COLUMN};

/// One incident. Typed fields are parsed once at load; `record` keeps every
/// original column.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub year: i32,
    pub country: String,
    pub region: String,
    pub group: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    /// Absent when the source cell is blank.
    pub fatalities: Option<f64>,
    /// The synthetic event counter.
    pub count: u32,
    pub record: StringRecord,
}

/// Immutable table of incidents sharing one header row.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentTable {
    headers: StringRecord,
    incidents: Vec<Incident>,
}

impl IncidentTable {
    pub fn new(headers: StringRecord, incidents: Vec<Incident>) -> Self {
        Self { headers, incidents }
    }

    /// Table over in-memory incidents whose records follow the canonical header row.
    pub fn from_incidents(incidents: Vec<Incident>) -> Self {
        Self::new(canonical_headers(), incidents)
    }

    /// Same headers, different rows.
    pub fn with_rows(&self, incidents: Vec<Incident>) -> Self {
        Self::new(self.headers.clone(), incidents)
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Source columns followed by the synthetic `count` column.
    pub fn column_names(&self) -> Vec<&str> {
        self.headers.iter().chain(std::iter::once(COUNT_COLUMN)).collect()
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Incident> {
        self.incidents.iter()
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Raw value of any column (source or `count`) for a row.
    pub fn field(&self, row: usize, column: &str) -> Option<&str> {
        let incident = self.incidents.get(row)?;
        if column == COUNT_COLUMN && !self.headers.iter().any(|h| h == COUNT_COLUMN) {
            return Some("1");
        }
        let idx = self.headers.iter().position(|h| h == column)?;
        incident.record.get(idx)
    }

    /// The first `n` rows, in source order.
    pub fn head(&self, n: usize) -> Self {
        self.with_rows(self.incidents.iter().take(n).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a IncidentTable {
    type Item = &'a Incident;
    type IntoIter = std::slice::Iter<'a, Incident>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::canonical_record;

    fn incident(country: &str, fatalities: Option<f64>) -> Incident {
        let mut i = Incident {
            year: 2001,
            country: country.to_string(),
            region: "Western Europe".to_string(),
            group: "Unknown".to_string(),
            latitude: Some(1.5),
            longitude: None,
            city: Some("Brest".to_string()),
            fatalities,
            count: 1,
            record: StringRecord::new(),
        };
        i.record = canonical_record(&i);
        i
    }

    #[test]
    fn test_column_names_include_count() {
        let table = IncidentTable::from_incidents(vec![]);
        let names = table.column_names();
        assert_eq!(names.last(), Some(&"count"));
        assert!(names.contains(&"gname"));
    }

    #[test]
    fn test_field_lookup() {
        let table = IncidentTable::from_incidents(vec![incident("France", Some(3.0)), incident("Spain", None)]);
        assert_eq!(table.field(0, "country_txt"), Some("France"));
        assert_eq!(table.field(0, "nkill"), Some("3"));
        assert_eq!(table.field(1, "nkill"), Some(""));
        assert_eq!(table.field(1, "count"), Some("1"));
        assert_eq!(table.field(1, "no_such_column"), None);
        assert_eq!(table.field(2, "country_txt"), None);
    }

    #[test]
    fn test_head_keeps_order() {
        let table = IncidentTable::from_incidents(vec![
            incident("A", None),
            incident("B", None),
            incident("C", None),
        ]);
        let head = table.head(2);
        let countries: Vec<&str> = head.iter().map(|i| i.country.as_str()).collect();
        assert_eq!(countries, vec!["A", "B"]);
        assert_eq!(table.head(10).len(), 3);
    }
}
