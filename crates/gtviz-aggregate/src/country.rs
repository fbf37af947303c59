//! Countries ranked by fatality sum.

use std::collections::BTreeMap;

use gtviz_data::{Field, IncidentTable, COUNT_COLUMN};

use crate::rank::{is_blank, sort_ascending, tail};
use crate::AggregateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct CountryTotal {
    pub country: String,
    pub fatalities: f64,
    /// Number of incidents, i.e. the summed `count` column.
    pub events: u64,
}

/// Ascending by fatalities, so the largest country is the last row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTotals {
    pub rows: Vec<CountryTotal>,
}

impl AggregateTable for CountryTotals {
    fn headers(&self) -> Vec<&str> {
        vec![Field::Country.canonical_name(), Field::Fatalities.canonical_name(), COUNT_COLUMN]
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Sum fatalities and events per country and keep the `n` highest, ascending.
pub fn top_countries(table: &IncidentTable, n: usize) -> CountryTotals {
    let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for incident in table.iter().filter(|i| !is_blank(&i.country)) {
        let entry = sums.entry(incident.country.as_str()).or_insert((0.0, 0));
        entry.0 += incident.fatalities.unwrap_or(0.0);
        entry.1 += u64::from(incident.count);
    }

    let mut rows: Vec<CountryTotal> = sums
        .into_iter()
        .map(|(country, (fatalities, events))| CountryTotal {
            country: country.to_string(),
            fatalities,
            events,
        })
        .collect();
    sort_ascending(&mut rows, |r| r.fatalities);

    CountryTotals { rows: tail(rows, n) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtviz_test_utils::{table, IncidentBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sums_fatalities_and_events() {
        let t = table(vec![
            IncidentBuilder::new("X", "g").killed(2.0),
            IncidentBuilder::new("X", "g").killed(5.0),
            IncidentBuilder::new("X", "g").killed(0.0),
        ]);
        let totals = top_countries(&t, 5);
        assert_eq!(
            totals.rows,
            vec![CountryTotal { country: "X".into(), fatalities: 7.0, events: 3 }]
        );
    }

    #[test]
    fn test_unknown_fatalities_still_count_as_events() {
        let t = table(vec![
            IncidentBuilder::new("Y", "g").unknown_killed(),
            IncidentBuilder::new("Y", "g").killed(1.0),
        ]);
        let row = &top_countries(&t, 5).rows[0];
        assert_eq!(row.fatalities, 1.0);
        assert_eq!(row.events, 2);
    }

    #[test]
    fn test_keeps_highest_n_in_ascending_order() {
        let t = table(
            [("A", 10.0), ("B", 50.0), ("C", 30.0), ("D", 40.0), ("E", 20.0), ("F", 60.0), ("G", 5.0)]
                .into_iter()
                .map(|(c, k)| IncidentBuilder::new(c, "g").killed(k)),
        );
        let totals = top_countries(&t, 5);
        let names: Vec<&str> = totals.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["E", "C", "D", "B", "F"]);
    }

    #[test]
    fn test_ties_keep_alphabetical_order() {
        let t = table(
            ["Delta", "Alpha", "Charlie", "Bravo"]
                .into_iter()
                .map(|c| IncidentBuilder::new(c, "g").killed(1.0)),
        );
        let totals = top_countries(&t, 3);
        let names: Vec<&str> = totals.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Bravo", "Charlie", "Delta"]);
    }

    #[test]
    fn test_blank_country_forms_no_row() {
        let t = table(vec![
            IncidentBuilder::new("", "g").killed(50.0),
            IncidentBuilder::new("Iraq", "g").killed(3.0),
            IncidentBuilder::new("Iraq", "g").unknown_killed(),
        ]);
        let totals = top_countries(&t, 5);
        assert_eq!(
            totals.rows,
            vec![CountryTotal { country: "Iraq".into(), fatalities: 3.0, events: 2 }]
        );
    }

    #[test]
    fn test_empty_table_has_headers_and_no_rows() {
        let totals = top_countries(&table(vec![]), 5);
        assert!(totals.is_empty());
        assert_eq!(totals.headers(), vec!["country_txt", "nkill", "count"]);
    }
}
