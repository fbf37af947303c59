//! Yearly fatalities of the leading groups.

use std::collections::HashSet;

use gtviz_config::SeriesRanking;
use gtviz_data::{Field, IncidentTable};

use crate::group::group_totals;
use crate::rank::{is_blank, sort_descending, sum_by_key};
use crate::AggregateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub group: String,
    pub year: i32,
    pub fatalities: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// Selected groups, highest ranked first.
    pub groups: Vec<String>,
    /// Points of the selected groups, ordered by (group, year).
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Points of one group, in year order.
    pub fn points_for<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a SeriesPoint> + 'a {
        self.points.iter().filter(move |p| p.group == group)
    }
}

impl AggregateTable for TimeSeries {
    fn headers(&self) -> Vec<&str> {
        vec![
            Field::Group.canonical_name(),
            Field::Year.canonical_name(),
            Field::Fatalities.canonical_name(),
        ]
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Fatality sum per (group, year), ordered by group then year.
pub fn group_year_sums(table: &IncidentTable) -> Vec<SeriesPoint> {
    sum_by_key(
        table
            .iter()
            .filter(|i| !is_blank(&i.group))
            .map(|i| ((i.group.as_str(), i.year), i.fatalities)),
    )
        .into_iter()
        .map(|((group, year), fatalities)| SeriesPoint { group: group.to_string(), year, fatalities })
        .collect()
}

/// Per-year sums restricted to the `n` top-ranked groups.
///
/// With fewer than `n` groups in the table, all of them are kept.
pub fn top_group_series(table: &IncidentTable, n: usize, ranking: SeriesRanking) -> TimeSeries {
    let points = group_year_sums(table);
    let groups = match ranking {
        SeriesRanking::Total => {
            let mut totals = group_totals(table);
            sort_descending(&mut totals, |g| g.fatalities);
            totals.into_iter().take(n).map(|g| g.group).collect()
        }
        SeriesRanking::PeakYear => {
            let mut by_year: Vec<&SeriesPoint> = points.iter().collect();
            sort_descending(&mut by_year, |p| p.fatalities);
            first_unique(by_year.into_iter().map(|p| p.group.as_str()), n)
        }
    };

    let selected: HashSet<&str> = groups.iter().map(String::as_str).collect();
    let points = points
        .iter()
        .filter(|p| selected.contains(p.group.as_str()))
        .cloned()
        .collect();

    TimeSeries { groups, points }
}

/// The first `n` distinct values, in first-seen order.
fn first_unique<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .take(n)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtviz_test_utils::{table, IncidentBuilder};
    use pretty_assertions::assert_eq;

    fn hit(group: &str, year: i32, killed: f64) -> IncidentBuilder {
        IncidentBuilder::new("X", group).year(year).killed(killed)
    }

    #[test]
    fn test_group_year_sums_ordered_by_key() {
        let t = table(vec![hit("B", 2001, 1.0), hit("A", 2002, 2.0), hit("B", 2000, 3.0), hit("B", 2001, 4.0)]);
        let sums = group_year_sums(&t);
        let keys: Vec<(&str, i32, f64)> = sums.iter().map(|p| (p.group.as_str(), p.year, p.fatalities)).collect();
        assert_eq!(keys, vec![("A", 2002, 2.0), ("B", 2000, 3.0), ("B", 2001, 5.0)]);
    }

    #[test]
    fn test_total_ranking_uses_all_years() {
        // "Steady" never has the single worst year but has the largest total.
        let t = table(vec![
            hit("Steady", 2000, 6.0),
            hit("Steady", 2001, 6.0),
            hit("Spike", 2000, 10.0),
            hit("Small", 2000, 1.0),
        ]);
        let series = top_group_series(&t, 1, SeriesRanking::Total);
        assert_eq!(series.groups, vec!["Steady"]);
        assert_eq!(series.len(), 2);

        let series = top_group_series(&t, 1, SeriesRanking::PeakYear);
        assert_eq!(series.groups, vec!["Spike"]);
    }

    #[test]
    fn test_only_top_groups_survive() {
        let t = table((0..7).flat_map(|g| {
            let name = format!("G{g}");
            vec![hit(&name, 2000, g as f64), hit(&name, 2001, g as f64)]
        }));
        let series = top_group_series(&t, 5, SeriesRanking::Total);
        assert_eq!(series.groups, vec!["G6", "G5", "G4", "G3", "G2"]);
        assert!(series.points.iter().all(|p| series.groups.contains(&p.group)));
        assert_eq!(series.points.len(), 10);
        assert_eq!(series.points[0].group, "G2");
    }

    #[test]
    fn test_fewer_groups_than_limit_keeps_all() {
        let t = table(vec![hit("A", 2000, 1.0), hit("B", 2000, 0.0)]);
        let series = top_group_series(&t, 5, SeriesRanking::Total);
        assert_eq!(series.groups, vec!["A", "B"]);
        assert_eq!(series.points_for("B").count(), 1);
    }

    #[test]
    fn test_blank_group_has_no_series() {
        let t = table(vec![hit("", 2001, 80.0), hit("A", 2001, 1.0)]);
        let series = top_group_series(&t, 5, SeriesRanking::Total);
        assert_eq!(series.groups, vec!["A"]);
        assert!(series.points.iter().all(|p| p.group == "A"));

        let series = top_group_series(&t, 5, SeriesRanking::PeakYear);
        assert_eq!(series.groups, vec!["A"]);
    }

    #[test]
    fn test_empty_table() {
        let series = top_group_series(&table(vec![]), 5, SeriesRanking::Total);
        assert!(series.is_empty());
        assert!(series.groups.is_empty());
        assert_eq!(series.headers(), vec!["gname", "iyear", "nkill"]);
    }
}
