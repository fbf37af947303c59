//! Properties every aggregate must hold for a region-filtered table.

use std::collections::BTreeMap;

use gtviz_aggregate::{aggregate_all, top_countries, AggregateTable};
use gtviz_config::{AggregationConfig, ColumnConfig};
use gtviz_data::{filter_region, parse_incidents};
use gtviz_test_utils::{csv_fixture, table, IncidentBuilder, MENA, SOUTH_ASIA};
use pretty_assertions::assert_eq;

/// A deterministic mixed-region table with uneven group and country sizes.
fn dataset() -> gtviz_data::IncidentTable {
    let countries = ["Iraq", "Syria", "Yemen", "Libya", "Egypt", "Lebanon", "Israel", "Turkey"];
    let groups = ["ISIL", "Hamas", "AQAP", "Houthis", "PKK", "Unknown", "Al-Nusra", "Hezbollah", "Ansar", "Fatah", "JAI"];
    let mut rows = Vec::new();
    for i in 0..400u32 {
        let country = countries[(i * 7 % 8) as usize];
        let group = groups[(i * 5 % 11) as usize];
        let year = 1990 + (i % 25) as i32;
        let mut b = IncidentBuilder::new(country, group).year(year);
        b = match i % 6 {
            0 => b.unknown_killed(),
            k => b.killed(((i * 13 + k) % 17) as f64),
        };
        if i % 9 == 0 {
            b = b.region(SOUTH_ASIA);
        }
        rows.push(b);
    }
    table(rows)
}

fn country_sums(t: &gtviz_data::IncidentTable) -> BTreeMap<String, f64> {
    let mut sums = BTreeMap::new();
    for i in t {
        *sums.entry(i.country.clone()).or_insert(0.0) += i.fatalities.unwrap_or(0.0);
    }
    sums
}

fn group_sums(t: &gtviz_data::IncidentTable) -> BTreeMap<String, f64> {
    let mut sums = BTreeMap::new();
    for i in t {
        *sums.entry(i.group.clone()).or_insert(0.0) += i.fatalities.unwrap_or(0.0);
    }
    sums
}

#[test]
fn test_top_countries_is_a_dominating_subset() {
    let full = dataset();
    let region = filter_region(&full, MENA);
    let agg = aggregate_all(&full, &region, &AggregationConfig::default());

    assert!(agg.top_countries.len() <= 5);
    let all = country_sums(&region);
    let kept: Vec<&str> = agg.top_countries.rows.iter().map(|r| r.country.as_str()).collect();
    assert!(kept.iter().all(|c| all.contains_key(*c)));

    let min_kept = agg.top_countries.rows.iter().map(|r| r.fatalities).fold(f64::INFINITY, f64::min);
    let max_excluded = all
        .iter()
        .filter(|(c, _)| !kept.contains(&c.as_str()))
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(min_kept >= max_excluded);
}

#[test]
fn test_top_groups_sorted_descending() {
    let full = dataset();
    let region = filter_region(&full, MENA);
    let agg = aggregate_all(&full, &region, &AggregationConfig::default());

    assert_eq!(agg.top_groups.len(), 9);
    assert!(agg.top_groups.rows.windows(2).all(|w| w[0].fatalities >= w[1].fatalities));
}

#[test]
fn test_series_only_holds_the_five_deadliest_groups() {
    let full = dataset();
    let region = filter_region(&full, MENA);
    let agg = aggregate_all(&full, &region, &AggregationConfig::default());

    let mut ranked: Vec<(String, f64)> = group_sums(&region).into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
    let expected: Vec<String> = ranked.into_iter().take(5).map(|(g, _)| g).collect();

    assert_eq!(agg.series.groups, expected);
    assert!(agg.series.points.iter().all(|p| expected.contains(&p.group)));
}

#[test]
fn test_matrix_totals_and_order() {
    let full = dataset();
    let region = filter_region(&full, MENA);
    let agg = aggregate_all(&full, &region, &AggregationConfig::default());
    let m = &agg.matrix;

    assert!(m.len() <= 10);
    assert!(m.totals.windows(2).all(|w| w[0] >= w[1]));
    let sums = country_sums(&region);
    for (r, country) in m.countries.iter().enumerate() {
        assert_eq!(m.totals[r], sums[country]);
    }
    assert_eq!(m.groups, agg.top_groups.names());
}

#[test]
fn test_single_country_scenario() {
    let region = table(vec![
        IncidentBuilder::new("X", "g").killed(2.0),
        IncidentBuilder::new("X", "g").killed(5.0),
        IncidentBuilder::new("X", "g").killed(0.0),
    ]);
    let totals = top_countries(&filter_region(&region, MENA), 5);
    assert_eq!(totals.rows.len(), 1);
    assert_eq!(totals.rows[0].fatalities, 7.0);
    assert_eq!(totals.rows[0].events, 3);
}

#[test]
fn test_unmatched_region_leaves_only_the_map() {
    let full = dataset();
    let region = filter_region(&full, "Antarctica");
    let agg = aggregate_all(&full, &region, &AggregationConfig::default());

    assert!(agg.top_countries.is_empty());
    assert!(agg.top_groups.is_empty());
    assert!(agg.series.is_empty());
    assert!(agg.matrix.is_empty());
    assert_eq!(agg.top_countries.headers(), vec!["country_txt", "nkill", "count"]);
    assert_eq!(agg.top_groups.headers(), vec!["gname", "nkill"]);
    assert_eq!(agg.series.headers(), vec!["gname", "iyear", "nkill"]);

    assert_eq!(agg.map.len(), full.len().min(1000));
}

#[test]
fn test_map_ignores_the_region_filter() {
    let full = dataset();
    let region = filter_region(&full, MENA);
    let config = AggregationConfig { map_rows: 20, ..AggregationConfig::default() };
    let agg = aggregate_all(&full, &region, &config);

    let expected: Vec<&str> = full.iter().take(20).map(|i| i.group.as_str()).collect();
    let got: Vec<&str> = agg.map.rows.iter().map(|p| p.group.as_str()).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_recomputation_is_deterministic() {
    let full = dataset();
    let region = filter_region(&full, MENA);
    let config = AggregationConfig::default();
    assert_eq!(aggregate_all(&full, &region, &config), aggregate_all(&full, &region, &config));
}

#[test]
fn test_blank_country_and_group_cells_stay_out_of_every_grouping() {
    let csv = csv_fixture(&[
        IncidentBuilder::new("", "").killed(50.0),
        IncidentBuilder::new("Iraq", "ISIL").killed(3.0),
    ]);
    let full = parse_incidents(&csv, b',', &ColumnConfig::default()).unwrap();
    assert_eq!(full.len(), 2);
    assert_eq!(full.incidents()[0].country, "");

    let region = filter_region(&full, MENA);
    let agg = aggregate_all(&full, &region, &AggregationConfig::default());

    let countries: Vec<(&str, f64, u64)> = agg
        .top_countries
        .rows
        .iter()
        .map(|r| (r.country.as_str(), r.fatalities, r.events))
        .collect();
    assert_eq!(countries, vec![("Iraq", 3.0, 1)]);
    assert_eq!(agg.top_groups.names(), vec!["ISIL"]);
    assert_eq!(agg.series.groups, vec!["ISIL"]);
    assert_eq!(agg.matrix.countries, vec!["Iraq"]);
    assert_eq!(agg.matrix.groups, vec!["ISIL"]);
    // The map shows raw rows, named or not.
    assert_eq!(agg.map.len(), 2);
}
