//! Country × group fatality matrix.
//!
//! Cells for (country, group) pairs with no incidents are `None`, never zero.

use std::collections::{BTreeMap, BTreeSet};

use gtviz_data::{Field, IncidentTable};

use crate::group::GroupTotals;
use crate::rank::{is_blank, sort_ascending, sort_descending, sum_by_key};
use crate::{AggregateTable, TOTAL_COLUMN};

#[derive(Debug, Clone, PartialEq)]
pub struct CountryGroupSum {
    pub country: String,
    pub group: String,
    pub fatalities: f64,
}

/// Fatality sum per (country, group), ascending by sum.
pub fn country_group_sums(table: &IncidentTable) -> Vec<CountryGroupSum> {
    let named = table
        .iter()
        .filter(|i| !is_blank(&i.country) && !is_blank(&i.group));
    let mut rows: Vec<CountryGroupSum> =
        sum_by_key(named.map(|i| ((i.country.as_str(), i.group.as_str()), i.fatalities)))
            .into_iter()
            .map(|((country, group), fatalities)| CountryGroupSum {
                country: country.to_string(),
                group: group.to_string(),
                fatalities,
            })
            .collect();
    sort_ascending(&mut rows, |r| r.fatalities);
    rows
}

/// Rows are countries, columns are groups. `totals[r]` is the sum of every
/// present cell of row `r` in the matrix it was pivoted from, and is carried
/// unchanged through [`PivotMatrix::restrict_columns`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotMatrix {
    pub countries: Vec<String>,
    pub groups: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
    pub totals: Vec<f64>,
}

impl PivotMatrix {
    /// Pivot (country, group) sums; rows and columns come out in sorted order.
    pub fn pivot(sums: &[CountryGroupSum]) -> Self {
        let countries: BTreeSet<&str> = sums.iter().map(|s| s.country.as_str()).collect();
        let groups: BTreeSet<&str> = sums.iter().map(|s| s.group.as_str()).collect();
        let lookup: BTreeMap<(&str, &str), f64> = sums
            .iter()
            .map(|s| ((s.country.as_str(), s.group.as_str()), s.fatalities))
            .collect();

        let cells: Vec<Vec<Option<f64>>> = countries
            .iter()
            .map(|c| groups.iter().map(|g| lookup.get(&(*c, *g)).copied()).collect())
            .collect();
        let totals = cells.iter().map(|row| row.iter().flatten().sum::<f64>()).collect();

        Self {
            countries: countries.into_iter().map(str::to_string).collect(),
            groups: groups.into_iter().map(str::to_string).collect(),
            cells,
            totals,
        }
    }

    /// Rows reordered by total, largest first; ties keep their order.
    pub fn sorted_by_total(&self) -> Self {
        let mut order: Vec<usize> = (0..self.countries.len()).collect();
        sort_descending(&mut order, |&r| self.totals[r]);
        self.select_rows(&order)
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let order: Vec<usize> = (0..self.countries.len().min(n)).collect();
        self.select_rows(&order)
    }

    /// Keep only `groups`, in the given order. Totals are not recomputed.
    pub fn restrict_columns(&self, groups: &[String]) -> Self {
        let index: Vec<Option<usize>> = groups
            .iter()
            .map(|g| self.groups.iter().position(|have| have == g))
            .collect();
        let cells = self
            .cells
            .iter()
            .map(|row| index.iter().map(|i| i.and_then(|i| row[i])).collect())
            .collect();
        Self {
            countries: self.countries.clone(),
            groups: groups.to_vec(),
            cells,
            totals: self.totals.clone(),
        }
    }

    pub fn cell(&self, country: &str, group: &str) -> Option<f64> {
        let r = self.countries.iter().position(|c| c == country)?;
        let g = self.groups.iter().position(|have| have == group)?;
        self.cells[r][g]
    }

    /// Sum of the present cells of row `r` over the current columns.
    pub fn row_sum(&self, r: usize) -> f64 {
        self.cells[r].iter().flatten().sum()
    }

    /// Values of one column, one per row.
    pub fn column(&self, group: &str) -> Option<Vec<Option<f64>>> {
        let g = self.groups.iter().position(|have| have == group)?;
        Some(self.cells.iter().map(|row| row[g]).collect())
    }

    fn select_rows(&self, order: &[usize]) -> Self {
        Self {
            countries: order.iter().map(|&r| self.countries[r].clone()).collect(),
            groups: self.groups.clone(),
            cells: order.iter().map(|&r| self.cells[r].clone()).collect(),
            totals: order.iter().map(|&r| self.totals[r]).collect(),
        }
    }
}

impl AggregateTable for PivotMatrix {
    /// Group columns, then the country key, then the total.
    fn headers(&self) -> Vec<&str> {
        self.groups
            .iter()
            .map(String::as_str)
            .chain([Field::Country.canonical_name(), TOTAL_COLUMN])
            .collect()
    }

    fn len(&self) -> usize {
        self.countries.len()
    }
}

/// The `n` countries with the highest total across all groups, restricted to
/// the columns of `top_groups` in their ranked order.
pub fn stacked_matrix(table: &IncidentTable, top_groups: &GroupTotals, n: usize) -> PivotMatrix {
    let sums = country_group_sums(table);
    PivotMatrix::pivot(&sums)
        .sorted_by_total()
        .head(n)
        .restrict_columns(&top_groups.names())
}
