//! Perpetrator groups ranked by fatality sum.

use gtviz_data::{Field, IncidentTable};

use crate::rank::{is_blank, sort_descending, sum_by_key};
use crate::AggregateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub group: String,
    pub fatalities: f64,
}

/// Descending by fatalities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTotals {
    pub rows: Vec<GroupTotal>,
}

impl GroupTotals {
    pub fn names(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.group.clone()).collect()
    }
}

impl AggregateTable for GroupTotals {
    fn headers(&self) -> Vec<&str> {
        vec![Field::Group.canonical_name(), Field::Fatalities.canonical_name()]
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Fatality sum of every named group, in group-name order.
pub fn group_totals(table: &IncidentTable) -> Vec<GroupTotal> {
    sum_by_key(
        table
            .iter()
            .filter(|i| !is_blank(&i.group))
            .map(|i| (i.group.as_str(), i.fatalities)),
    )
        .into_iter()
        .map(|(group, fatalities)| GroupTotal { group: group.to_string(), fatalities })
        .collect()
}

/// The `n` deadliest groups, deadliest first.
pub fn top_groups(table: &IncidentTable, n: usize) -> GroupTotals {
    let mut rows = group_totals(table);
    sort_descending(&mut rows, |r| r.fatalities);
    rows.truncate(n);
    GroupTotals { rows }
}
