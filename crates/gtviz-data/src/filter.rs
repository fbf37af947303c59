//! Region filter.

use tracing::{debug, warn};

use crate::incident::IncidentTable;

/// Rows whose region equals `region` exactly, in source order.
///
/// No match yields an empty table with the same headers.
pub fn filter_region(table: &IncidentTable, region: &str) -> IncidentTable {
    let rows: Vec<_> = table
        .iter()
        .filter(|incident| incident.region == region)
        .cloned()
        .collect();

    if rows.is_empty() {
        warn!("No incidents in region {:?}; region charts will be empty", region);
    } else {
        debug!("Region {:?}: {} of {} incidents", region, rows.len(), table.len());
    }
    table.with_rows(rows)
}
