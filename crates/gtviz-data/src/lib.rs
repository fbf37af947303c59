//! gtviz-data: Incident loading and filtering.
//!
//! Reads the incident CSV into an immutable [`IncidentTable`] with a typed
//! schema validated once against the header row, loads the map-provider
//! token, and narrows the table to a single region.

pub mod schema;
pub mod incident;
pub mod loader;
pub mod token;
pub mod filter;

pub use filter::filter_region;
pub use incident::{Incident, IncidentTable};
pub use loader::{decode, load_incidents, parse_incidents};
pub use schema::{ColumnMap, Field, COUNT_COLUMN};
pub use token::load_token;
