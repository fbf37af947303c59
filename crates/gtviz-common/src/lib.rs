//! gtviz-common: Shared error types used across all gtviz crates.

pub mod error;

pub use error::{ApiError, GtvizError, Result};
