//! gtviz-web: Dashboard page and the server that holds it.
//!
//! Startup runs the whole pipeline once (load, filter, aggregate, chart,
//! assemble); requests only ever read the result.

pub mod layout;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod sse;
pub mod router;
pub mod handlers;

pub use layout::{assemble_layout, Dashboard, PageLayout};
pub use pipeline::{build_dashboard_state, build_dashboard_state_with, DashboardState};
pub use render::PageRenderer;
pub use router::build_router;
pub use state::{AppState, SharedState};
