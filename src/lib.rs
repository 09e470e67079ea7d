//! dashgraph: fetch/render scheduling for time-series dashboard graphs.
//!
//! This crate decides when each graph on a dashboard page fetches data and
//! redraws: immediate draws for visible graphs, per-scroll-container queues
//! for hidden ones, debounced queue re-evaluation, refresh timers, and the
//! transformation of fetched series into renderer-ready structure. The
//! charting backend, network transport, and layout engine stay host-owned
//! behind narrow capabilities.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod viewport;

pub use api::{Dashboard, DashboardConfig, Effect};
pub use error::{GraphError, GraphResult};
