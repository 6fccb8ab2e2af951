//! chart-prep: chart data preparation and layout engine.
//!
//! Turns a tabular dataset plus a chart configuration into renderer-ready
//! series and a declarative layout. Painting is left to a [`render::Renderer`]
//! implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod format;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartOptions, ResolvedOptions};
pub use error::{ChartError, ChartResult};
