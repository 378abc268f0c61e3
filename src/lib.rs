//! wx-boxchart: weather-station bar and line charts built from nested boxes.
//!
//! Rows of sensor samples go in; a grid of sized blocks and tables comes out,
//! rendered as markup a browser lays out without any drawing surface. The
//! split is `core` (pure scaling and geometry), `render` (box tree and
//! renderers) and `api` (chart facade, configuration and layout).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Graph, GraphConfig, GraphDefaults};
pub use error::{ChartError, ChartResult};
