mod chart;
mod config;
mod layout;
mod overrides;
mod pipeline;
mod snapshot;

pub use chart::Graph;
pub use config::{
    BandStyles, DEFAULT_BAR_IMAGE, DEFAULT_HEIGHT, DEFAULT_WIDTH, FrameStyle, GraphConfig,
    GraphDefaults, LineOverlay, Presentation, WindOptions,
};
pub use layout::{SCALE_WARNING, TREND_OVERLAY_ID};
pub use overrides::{KnownTitle, TextOverride, TextOverrides};
pub use pipeline::BuildPlan;
pub use snapshot::{PLAN_SNAPSHOT_SCHEMA_VERSION, PlanSnapshot, PlanSnapshotJsonContractV1};
