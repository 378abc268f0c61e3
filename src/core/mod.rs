pub mod axis;
pub mod bar_geometry;
pub mod range;
pub mod rows;
pub mod ticks;
pub mod trend;
pub mod types;
pub mod x_labels;

pub use axis::AxisScale;
pub use bar_geometry::{
    BandPlan, BarCell, BarPlan, BarShape, CategoryColumn, HoverValue, PlanOptions, PlannedCell,
    Polarity, RangePair, plan_bars,
};
pub use range::{AxisRange, ScaleSelection, measure_range, select_scale};
pub use rows::{Sample, SeriesMatrix};
pub use ticks::{TickLabel, compass_point, format_sample, negative_ticks, positive_ticks};
pub use trend::{TrendLine, TrendOverlay, TrendPoint, project_trend};
pub use types::{MAX_VIEWPORT_PX, MISSING_SAMPLE, UnitMode, Viewport};
pub use x_labels::{DateLabelFormat, XScale, display_lines};
