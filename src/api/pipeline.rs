use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::config::{GraphConfig, Presentation};
use crate::core::{
    AxisScale, BarPlan, PlanOptions, ScaleSelection, SeriesMatrix, TrendOverlay, Viewport,
    measure_range, plan_bars, project_trend, select_scale,
};
use crate::error::ChartResult;

/// Everything one build derives from the stored rows.
///
/// `working` is the shifted and clamped copy the geometry was computed from;
/// the chart's own rows are never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub viewport: Viewport,
    pub selection: ScaleSelection,
    pub axis: AxisScale,
    pub working: SeriesMatrix,
    pub bars: BarPlan,
    pub trend: Option<TrendOverlay>,
    /// Max/min mode actually in effect (requires exactly two series).
    pub max_min: bool,
}

/// Runs range analysis, axis scaling and bar planning. `None` when no row
/// was appended.
pub(crate) fn plan_build(
    matrix: &SeriesMatrix,
    config: &GraphConfig,
    viewport: Viewport,
    negative_bars: bool,
    presentation: &Presentation,
) -> ChartResult<Option<BuildPlan>> {
    if matrix.is_empty() {
        return Ok(None);
    }

    let selection = select_scale(
        matrix,
        viewport.height,
        config.wind,
        negative_bars,
        config.base_offset,
    );
    let mut working = matrix.shifted(selection.offset);
    let range = measure_range(&mut working, config.wind);
    let axis = AxisScale::resolve(
        range,
        selection.scale,
        viewport,
        working.total_columns(),
        working.series_count(),
        presentation.axis_style.size_px,
    )?;

    let max_min = presentation.max_min && working.series_count() == 2;
    let wind_tick_px = (config.wind && presentation.wind.tick_bars)
        .then_some(presentation.wind.tick_height_px);
    let options = PlanOptions {
        max_min,
        wind_tick_px,
        bevel_px: presentation.bevel.inset_px(),
        bars_hidden: presentation.line_overlay.enabled,
        offset: selection.offset,
    };
    let bars = plan_bars(&working, &axis, options);
    let trend = presentation
        .line_overlay
        .enabled
        .then(|| project_trend(&working, &axis));

    debug!(
        scale = selection.scale,
        offset = selection.offset,
        pos_max = axis.pos_max,
        neg_max = axis.neg_max,
        slots = bars.positive.slot_count(),
        negative_band = bars.negative.is_some(),
        "planned chart build"
    );

    Ok(Some(BuildPlan {
        viewport,
        selection,
        axis,
        working,
        bars,
        trend,
        max_min,
    }))
}
