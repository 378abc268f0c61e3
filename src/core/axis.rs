use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::range::AxisRange;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Height of the top label row above the highest tick.
pub const AXIS_HEADROOM_PX: u32 = 15;
/// Bands shorter than this cannot fit negative axis labels.
pub const MIN_NEGATIVE_BAND_PX: f64 = 15.0;
/// Padding added to the axis font size when checking label legibility.
const LABEL_PADDING_PX: f64 = 4.0;

/// Vertical and horizontal pixel mapping for one build.
///
/// `ptoadd` and `ntoadd` are per-unit corrections added to `vscale` for the
/// positive and negative bands. They spread the integer remainder of each
/// band over its value range, so a bar reaching `pos_max` ends on the top
/// tick instead of drifting by the accumulated truncation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub scale: f64,
    pub pos_max: f64,
    pub neg_max: f64,
    pub vscale: f64,
    pub hscale: u32,
    pub tick_band_px: f64,
    pub paxis_height: f64,
    pub naxis_height: f64,
    pub ptoadd: f64,
    pub ntoadd: f64,
    pub scale_too_big: bool,
}

impl AxisScale {
    /// Resolves pixel factors for `range` on a chart body of `viewport` size.
    ///
    /// `total_columns` is the number of bar slots and `series_count` the number
    /// of rows. `label_size_px` is the axis font size used for the legibility
    /// check; an illegible scale is flagged, not rejected.
    pub fn resolve(
        range: AxisRange,
        scale: f64,
        viewport: Viewport,
        total_columns: usize,
        series_count: usize,
        label_size_px: u32,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if total_columns == 0 || series_count == 0 {
            return Err(ChartError::InvalidData(
                "axis needs at least one column".to_owned(),
            ));
        }
        let span = range.span();
        if !span.is_finite() || span <= 0.0 || !range.pos_max.is_finite() || range.pos_max <= 0.0
        {
            return Err(ChartError::InvalidData(
                "axis range must be finite with pos_max > 0".to_owned(),
            ));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis scale must be finite and > 0".to_owned(),
            ));
        }

        let height = f64::from(viewport.height);
        let width = f64::from(viewport.width);

        let vscale = height / span;
        let hscale = (width / total_columns as f64 - 1.0 / series_count as f64)
            .floor()
            .max(1.0) as u32;

        let tick_band_px = (height / span * scale).ceil();
        let paxis_height = (range.pos_max / scale * tick_band_px).ceil();
        let naxis_height = (-range.neg_max / scale * tick_band_px).ceil();
        let axis_total = paxis_height + naxis_height;

        let ptoadd = (paxis_height - (paxis_height / axis_total * height).floor()) / range.pos_max;
        let negative_remainder = naxis_height - (naxis_height / axis_total * height).floor();
        let ntoadd = if range.neg_max != 0.0 {
            negative_remainder / -range.neg_max
        } else {
            negative_remainder
        };

        let scale_too_big = tick_band_px < f64::from(label_size_px) + LABEL_PADDING_PX;
        if scale_too_big {
            warn!(
                tick_band_px,
                label_size_px, "axis scale too big to label; numeric axis omitted"
            );
        }

        let resolved = Self {
            scale,
            pos_max: range.pos_max,
            neg_max: range.neg_max,
            vscale,
            hscale,
            tick_band_px,
            paxis_height,
            naxis_height,
            ptoadd,
            ntoadd,
            scale_too_big,
        };
        debug!(
            vscale,
            hscale,
            paxis_height,
            naxis_height,
            ptoadd,
            ntoadd,
            "resolved axis scale"
        );
        Ok(resolved)
    }

    /// Corrected pixels per unit for bars above the baseline.
    #[must_use]
    pub fn positive_segment(&self) -> f64 {
        self.vscale + self.ptoadd
    }

    /// Corrected pixels per unit for bars below the baseline, negated so that
    /// multiplying a negative sample yields a positive height.
    #[must_use]
    pub fn negative_segment(&self) -> f64 {
        -(self.vscale + self.ntoadd)
    }

    #[must_use]
    pub fn has_negative_band(&self) -> bool {
        self.neg_max < 0.0
    }

    /// Number of tick intervals above the baseline.
    #[must_use]
    pub fn positive_tick_count(&self) -> usize {
        (self.pos_max / self.scale).floor() as usize
    }

    /// Number of labelled ticks below the baseline.
    #[must_use]
    pub fn negative_tick_count(&self) -> usize {
        (-self.neg_max / self.scale).floor().max(0.0) as usize
    }

    #[must_use]
    pub fn negative_axis_legible(&self) -> bool {
        self.tick_band_px >= MIN_NEGATIVE_BAND_PX
    }

    /// Width of one bar slot including its 1px gap.
    #[must_use]
    pub fn slot_width(&self) -> u32 {
        self.hscale + 1
    }

    /// Vertical origin of the trend overlay: the baseline measured from the
    /// top of the positive axis column.
    #[must_use]
    pub fn overlay_origin(&self) -> f64 {
        self.paxis_height + f64::from(AXIS_HEADROOM_PX)
    }

    /// Pixel height of a positive sample, truncated toward zero.
    #[must_use]
    pub fn positive_height(&self, value: f64) -> i64 {
        (self.positive_segment() * value).trunc() as i64
    }

    /// Pixel height of a negative sample, truncated toward zero.
    #[must_use]
    pub fn negative_height(&self, value: f64) -> i64 {
        (self.negative_segment() * value).trunc() as i64
    }
}
