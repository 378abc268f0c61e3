//! Axis bounds, tick granularity and baseline offset derived from the samples.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::rows::SeriesMatrix;

/// Tick granularity of wind-direction charts: eight compass points.
pub const WIND_SCALE: f64 = 45.0;
/// Upper bound of the circular wind-direction axis.
pub const WIND_MAX: f64 = 360.0;
/// Samples below this value are replaced by the running negative maximum.
pub const CLAMP_FLOOR: f64 = -100.0;

/// Pixel height spanned by one coarse tick when choosing the scale.
const PIXELS_PER_TICK: f64 = 15.0;
/// Seed of the minimum scan; survives only when no sample is present.
const MIN_SEED: f64 = 10_000.0;

/// Tick granularity and the baseline subtracted from every sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSelection {
    pub scale: f64,
    pub offset: f64,
}

/// Bounds of the plotted value range after offset and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub pos_max: f64,
    pub neg_max: f64,
}

impl AxisRange {
    #[must_use]
    pub fn span(self) -> f64 {
        self.pos_max - self.neg_max
    }

    #[must_use]
    pub fn has_negative_band(self) -> bool {
        self.neg_max < 0.0
    }
}

/// Chooses the tick scale and the baseline offset from raw (unshifted) samples.
///
/// `negative_bars` keeps negative samples below a zero baseline; without it the
/// data is lifted so the smallest sample sits one unit above the baseline.
/// A positive minimum is lifted the same way whether or not `negative_bars`
/// is set, so `[5, 10]` gets offset 4 in both modes.
#[must_use]
pub fn select_scale(
    matrix: &SeriesMatrix,
    height_px: u32,
    wind: bool,
    negative_bars: bool,
    base_offset: f64,
) -> ScaleSelection {
    if wind {
        return ScaleSelection {
            scale: WIND_SCALE,
            offset: base_offset,
        };
    }

    let (max, min) = matrix
        .present_samples()
        .fold((0.0_f64, MIN_SEED), |(max, min), v| (max.max(v), min.min(v)));
    let min = if min == MIN_SEED { 0.0 } else { min };

    let band = f64::from(height_px) / PIXELS_PER_TICK;
    let scale = ((max - min + 1.0) / band).ceil().max(1.0);

    let offset = if min < 0.0 && negative_bars {
        0.0
    } else if min != 0.0 {
        min.ceil() - 1.0
    } else {
        0.0
    };

    ScaleSelection { scale, offset }
}

/// Scans the shifted working matrix for its bounds.
///
/// The scan is series-major and left to right: a sample below
/// [`CLAMP_FLOOR`] is overwritten with the negative maximum found so far, so
/// the result depends on scan order.
pub fn measure_range(matrix: &mut SeriesMatrix, wind: bool) -> AxisRange {
    let unit_mode = matrix.unit_mode();
    let mut pos_max = 0.0_f64;
    let mut neg_max = 0.0_f64;
    let mut clamped = 0_usize;

    for value in matrix.present_samples_mut() {
        if *value > pos_max {
            pos_max = *value;
        }
        if *value < CLAMP_FLOOR {
            trace!(sample = *value, replacement = neg_max, "clamp outlier sample");
            *value = neg_max;
            clamped += 1;
        }
        if *value < neg_max {
            neg_max = *value;
        }
    }

    if wind {
        return AxisRange {
            pos_max: WIND_MAX,
            neg_max: 0.0,
        };
    }

    let snap = unit_mode.snap_magnitude();
    if (0.0..snap).contains(&pos_max) {
        pos_max = snap;
    }
    if neg_max > -snap && neg_max < 0.0 {
        neg_max = -snap;
    }

    trace!(pos_max, neg_max, clamped, ?unit_mode, "measured range");
    AxisRange { pos_max, neg_max }
}

