use serde::{Deserialize, Serialize};

use crate::core::axis::AxisScale;
use crate::core::rows::SeriesMatrix;

/// Extra pixels below the baseline reserved by the overlay surface.
const OVERLAY_FOOTER_PX: f64 = 16.0;

/// One overlay vertex in pixels, relative to the overlay surface's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub category: usize,
    pub x: f64,
    pub y: f64,
    /// Sample in shifted working units, kept for hover text.
    pub value: f64,
}

/// Vertices of one series. Missing samples leave gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub series: usize,
    pub points: Vec<TrendPoint>,
}

impl TrendLine {
    /// Runs of points in adjacent categories; each is one unbroken polyline.
    #[must_use]
    pub fn runs(&self) -> Vec<&[TrendPoint]> {
        self.points
            .chunk_by(|left, right| right.category == left.category + 1)
            .collect()
    }
}

/// Surface the overlay is drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendOverlay {
    pub width_px: u32,
    pub height_px: u32,
    pub lines: Vec<TrendLine>,
}

/// Projects every present sample onto the bar layout.
///
/// The vertical math is the bar planner's: a point sits exactly on top of the
/// bar the same sample would produce.
#[must_use]
pub fn project_trend(matrix: &SeriesMatrix, axis: &AxisScale) -> TrendOverlay {
    let series_count = matrix.series_count();
    let column_stride = f64::from(axis.slot_width()) * series_count as f64;
    let origin = axis.overlay_origin();

    let lines = (0..series_count)
        .map(|series| {
            let points = (0..matrix.sample_count())
                .filter_map(|category| {
                    let value = matrix.get(series, category)?;
                    let y = if axis.has_negative_band() && value < 0.0 {
                        origin + axis.negative_height(value) as f64
                    } else {
                        origin - axis.positive_height(value) as f64
                    };
                    Some(TrendPoint {
                        category,
                        x: category as f64 * column_stride,
                        y,
                        value,
                    })
                })
                .collect();
            TrendLine { series, points }
        })
        .collect();

    TrendOverlay {
        width_px: u32::try_from(matrix.total_columns())
            .unwrap_or(u32::MAX)
            .saturating_mul(axis.slot_width()),
        height_px: (axis.paxis_height + axis.naxis_height + OVERLAY_FOOTER_PX) as u32,
        lines,
    }
}
