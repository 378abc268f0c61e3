use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::axis::AxisScale;
use crate::core::types::UnitMode;

/// Compass point names every 45 degrees, starting and ending at north.
const COMPASS_POINTS: [&str; 9] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW", "N"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    /// Unshifted value the tick stands for, in ingested units.
    pub value: f64,
    pub text: String,
}

/// Labels of the positive axis, top tick first, baseline last.
#[must_use]
pub fn positive_ticks(
    axis: &AxisScale,
    offset: f64,
    unit_mode: UnitMode,
    compass: bool,
) -> Vec<TickLabel> {
    let count = axis.positive_tick_count();
    (0..=count)
        .map(|index| {
            let value = axis.scale * count as f64 - axis.scale * index as f64 + offset;
            let text = match unit_mode {
                UnitMode::Standard => compass
                    .then(|| compass_point(value))
                    .flatten()
                    .map_or_else(|| format_standard(value), str::to_owned),
                UnitMode::FixedPoint => format_fixed_point(value),
            };
            TickLabel { value, text }
        })
        .collect()
}

/// Labels of the negative axis, first tick below the baseline first.
#[must_use]
pub fn negative_ticks(axis: &AxisScale, offset: f64, unit_mode: UnitMode) -> Vec<TickLabel> {
    (0..axis.negative_tick_count())
        .map(|index| {
            let value = -axis.scale * (index + 1) as f64 + offset;
            let text = match unit_mode {
                UnitMode::Standard => format_standard(value),
                UnitMode::FixedPoint => format_fixed_point(value),
            };
            TickLabel { value, text }
        })
        .collect()
}

/// Compass name of a direction in degrees, when it is one of the eight points.
#[must_use]
pub fn compass_point(degrees: f64) -> Option<&'static str> {
    if degrees.fract() != 0.0 || !(0.0..=360.0).contains(&degrees) {
        return None;
    }
    let degrees = degrees as u32;
    (degrees % 45 == 0).then(|| COMPASS_POINTS[(degrees / 45) as usize])
}

/// Formats an unshifted sample for hover text.
///
/// Fixed-point samples are shown back in their original unit.
#[must_use]
pub fn format_sample(value: f64, unit_mode: UnitMode) -> String {
    match unit_mode {
        UnitMode::Standard => format_standard(value),
        UnitMode::FixedPoint => Decimal::new(saturating_round(value), 2)
            .normalize()
            .to_string(),
    }
}

/// Rounds to two decimals and drops trailing zeros (`12.5`, `270`).
fn format_standard(value: f64) -> String {
    Decimal::new(saturating_round(value * 100.0), 2)
        .normalize()
        .to_string()
}

/// Hundredths shown with exactly two decimals (`270` -> `2.70`).
fn format_fixed_point(value: f64) -> String {
    Decimal::new(saturating_round(value), 2).to_string()
}

/// Rounds halves toward positive infinity (`-12.5` -> `-12`).
fn saturating_round(value: f64) -> i64 {
    let rounded = (value + 0.5).floor();
    if !rounded.is_finite() {
        0
    } else if rounded > i64::MAX as f64 {
        i64::MAX
    } else if rounded < i64::MIN as f64 {
        i64::MIN
    } else {
        rounded as i64
    }
}
