use serde::{Deserialize, Serialize};

/// Reserved input value meaning "no measurement" for a cell.
pub const MISSING_SAMPLE: f64 = -999.0;

/// Largest accepted chart body side in pixels. Keeps every derived pixel
/// width inside `u32`.
pub const MAX_VIEWPORT_PX: u32 = 16_384;

/// Chart body size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        let accepted = 1..=MAX_VIEWPORT_PX;
        accepted.contains(&self.width) && accepted.contains(&self.height)
    }
}

/// Unit system of the ingested samples.
///
/// `FixedPoint` stores every value multiplied by 100 so imperial readings
/// such as inches of rain keep two decimals through the integer pixel math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitMode {
    #[default]
    Standard,
    FixedPoint,
}

impl UnitMode {
    /// Factor applied once to every sample at ingestion.
    #[must_use]
    pub const fn ingest_factor(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::FixedPoint => 100.0,
        }
    }

    /// Smallest magnitude an axis bound is snapped to when data stays close to zero.
    #[must_use]
    pub const fn snap_magnitude(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::FixedPoint => 3.0,
        }
    }
}
