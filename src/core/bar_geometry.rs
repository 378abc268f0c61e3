use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::axis::AxisScale;
use crate::core::rows::SeriesMatrix;

/// Which side of the baseline a bar is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
    /// Range bar of an offset chart: floats between two values above the baseline.
    MidRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarShape {
    /// Column grown from the baseline.
    Filled,
    /// Max/min range bar floating at the top of its lift box.
    Range,
    /// Short fixed-height marker at the sample's height (wind direction).
    Tick,
}

/// Sample value(s) a bar represents, in shifted working units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HoverValue {
    Single(f64),
    Range { min: f64, max: f64 },
}

/// Pixel geometry of one drawn bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarCell {
    pub series: usize,
    pub category: usize,
    pub polarity: Polarity,
    pub shape: BarShape,
    pub height_px: u32,
    pub width_px: u32,
    /// Height of the box the bar is pinned inside; `None` for baseline bars.
    pub lift_px: Option<u32>,
    pub hover: HoverValue,
}

/// One slot of the bar grid. Placeholders keep column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlannedCell {
    Bar(BarCell),
    Placeholder,
}

impl PlannedCell {
    #[must_use]
    pub fn bar(&self) -> Option<&BarCell> {
        match self {
            Self::Bar(cell) => Some(cell),
            Self::Placeholder => None,
        }
    }
}

/// Cells of one category inside a band: one per series, or one in max/min mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub category: usize,
    pub cells: SmallVec<[PlannedCell; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPlan {
    pub polarity: Polarity,
    /// Width of each grid cell, gap included.
    pub slot_width_px: u32,
    pub columns: Vec<CategoryColumn>,
}

impl BandPlan {
    pub fn cells(&self) -> impl Iterator<Item = &PlannedCell> + '_ {
        self.columns.iter().flat_map(|column| column.cells.iter())
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarCell> + '_ {
        self.cells().filter_map(PlannedCell::bar)
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.columns.iter().map(|column| column.cells.len()).sum()
    }

    /// Width of all slots side by side, saturating at `u32::MAX`.
    #[must_use]
    pub fn width_px(&self) -> u32 {
        u32::try_from(self.slot_count())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.slot_width_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPlan {
    pub positive: BandPlan,
    pub negative: Option<BandPlan>,
}

/// Planner switches derived from the chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanOptions {
    /// Render the two series as one max/min range bar per category.
    pub max_min: bool,
    /// Draw wind samples as tick marks of this height instead of columns.
    pub wind_tick_px: Option<u32>,
    /// Pixels removed from each bar dimension by a 3D border.
    pub bevel_px: u32,
    /// Line chart mode: filled bars are replaced by placeholders.
    pub bars_hidden: bool,
    pub offset: f64,
}

/// Max and min of a category in a two-series chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePair {
    pub max: f64,
    pub min: f64,
}

impl RangePair {
    /// Pairs the first two series at `category`; `None` when either is missing.
    #[must_use]
    pub fn of(matrix: &SeriesMatrix, category: usize) -> Option<Self> {
        let a = matrix.get(0, category)?;
        let b = matrix.get(1, category)?;
        Some(Self {
            max: a.max(b),
            min: a.min(b),
        })
    }

    fn hover(self) -> HoverValue {
        HoverValue::Range {
            min: self.min,
            max: self.max,
        }
    }
}

/// Plans every cell of the positive band and, when the axis has one, the
/// negative band.
///
/// The result depends only on `matrix`, `axis` and `options`.
#[must_use]
pub fn plan_bars(matrix: &SeriesMatrix, axis: &AxisScale, options: PlanOptions) -> BarPlan {
    let max_min = options.max_min && matrix.series_count() == 2;
    let options = PlanOptions { max_min, ..options };
    let slot_width_px = if max_min {
        axis.hscale * 2 + 2
    } else {
        axis.slot_width()
    };

    let positive = BandPlan {
        polarity: Polarity::Positive,
        slot_width_px,
        columns: (0..matrix.sample_count())
            .map(|category| plan_positive_column(matrix, axis, options, category))
            .collect(),
    };
    let negative = axis.has_negative_band().then(|| BandPlan {
        polarity: Polarity::Negative,
        slot_width_px,
        columns: (0..matrix.sample_count())
            .map(|category| plan_negative_column(matrix, axis, options, category))
            .collect(),
    });

    BarPlan { positive, negative }
}

fn plan_positive_column(
    matrix: &SeriesMatrix,
    axis: &AxisScale,
    options: PlanOptions,
    category: usize,
) -> CategoryColumn {
    if options.max_min {
        let cell = match RangePair::of(matrix, category) {
            Some(pair) if axis.vscale * pair.max > 0.0 => {
                PlannedCell::Bar(positive_range_bar(axis, options, category, pair))
            }
            _ => PlannedCell::Placeholder,
        };
        return CategoryColumn {
            category,
            cells: smallvec![cell],
        };
    }

    let cells = (0..matrix.series_count())
        .map(|series| {
            let Some(value) = matrix.get(series, category) else {
                return PlannedCell::Placeholder;
            };
            if axis.vscale * value <= 0.0 {
                return PlannedCell::Placeholder;
            }
            if let Some(tick_px) = options.wind_tick_px {
                return PlannedCell::Bar(BarCell {
                    series,
                    category,
                    polarity: Polarity::Positive,
                    shape: BarShape::Tick,
                    height_px: at_least_one(i64::from(tick_px), options.bevel_px),
                    width_px: axis.hscale.saturating_sub(options.bevel_px),
                    lift_px: Some(truncate_px(axis.vscale * value)),
                    hover: HoverValue::Single(value),
                });
            }
            if options.bars_hidden {
                return PlannedCell::Placeholder;
            }
            PlannedCell::Bar(BarCell {
                series,
                category,
                polarity: Polarity::Positive,
                shape: BarShape::Filled,
                height_px: at_least_one(axis.positive_height(value), options.bevel_px),
                width_px: axis.hscale.saturating_sub(options.bevel_px),
                lift_px: None,
                hover: HoverValue::Single(value),
            })
        })
        .collect();

    CategoryColumn { category, cells }
}

fn plan_negative_column(
    matrix: &SeriesMatrix,
    axis: &AxisScale,
    options: PlanOptions,
    category: usize,
) -> CategoryColumn {
    if options.max_min {
        let cell = RangePair::of(matrix, category)
            .and_then(|pair| negative_range_bar(axis, options, category, pair))
            .map_or(PlannedCell::Placeholder, PlannedCell::Bar);
        return CategoryColumn {
            category,
            cells: smallvec![cell],
        };
    }

    let cells = (0..matrix.series_count())
        .map(|series| {
            let Some(value) = matrix.get(series, category) else {
                return PlannedCell::Placeholder;
            };
            if (axis.vscale * value).trunc() >= 0.0 || options.bars_hidden {
                return PlannedCell::Placeholder;
            }
            let height = axis.negative_height(value) - i64::from(options.bevel_px);
            if height <= 0 {
                return PlannedCell::Placeholder;
            }
            PlannedCell::Bar(BarCell {
                series,
                category,
                polarity: Polarity::Negative,
                shape: BarShape::Filled,
                height_px: height as u32,
                width_px: axis.hscale.saturating_sub(options.bevel_px),
                lift_px: None,
                hover: HoverValue::Single(value),
            })
        })
        .collect();

    CategoryColumn { category, cells }
}

fn positive_range_bar(
    axis: &AxisScale,
    options: PlanOptions,
    category: usize,
    pair: RangePair,
) -> BarCell {
    let segment = axis.positive_segment();
    let lower = if options.offset == 0.0 && pair.min < 0.0 {
        0.0
    } else {
        pair.min
    };
    let span = (segment * pair.max - segment * lower).trunc() as i64;
    let polarity = if options.offset == 0.0 {
        Polarity::Positive
    } else {
        Polarity::MidRange
    };

    BarCell {
        series: 0,
        category,
        polarity,
        shape: BarShape::Range,
        height_px: at_least_one(span, options.bevel_px),
        width_px: range_width(axis, options),
        lift_px: Some(truncate_px(segment * pair.max)),
        hover: pair.hover(),
    }
}

fn negative_range_bar(
    axis: &AxisScale,
    options: PlanOptions,
    category: usize,
    pair: RangePair,
) -> Option<BarCell> {
    let upper = if options.offset == 0.0 && pair.max > 0.0 {
        0.0
    } else {
        pair.max
    };
    if (axis.vscale * -(upper + pair.min)).trunc() <= 0.0 {
        return None;
    }
    let span = ((pair.min - upper) * axis.negative_segment()).trunc() as i64;

    Some(BarCell {
        series: 0,
        category,
        polarity: Polarity::Negative,
        shape: BarShape::Range,
        height_px: at_least_one(span, options.bevel_px),
        width_px: range_width(axis, options),
        lift_px: Some(truncate_px(-pair.min * axis.vscale)),
        hover: pair.hover(),
    })
}

fn range_width(axis: &AxisScale, options: PlanOptions) -> u32 {
    (axis.hscale * 2 + 1).saturating_sub(options.bevel_px)
}

fn at_least_one(px: i64, bevel_px: u32) -> u32 {
    (px - i64::from(bevel_px)).max(1) as u32
}

fn truncate_px(value: f64) -> u32 {
    value.trunc().max(0.0) as u32
}
