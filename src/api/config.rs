use serde::{Deserialize, Serialize};

use crate::core::{UnitMode, Viewport, XScale};
use crate::error::{ChartError, ChartResult};
use crate::render::{Bevel, Fill, TextStyle};

use super::TextOverrides;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 200;
pub const DEFAULT_BAR_IMAGE: &str = "rtl-wx-graph-bar.gif";

/// Construction flags of one chart.
///
/// This type is serializable so host applications can keep chart setups in
/// JSON instead of inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Plot width in pixels; `0` selects [`DEFAULT_WIDTH`].
    #[serde(default)]
    pub width: u32,
    /// Plot height in pixels; `0` selects [`DEFAULT_HEIGHT`].
    #[serde(default)]
    pub height: u32,
    /// Colour of the axis lines, ticks and baseline.
    #[serde(default = "default_line_color")]
    pub line_color: String,
    /// Baseline of wind charts; other charts derive their own offset.
    #[serde(default)]
    pub base_offset: f64,
    #[serde(default)]
    pub wind: bool,
    #[serde(default)]
    pub unit_mode: UnitMode,
    #[serde(default)]
    pub time24: bool,
    /// Use this chart's `negative_bars` instead of the ambient default.
    #[serde(default)]
    pub external: bool,
    /// Keep the markup in the chart instead of writing it to the sink.
    #[serde(default)]
    pub deferred: bool,
    #[serde(default)]
    pub negative_bars: bool,
}

impl GraphConfig {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            line_color: default_line_color(),
            base_offset: 0.0,
            wind: false,
            unit_mode: UnitMode::Standard,
            time24: false,
            external: false,
            deferred: false,
            negative_bars: false,
        }
    }

    #[must_use]
    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }

    #[must_use]
    pub fn with_base_offset(mut self, offset: f64) -> Self {
        self.base_offset = offset;
        self
    }

    #[must_use]
    pub fn with_wind(mut self, wind: bool) -> Self {
        self.wind = wind;
        self
    }

    #[must_use]
    pub fn with_unit_mode(mut self, unit_mode: UnitMode) -> Self {
        self.unit_mode = unit_mode;
        self
    }

    #[must_use]
    pub fn with_time24(mut self, time24: bool) -> Self {
        self.time24 = time24;
        self
    }

    /// Marks the chart external and sets its own negative-bar mode.
    #[must_use]
    pub fn with_negative_bars(mut self, negative_bars: bool) -> Self {
        self.external = true;
        self.negative_bars = negative_bars;
        self
    }

    #[must_use]
    pub fn with_deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }

    /// Effective plot size once ambient forced sizes and fallbacks apply.
    #[must_use]
    pub fn resolve_viewport(&self, defaults: &GraphDefaults) -> Viewport {
        let width = defaults
            .forced_width
            .filter(|w| *w > 0)
            .unwrap_or(if self.width > 0 { self.width } else { DEFAULT_WIDTH });
        let height = defaults
            .forced_height
            .filter(|h| *h > 0)
            .unwrap_or(if self.height > 0 {
                self.height
            } else {
                DEFAULT_HEIGHT
            });
        Viewport::new(width, height)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

/// Wind-direction chart switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindOptions {
    /// Label the direction axis `N`, `NE`, ... instead of degrees.
    #[serde(default = "default_true")]
    pub compass_labels: bool,
    /// Draw each sample as a short tick at its height instead of a column.
    #[serde(default = "default_true")]
    pub tick_bars: bool,
    #[serde(default = "default_wind_tick_height")]
    pub tick_height_px: u32,
    /// Fill of wind bars; overrides series fills when set.
    #[serde(default = "default_wind_bar_image")]
    pub bar_image: Option<Fill>,
}

impl Default for WindOptions {
    fn default() -> Self {
        Self {
            compass_labels: true,
            tick_bars: true,
            tick_height_px: default_wind_tick_height(),
            bar_image: default_wind_bar_image(),
        }
    }
}

/// Trend line drawn over the plot. Enabling it switches the chart to line mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOverlay {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_line_width")]
    pub width_px: u32,
}

impl Default for LineOverlay {
    fn default() -> Self {
        Self {
            enabled: false,
            width_px: default_line_width(),
        }
    }
}

/// Outer frame around the whole chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStyle {
    #[serde(default)]
    pub border: u32,
    #[serde(default)]
    pub width_px: Option<u32>,
    #[serde(default)]
    pub background: Option<Fill>,
}

impl FrameStyle {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.border > 0 || self.background.is_some()
    }
}

/// Extra CSS appended to bars of each polarity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandStyles {
    #[serde(default)]
    pub positive: String,
    #[serde(default)]
    pub negative: String,
    #[serde(default)]
    pub mid_range: String,
}

/// Ambient defaults shared by every chart a host builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDefaults {
    #[serde(default = "default_title_style")]
    pub title_style: TextStyle,
    #[serde(default = "default_axis_style")]
    pub axis_style: TextStyle,
    #[serde(default)]
    pub wind: WindOptions,
    #[serde(default)]
    pub line_overlay: LineOverlay,
    /// Negative-bar mode of charts not marked external.
    #[serde(default)]
    pub negative_bars: bool,
    #[serde(default = "default_bar_fill")]
    pub bar_fill: Fill,
    #[serde(default = "default_bar_fill")]
    pub negative_bar_fill: Fill,
    #[serde(default)]
    pub forced_width: Option<u32>,
    #[serde(default)]
    pub forced_height: Option<u32>,
    /// Draw 1px borders on layout tables, for debugging alignment.
    #[serde(default)]
    pub table_borders: bool,
    #[serde(default)]
    pub text_overrides: TextOverrides,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            title_style: default_title_style(),
            axis_style: default_axis_style(),
            wind: WindOptions::default(),
            line_overlay: LineOverlay::default(),
            negative_bars: false,
            bar_fill: default_bar_fill(),
            negative_bar_fill: default_bar_fill(),
            forced_width: None,
            forced_height: None,
            table_borders: false,
            text_overrides: TextOverrides::default(),
        }
    }
}

impl GraphDefaults {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize defaults: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse defaults: {e}")))
    }
}

/// Everything about a chart's look that does not affect scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub legends: Vec<String>,
    pub bar_fills: Vec<Fill>,
    pub negative_fills: Vec<Fill>,
    pub title_style: TextStyle,
    pub axis_style: TextStyle,
    pub wind: WindOptions,
    pub line_overlay: LineOverlay,
    pub max_min: bool,
    pub bevel: Bevel,
    pub frame: FrameStyle,
    pub grid_color: Option<String>,
    pub band_styles: BandStyles,
    pub show_negative_scale: bool,
    pub x_scale: Option<XScale>,
}

impl Presentation {
    #[must_use]
    pub fn from_defaults(defaults: &GraphDefaults) -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            legends: Vec::new(),
            bar_fills: vec![defaults.bar_fill.clone()],
            negative_fills: vec![defaults.negative_bar_fill.clone()],
            title_style: defaults.title_style.clone(),
            axis_style: defaults.axis_style.clone(),
            wind: defaults.wind.clone(),
            line_overlay: defaults.line_overlay,
            max_min: false,
            bevel: Bevel::None,
            frame: FrameStyle::default(),
            grid_color: None,
            band_styles: BandStyles::default(),
            show_negative_scale: false,
            x_scale: None,
        }
    }
}

fn default_line_color() -> String {
    "#000000".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_wind_tick_height() -> u32 {
    2
}

fn default_wind_bar_image() -> Option<Fill> {
    Some(Fill::Image(DEFAULT_BAR_IMAGE.to_owned()))
}

fn default_line_width() -> u32 {
    1
}

fn default_title_style() -> TextStyle {
    TextStyle::new("Verdana,Arial,Helvetica", 10, "")
}

fn default_axis_style() -> TextStyle {
    TextStyle::new("Arial,Helvetica", 10, "")
}

fn default_bar_fill() -> Fill {
    Fill::Image(DEFAULT_BAR_IMAGE.to_owned())
}
