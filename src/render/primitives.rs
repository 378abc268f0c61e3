use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Paint of a box: a CSS colour or an image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    Color(String),
    Image(String),
}

impl Fill {
    /// Reads a user-supplied fill: anything with a `.` after its first
    /// character (`bar.gif`, `img/red.png`) is an image, the rest are colours.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        match spec.rfind('.') {
            Some(index) if index > 0 => Self::Image(spec.to_owned()),
            _ => Self::Color(spec.to_owned()),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Color(value) | Self::Image(value) => value,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let value = self.value();
        if value.is_empty() {
            return Err(ChartError::InvalidData("fill must not be empty".to_owned()));
        }
        if value.contains(['"', '\'', '<', '>']) {
            return Err(ChartError::InvalidData(format!(
                "fill `{value}` contains markup characters"
            )));
        }
        Ok(())
    }
}

/// 3D border drawn around bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bevel {
    #[default]
    None,
    In,
    Out,
}

impl Bevel {
    /// Pixels the border takes out of a bar's width and height.
    #[must_use]
    pub const fn inset_px(self) -> u32 {
        match self {
            Self::None => 0,
            Self::In | Self::Out => 2,
        }
    }

    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::None => "",
            Self::In => {
                "border-style:solid;border-color:#222222 #DDDDDD #DDDDDD #222222;border-width:1px;"
            }
            Self::Out => {
                "border-style:solid;border-color:#DDDDDD #222222 #222222 #DDDDDD;border-width:1px;"
            }
        }
    }
}

/// Font family, pixel size and colour of a text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: String,
    pub size_px: u32,
    /// Empty means "inherit".
    #[serde(default)]
    pub color: String,
}

impl TextStyle {
    #[must_use]
    pub fn new(font: impl Into<String>, size_px: u32, color: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            size_px,
            color: color.into(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.size_px == 0 {
            return Err(ChartError::InvalidData(
                "font size must be > 0".to_owned(),
            ));
        }
        if self.font.contains(['"', '\'', '<', '>', ';'])
            || self.color.contains(['"', '\'', '<', '>', ';'])
        {
            return Err(ChartError::InvalidData(
                "text style contains markup characters".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Bottom,
}

/// Styled text; each line is rendered on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub style: TextStyle,
    pub lines: Vec<String>,
    pub align: Option<HAlign>,
    pub padding_px: u32,
}

impl TextRun {
    #[must_use]
    pub fn new(style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            lines: vec![text.into()],
            align: None,
            padding_px: 0,
        }
    }

    #[must_use]
    pub fn with_lines(style: TextStyle, lines: Vec<String>) -> Self {
        Self {
            style,
            lines,
            align: None,
            padding_px: 0,
        }
    }

    #[must_use]
    pub fn aligned(mut self, align: HAlign) -> Self {
        self.align = Some(align);
        self
    }

    #[must_use]
    pub fn padded(mut self, padding_px: u32) -> Self {
        self.padding_px = padding_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.style.validate()
    }
}

/// A sized rectangle: a bar, an axis line, a tick or a spacer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBox {
    pub width_px: u32,
    pub height_px: u32,
    pub fill: Option<Fill>,
    /// Hover text.
    pub title: Option<String>,
    pub bevel: Bevel,
    /// Extra CSS appended to the generated style.
    pub extra_style: String,
    /// Absolute position inside an overlay, top-left corner.
    pub position: Option<(i64, i64)>,
}

impl BlockBox {
    #[must_use]
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            fill: None,
            title: None,
            bevel: Bevel::None,
            extra_style: String::new(),
            position: None,
        }
    }

    /// 1x1 invisible box that keeps a grid cell from collapsing.
    #[must_use]
    pub fn spacer() -> Self {
        Self::new(1, 1)
    }

    #[must_use]
    pub fn filled(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_bevel(mut self, bevel: Bevel) -> Self {
        self.bevel = bevel;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.extra_style = style.into();
        self
    }

    #[must_use]
    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.position = Some((x, y));
        self
    }

    #[must_use]
    pub fn is_spacer(&self) -> bool {
        self.width_px <= 1 && self.height_px <= 1 && self.fill.is_none() && self.title.is_none()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(fill) = &self.fill {
            fill.validate()?;
        }
        if self.extra_style.contains(['"', '<', '>']) {
            return Err(ChartError::InvalidData(
                "box style contains markup characters".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Polyline handed to the overlay drawing helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub color: Fill,
    pub stroke_width: u32,
}

impl Polyline {
    pub fn validate(&self) -> ChartResult<()> {
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "polyline coordinates must be finite".to_owned(),
            ));
        }
        if self.stroke_width == 0 {
            return Err(ChartError::InvalidData(
                "polyline stroke width must be > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
