use std::io::Write;

use tracing::debug;

use crate::api::config::{
    BandStyles, FrameStyle, GraphConfig, GraphDefaults, LineOverlay, Presentation, WindOptions,
};
use crate::api::layout::LayoutEmitter;
use crate::api::overrides::TextOverrides;
use crate::api::pipeline::{BuildPlan, plan_build};
use crate::api::snapshot::PlanSnapshot;
use crate::core::{SeriesMatrix, Viewport, XScale};
use crate::error::{ChartError, ChartResult};
use crate::render::{Bevel, Fill, HtmlRenderer, LayoutFrame, Renderer, TextStyle};

/// One chart: its rows, its look, and the markup of its last deferred build.
#[derive(Debug, Clone)]
pub struct Graph {
    config: GraphConfig,
    viewport: Viewport,
    negative_bars: bool,
    table_borders: bool,
    overrides: TextOverrides,
    presentation: Presentation,
    matrix: SeriesMatrix,
    markup: Option<String>,
}

impl Graph {
    /// Creates an empty chart. Ambient settings are copied from `defaults`;
    /// later changes to `defaults` do not reach this chart.
    #[must_use]
    pub fn new(config: GraphConfig, defaults: &GraphDefaults) -> Self {
        let viewport = config.resolve_viewport(defaults);
        let negative_bars = if config.external {
            config.negative_bars
        } else {
            defaults.negative_bars
        };
        Self {
            matrix: SeriesMatrix::new(config.unit_mode),
            viewport,
            negative_bars,
            table_borders: defaults.table_borders,
            overrides: defaults.text_overrides.clone(),
            presentation: Presentation::from_defaults(defaults),
            markup: None,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn negative_bars(&self) -> bool {
        self.negative_bars
    }

    #[must_use]
    pub fn matrix(&self) -> &SeriesMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    /// Appends one series. See [`SeriesMatrix::append_row`].
    pub fn append_row(&mut self, values: &[f64]) -> ChartResult<()> {
        self.matrix.append_row(values)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.presentation.title = Some(title.into());
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.presentation.x_label = Some(label.into());
    }

    /// Unit label; also appended to every hover text.
    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.presentation.y_label = Some(label.into());
    }

    pub fn set_legends<I, S>(&mut self, legends: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presentation.legends = legends.into_iter().map(Into::into).collect();
    }

    /// Per-series fills of bars above the baseline, as colours or image paths.
    pub fn set_bar_fills(&mut self, fills: &[&str]) -> ChartResult<()> {
        self.presentation.bar_fills = parse_fills(fills)?;
        Ok(())
    }

    pub fn set_negative_fills(&mut self, fills: &[&str]) -> ChartResult<()> {
        self.presentation.negative_fills = parse_fills(fills)?;
        Ok(())
    }

    pub fn set_title_style(&mut self, style: TextStyle) -> ChartResult<()> {
        style.validate()?;
        self.presentation.title_style = style;
        Ok(())
    }

    /// Axis label style. Its size also decides whether the scale is legible.
    pub fn set_axis_style(&mut self, style: TextStyle) -> ChartResult<()> {
        style.validate()?;
        self.presentation.axis_style = style;
        Ok(())
    }

    pub fn set_wind_options(&mut self, options: WindOptions) {
        self.presentation.wind = options;
    }

    pub fn set_line_overlay(&mut self, overlay: LineOverlay) {
        self.presentation.line_overlay = overlay;
    }

    /// Draws a two-series chart as one max/min bar per category.
    pub fn set_max_min(&mut self, enabled: bool) {
        self.presentation.max_min = enabled;
    }

    pub fn set_bevel(&mut self, bevel: Bevel) {
        self.presentation.bevel = bevel;
    }

    pub fn set_frame(&mut self, frame: FrameStyle) -> ChartResult<()> {
        if let Some(background) = &frame.background {
            background.validate()?;
        }
        self.presentation.frame = frame;
        Ok(())
    }

    pub fn set_grid_color(&mut self, color: impl Into<String>) -> ChartResult<()> {
        let color = color.into();
        Fill::Color(color.clone()).validate()?;
        self.presentation.grid_color = Some(color);
        Ok(())
    }

    pub fn set_band_styles(&mut self, styles: BandStyles) {
        self.presentation.band_styles = styles;
    }

    pub fn set_show_negative_scale(&mut self, show: bool) {
        self.presentation.show_negative_scale = show;
    }

    pub fn set_x_scale(&mut self, scale: XScale) {
        self.presentation.x_scale = Some(scale);
    }

    /// Geometry of a build from the current rows; `None` for an empty chart.
    pub fn plan(&self) -> ChartResult<Option<BuildPlan>> {
        plan_build(
            &self.matrix,
            &self.config,
            self.viewport,
            self.negative_bars,
            &self.presentation,
        )
    }

    /// Box tree of a build. An empty chart has no root.
    pub fn layout_frame(&self) -> ChartResult<LayoutFrame> {
        let Some(plan) = self.plan()? else {
            debug!("layout of empty chart");
            return Ok(LayoutFrame::new(self.viewport));
        };
        let emitter = LayoutEmitter::new(
            &self.config,
            &self.presentation,
            &self.overrides,
            &plan,
            self.table_borders,
            self.negative_bars,
        );
        Ok(emitter.emit())
    }

    /// Renders the current rows with any [`Renderer`].
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.layout_frame()?;
        renderer.render(&frame)
    }

    /// Markup of a build without storing or writing it.
    pub fn render_markup(&self) -> ChartResult<String> {
        let mut renderer = HtmlRenderer::new();
        self.render_with(&mut renderer)?;
        Ok(renderer.into_markup())
    }

    /// Builds the chart. Deferred charts keep the markup for [`Graph::markup`];
    /// others write it to `sink`.
    pub fn build<W: Write>(&mut self, sink: &mut W) -> ChartResult<()> {
        debug!(
            series = self.matrix.series_count(),
            samples = self.matrix.sample_count(),
            deferred = self.config.deferred,
            "building chart"
        );
        let markup = self.render_markup()?;
        if self.config.deferred {
            self.markup = Some(markup);
        } else {
            sink.write_all(markup.as_bytes())?;
            sink.flush()?;
        }
        Ok(())
    }

    /// Markup stored by the last deferred build.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn take_markup(&mut self) -> Option<String> {
        self.markup.take()
    }

    pub fn plan_snapshot(&self) -> ChartResult<Option<PlanSnapshot>> {
        Ok(self.plan()?.as_ref().map(PlanSnapshot::from))
    }

    pub fn plan_snapshot_json_pretty(&self) -> ChartResult<String> {
        let snapshot = self
            .plan_snapshot()?
            .ok_or_else(|| ChartError::InvalidData("chart has no rows".to_owned()))?;
        snapshot.to_json_pretty()
    }
}

fn parse_fills(fills: &[&str]) -> ChartResult<Vec<Fill>> {
    fills
        .iter()
        .map(|spec| {
            let fill = Fill::parse(spec);
            fill.validate()?;
            Ok(fill)
        })
        .collect()
}
