//! Turns a [`BuildPlan`] into the box tree of one chart.
//!
//! Grid columns, left to right: optional y label, three axis columns (labels,
//! ticks, axis line), one column per bar slot, two legend columns. Cells that
//! span several rows (y label, axis columns, legend) are only emitted in the
//! first row they cover.

use crate::api::config::{GraphConfig, Presentation};
use crate::api::overrides::TextOverrides;
use crate::api::pipeline::BuildPlan;
use crate::core::axis::AXIS_HEADROOM_PX;
use crate::core::{
    BandPlan, BarCell, HoverValue, PlannedCell, Polarity, TickLabel, display_lines,
    format_sample, negative_ticks, positive_ticks,
};
use crate::render::{
    BlockBox, CellNode, Fill, HAlign, LayoutFrame, Node, OverlayNode, Polyline, RowNode,
    TableNode, TextRun, TextStyle, VAlign,
};

const AXIS_COLUMNS: u32 = 3;
const LEGEND_COLUMNS: u32 = 2;
const TITLE_ROW_PX: u32 = 20;
const Y_LABEL_WIDTH_PX: u32 = 20;
const TICK_WIDTH_PX: u32 = 6;
const X_TICK_PX: u32 = 10;
const MARKER_PX: u32 = 6;
const SWATCH_PX: u32 = 10;
const FRAME_PADDING_PX: u32 = 5;
const FALLBACK_FILL: &str = "#FF0000";
const WARNING_FILL: &str = "#FF0000";
pub const TREND_OVERLAY_ID: &str = "wx-trend-overlay";
pub const SCALE_WARNING: [&str; 2] = [
    "'Y' Scale too big to display units!",
    "Reduce the axis font size or increase the graph height.",
];

pub(crate) struct LayoutEmitter<'a> {
    config: &'a GraphConfig,
    presentation: &'a Presentation,
    overrides: &'a TextOverrides,
    plan: &'a BuildPlan,
    table_border: u32,
    negative_bars: bool,
    line_fill: Fill,
    category_labels: Option<Vec<String>>,
}

impl<'a> LayoutEmitter<'a> {
    pub(crate) fn new(
        config: &'a GraphConfig,
        presentation: &'a Presentation,
        overrides: &'a TextOverrides,
        plan: &'a BuildPlan,
        table_borders: bool,
        negative_bars: bool,
    ) -> Self {
        let category_labels = presentation
            .x_scale
            .as_ref()
            .map(|scale| scale.labels(plan.working.sample_count(), config.time24));
        Self {
            config,
            presentation,
            overrides,
            plan,
            table_border: u32::from(table_borders),
            negative_bars,
            line_fill: Fill::parse(&config.line_color),
            category_labels,
        }
    }

    pub(crate) fn emit(&self) -> LayoutFrame {
        let mut chart = TableNode::new(self.table_border, self.table_border * 2);

        if let Some(row) = self.title_row() {
            chart.rows.push(row);
        }
        chart.rows.push(self.positive_row());
        chart.rows.push(self.baseline_row());

        match &self.plan.bars.negative {
            None => {
                if let Some(rows) = self.x_scale_rows(true) {
                    chart.rows.extend(rows);
                }
            }
            Some(band) => {
                chart.rows.push(self.negative_row(band));
                if self.negative_scale_shown() {
                    if let Some(rows) = self.x_scale_rows(false) {
                        chart.rows.extend(rows);
                    }
                }
            }
        }

        if let Some(row) = self.x_label_row() {
            chart.rows.push(row);
        }
        if self.plan.axis.scale_too_big {
            chart.rows.push(self.warning_row());
        }

        LayoutFrame::new(self.plan.viewport).with_root(Node::Table(self.framed(chart)))
    }

    fn data_columns(&self) -> u32 {
        self.plan.bars.positive.slot_count() as u32
    }

    fn leading_columns(&self) -> u32 {
        AXIS_COLUMNS + u32::from(self.presentation.y_label.is_some())
    }

    fn leading_spacer(&self) -> CellNode {
        CellNode::spacer().span(self.leading_columns(), 1)
    }

    fn legend_spacer(&self) -> Option<CellNode> {
        self.has_legend()
            .then(|| CellNode::spacer().span(LEGEND_COLUMNS, 1))
    }

    fn negative_scale_shown(&self) -> bool {
        self.plan.axis.has_negative_band()
            && self.negative_bars
            && self.presentation.show_negative_scale
    }

    fn title_style(&self) -> TextStyle {
        self.presentation.title_style.clone()
    }

    fn axis_style(&self) -> TextStyle {
        self.presentation.axis_style.clone()
    }

    fn title_row(&self) -> Option<RowNode> {
        let title = self.presentation.title.as_deref()?;
        let text = self.overrides.resolve_title(title);
        let mut row = RowNode::default();
        row.push(self.leading_spacer().sized(None, Some(TITLE_ROW_PX)));
        row.push(
            CellNode::header()
                .span(self.data_columns(), 1)
                .sized(None, Some(TITLE_ROW_PX))
                .aligned(Some(VAlign::Top), None)
                .with_child(Node::Text(TextRun::new(self.title_style(), text))),
        );
        if let Some(spacer) = self.legend_spacer() {
            row.push(spacer);
        }
        Some(row)
    }

    fn y_label_cell(&self) -> Option<CellNode> {
        let label = self.presentation.y_label.as_deref()?;
        let text = self
            .overrides
            .resolve_axis_label(self.presentation.title.as_deref(), label);
        let lines = text.split(' ').map(str::to_owned).collect();
        let rows = 2 + u32::from(self.plan.bars.negative.is_some());
        Some(
            CellNode::header()
                .span(1, rows)
                .sized(Some(Y_LABEL_WIDTH_PX), None)
                .aligned(None, Some(HAlign::Left))
                .nowrap()
                .with_child(Node::Text(
                    TextRun::with_lines(self.title_style(), lines).padded(2),
                )),
        )
    }

    fn positive_row(&self) -> RowNode {
        let mut row = RowNode::default();
        if let Some(cell) = self.y_label_cell() {
            row.push(cell);
        }
        row.cells.extend(self.positive_axis_cells());

        let band = &self.plan.bars.positive;
        let valign = if self.presentation.line_overlay.enabled {
            VAlign::Top
        } else {
            VAlign::Bottom
        };
        let mut overlay = self.overlay_node();
        for planned in band.cells() {
            let mut cell = CellNode::new()
                .sized(Some(band.slot_width_px), None)
                .aligned(Some(valign), Some(HAlign::Left))
                .compact();
            if let Some(overlay) = overlay.take() {
                cell.push(Node::Overlay(overlay));
            }
            cell.push(self.planned_node(planned));
            row.push(cell);
        }

        if let Some(cell) = self.legend_cell() {
            row.push(cell);
        }
        row
    }

    fn baseline_row(&self) -> RowNode {
        let band = &self.plan.bars.positive;
        let width = band.width_px().saturating_add(2);
        RowNode::with_height(1).with_cell(
            CellNode::new()
                .span(self.data_columns(), 1)
                .sized(None, Some(1))
                .aligned(Some(VAlign::Bottom), Some(HAlign::Left))
                .compact()
                .with_child(Node::Block(
                    BlockBox::new(width, 1).filled(self.line_fill.clone()),
                )),
        )
    }

    fn negative_row(&self, band: &BandPlan) -> RowNode {
        let mut row = RowNode::default();
        row.cells.extend(self.negative_axis_cells());
        for planned in band.cells() {
            row.push(
                CellNode::new()
                    .sized(Some(band.slot_width_px), None)
                    .aligned(Some(VAlign::Top), Some(HAlign::Left))
                    .compact()
                    .with_child(self.planned_node(planned)),
            );
        }
        row
    }

    fn positive_axis_cells(&self) -> [CellNode; 3] {
        let axis = &self.plan.axis;
        if axis.scale_too_big {
            return std::array::from_fn(|_| CellNode::spacer().span(1, 2));
        }
        let compass = self.config.wind && self.presentation.wind.compass_labels;
        let ticks = positive_ticks(
            axis,
            self.plan.selection.offset,
            self.config.unit_mode,
            compass,
        );
        let band_px = axis.tick_band_px as u32;

        let mut labels = TableNode::new(self.table_border, 0);
        for (index, tick) in ticks.iter().enumerate() {
            let height = if index == 0 { AXIS_HEADROOM_PX } else { band_px };
            labels.rows.push(RowNode::default().with_cell(self.tick_label_cell(tick, height)));
        }

        let intervals = ticks.len().saturating_sub(1);
        let mut marks = TableNode::new(0, 0);
        for index in 0..=intervals {
            marks
                .rows
                .push(RowNode::default().with_cell(self.tick_mark_cell(index < intervals)));
            if index < intervals {
                marks.rows.push(
                    RowNode::default().with_cell(tick_gap_cell(band_px.saturating_sub(1))),
                );
            }
        }

        let line_height = axis.paxis_height as u32;
        [
            CellNode::new()
                .span(1, 2)
                .aligned(Some(VAlign::Bottom), Some(HAlign::Right))
                .with_child(Node::Table(labels)),
            CellNode::new()
                .span(1, 2)
                .aligned(Some(VAlign::Bottom), Some(HAlign::Right))
                .compact()
                .with_child(Node::Table(marks)),
            CellNode::new()
                .span(1, 2)
                .sized(Some(2), Some(line_height + AXIS_HEADROOM_PX))
                .aligned(Some(VAlign::Bottom), Some(HAlign::Left))
                .compact()
                .with_child(Node::Block(
                    BlockBox::new(1, line_height).filled(self.line_fill.clone()),
                )),
        ]
    }

    fn negative_axis_cells(&self) -> [CellNode; 3] {
        let axis = &self.plan.axis;
        if !axis.negative_axis_legible() || axis.scale_too_big {
            return std::array::from_fn(|_| CellNode::spacer());
        }
        let ticks = negative_ticks(axis, self.plan.selection.offset, self.config.unit_mode);
        let band_px = axis.tick_band_px as u32;

        let mut labels = TableNode::new(self.table_border, 0);
        let mut marks = TableNode::new(0, 0);
        for tick in &ticks {
            labels
                .rows
                .push(RowNode::default().with_cell(self.tick_label_cell(tick, band_px)));
            marks.rows.push(
                RowNode::default().with_cell(tick_gap_cell(band_px.saturating_sub(1))),
            );
            marks
                .rows
                .push(RowNode::default().with_cell(self.tick_mark_cell(true)));
        }

        let line_height = axis.naxis_height as u32;
        [
            CellNode::new()
                .aligned(Some(VAlign::Top), Some(HAlign::Right))
                .with_child(Node::Table(labels)),
            CellNode::new()
                .aligned(Some(VAlign::Top), Some(HAlign::Right))
                .compact()
                .with_child(Node::Table(marks)),
            CellNode::new()
                .sized(Some(2), None)
                .aligned(Some(VAlign::Top), Some(HAlign::Left))
                .compact()
                .with_child(Node::Block(
                    BlockBox::new(1, line_height).filled(self.line_fill.clone()),
                )),
        ]
    }

    fn tick_label_cell(&self, tick: &TickLabel, height_px: u32) -> CellNode {
        CellNode::new()
            .sized(None, Some(height_px))
            .aligned(Some(VAlign::Bottom), Some(HAlign::Right))
            .nowrap()
            .with_child(Node::Text(
                TextRun::new(self.axis_style(), tick.text.clone()).aligned(HAlign::Right),
            ))
    }

    fn tick_mark_cell(&self, with_grid: bool) -> CellNode {
        let mut cell = CellNode::new()
            .sized(Some(TICK_WIDTH_PX), Some(1))
            .compact()
            .with_child(Node::Block(
                BlockBox::new(TICK_WIDTH_PX, 1).filled(self.line_fill.clone()),
            ));
        if with_grid {
            if let Some(color) = &self.presentation.grid_color {
                let band = &self.plan.bars.positive;
                let width = band.width_px().saturating_add(TICK_WIDTH_PX + 2);
                cell.push(Node::Block(
                    BlockBox::new(width, 1)
                        .filled(Fill::parse(color))
                        .with_style("position:absolute;"),
                ));
            }
        }
        cell
    }

    /// Tick and label rows under a band. `legend_covers_first` is set when the
    /// legend's row span already reaches the tick row.
    fn x_scale_rows(&self, legend_covers_first: bool) -> Option<[RowNode; 2]> {
        let scale = self.presentation.x_scale.as_ref()?;
        let labels = self.category_labels.as_ref()?;
        let skip = scale.skip();
        let per_category = if self.plan.max_min {
            1
        } else {
            self.plan.working.series_count()
        };

        let mut ticks = RowNode::default().with_cell(self.leading_spacer());
        let mut texts = RowNode::default().with_cell(self.leading_spacer());
        for start in (0..labels.len()).step_by(skip) {
            let categories = skip.min(labels.len() - start);
            let colspan = (categories * per_category) as u32;
            ticks.push(
                CellNode::new()
                    .span(colspan, 1)
                    .aligned(Some(VAlign::Top), Some(HAlign::Left))
                    .compact()
                    .with_child(Node::Block(
                        BlockBox::new(1, X_TICK_PX).filled(self.line_fill.clone()),
                    )),
            );
            texts.push(
                CellNode::new()
                    .span(colspan, 1)
                    .aligned(Some(VAlign::Top), Some(HAlign::Left))
                    .with_child(Node::Text(TextRun::with_lines(
                        self.axis_style(),
                        display_lines(&labels[start]),
                    ))),
            );
        }
        if !legend_covers_first {
            if let Some(spacer) = self.legend_spacer() {
                ticks.push(spacer);
            }
        }
        if let Some(spacer) = self.legend_spacer() {
            texts.push(spacer);
        }
        Some([ticks, texts])
    }

    fn x_label_row(&self) -> Option<RowNode> {
        let label = self.presentation.x_label.as_deref()?;
        let mut row = RowNode::default().with_cell(self.leading_spacer());
        row.push(
            CellNode::header()
                .span(self.data_columns(), 1)
                .sized(None, Some(TITLE_ROW_PX))
                .with_child(Node::Text(TextRun::new(self.title_style(), label))),
        );
        if let Some(spacer) = self.legend_spacer() {
            row.push(spacer);
        }
        Some(row)
    }

    fn warning_row(&self) -> RowNode {
        let lines = SCALE_WARNING.iter().map(|line| (*line).to_owned()).collect();
        let banner = TableNode::wrapping(
            1,
            3,
            CellNode::header().with_child(Node::Text(
                TextRun::with_lines(self.title_style(), lines).aligned(HAlign::Center),
            )),
        )
        .with_background(Some(Fill::Color(WARNING_FILL.to_owned())));

        let mut row = RowNode::default().with_cell(self.leading_spacer());
        row.push(
            CellNode::new()
                .span(self.data_columns(), 1)
                .aligned(None, Some(HAlign::Center))
                .with_child(Node::Table(banner)),
        );
        if let Some(spacer) = self.legend_spacer() {
            row.push(spacer);
        }
        row
    }

    fn legend_entries(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let series_count = self.plan.working.series_count();
        self.presentation
            .legends
            .iter()
            .enumerate()
            .take(series_count)
            .filter(|(_, text)| !text.is_empty())
            .map(|(series, text)| (series, text.as_str()))
    }

    fn has_legend(&self) -> bool {
        self.legend_entries().next().is_some()
    }

    fn legend_cell(&self) -> Option<CellNode> {
        let mut entries = TableNode::new(self.table_border, 2);
        for (series, text) in self.legend_entries() {
            let swatch = BlockBox::new(SWATCH_PX, SWATCH_PX)
                .filled(series_fill(&self.presentation.bar_fills, series));
            entries.rows.push(
                RowNode::default()
                    .with_cell(
                        CellNode::new()
                            .aligned(None, Some(HAlign::Center))
                            .with_child(Node::Block(swatch)),
                    )
                    .with_cell(
                        CellNode::new()
                            .nowrap()
                            .with_child(Node::Text(TextRun::new(self.axis_style(), text))),
                    ),
            );
        }
        if entries.rows.is_empty() {
            return None;
        }
        Some(
            CellNode::new()
                .span(LEGEND_COLUMNS, 3)
                .aligned(Some(VAlign::Top), Some(HAlign::Left))
                .with_child(Node::Table(TableNode::wrapping(
                    1,
                    0,
                    CellNode::new().with_child(Node::Table(entries)),
                ))),
        )
    }

    fn planned_node(&self, planned: &PlannedCell) -> Node {
        match planned {
            PlannedCell::Placeholder => Node::Block(BlockBox::spacer()),
            PlannedCell::Bar(bar) => self.bar_node(bar),
        }
    }

    fn bar_node(&self, bar: &BarCell) -> Node {
        let block = BlockBox::new(bar.width_px, bar.height_px)
            .filled(self.bar_fill(bar))
            .titled(self.hover_text(bar.series, bar.category, bar.hover))
            .with_bevel(self.presentation.bevel)
            .with_style(self.band_style(bar.polarity));

        let Some(lift_px) = bar.lift_px else {
            return Node::Block(block);
        };
        let valign = match bar.polarity {
            Polarity::Negative => VAlign::Bottom,
            Polarity::Positive | Polarity::MidRange => VAlign::Top,
        };
        let width = bar.width_px + 1;
        let height = lift_px.max(bar.height_px);
        Node::Table(
            TableNode::wrapping(
                0,
                0,
                CellNode::new()
                    .sized(Some(width), Some(height))
                    .aligned(Some(valign), Some(HAlign::Left))
                    .compact()
                    .with_child(Node::Block(block)),
            )
            .sized(Some(width), Some(height)),
        )
    }

    fn bar_fill(&self, bar: &BarCell) -> Fill {
        if self.config.wind {
            if let Some(image) = &self.presentation.wind.bar_image {
                return image.clone();
            }
        }
        let fills = match bar.polarity {
            Polarity::Negative => &self.presentation.negative_fills,
            Polarity::Positive | Polarity::MidRange => &self.presentation.bar_fills,
        };
        series_fill(fills, bar.series)
    }

    fn band_style(&self, polarity: Polarity) -> &str {
        let styles = &self.presentation.band_styles;
        match polarity {
            Polarity::Positive => &styles.positive,
            Polarity::Negative => &styles.negative,
            Polarity::MidRange => &styles.mid_range,
        }
    }

    /// `category: legend: value unit`, with the parts that are unset left out.
    fn hover_text(&self, series: usize, category: usize, hover: HoverValue) -> String {
        let mut text = String::new();
        if let Some(label) = self
            .category_labels
            .as_ref()
            .and_then(|labels| labels.get(category))
            .filter(|label| !label.is_empty())
        {
            text.push_str(label);
            text.push_str(": ");
        }
        if !self.plan.max_min {
            if let Some(legend) = self
                .presentation
                .legends
                .get(series)
                .filter(|legend| !legend.is_empty())
            {
                text.push_str(legend);
                text.push_str(": ");
            }
        }

        let offset = self.plan.selection.offset;
        let unit_mode = self.config.unit_mode;
        match hover {
            HoverValue::Single(value) => text.push_str(&format_sample(value + offset, unit_mode)),
            HoverValue::Range { min, max } => {
                text.push_str(&format_sample(min + offset, unit_mode));
                text.push_str(" to ");
                text.push_str(&format_sample(max + offset, unit_mode));
            }
        }

        if let Some(unit) = self.presentation.y_label.as_deref() {
            text.push(' ');
            text.push_str(unit);
        }
        text
    }

    fn overlay_node(&self) -> Option<OverlayNode> {
        let trend = self.plan.trend.as_ref()?;
        let half = i64::from(MARKER_PX / 2);
        let stroke_width = self.presentation.line_overlay.width_px.max(1);

        let mut markers = Vec::new();
        let mut polylines = Vec::new();
        for line in &trend.lines {
            let fill = series_fill(&self.presentation.bar_fills, line.series);
            for point in &line.points {
                markers.push(
                    BlockBox::new(MARKER_PX, MARKER_PX)
                        .filled(fill.clone())
                        .titled(self.hover_text(
                            line.series,
                            point.category,
                            HoverValue::Single(point.value),
                        ))
                        .with_style("cursor:pointer;")
                        .at(point.x as i64 - half, point.y as i64 - half),
                );
            }
            for run in line.runs().into_iter().filter(|run| run.len() > 1) {
                polylines.push(Polyline {
                    points: run.iter().map(|point| (point.x, point.y)).collect(),
                    color: fill.clone(),
                    stroke_width,
                });
            }
        }

        Some(OverlayNode {
            id: TREND_OVERLAY_ID.to_owned(),
            width_px: trend.width_px,
            height_px: trend.height_px,
            markers,
            polylines,
        })
    }

    fn framed(&self, chart: TableNode) -> TableNode {
        let frame = &self.presentation.frame;
        if !frame.is_visible() {
            return chart;
        }
        TableNode::wrapping(
            frame.border,
            FRAME_PADDING_PX,
            CellNode::new()
                .aligned(None, Some(HAlign::Center))
                .with_background(frame.background.clone())
                .with_child(Node::Table(chart)),
        )
        .sized(frame.width_px, None)
    }
}

fn tick_gap_cell(height_px: u32) -> CellNode {
    CellNode::new()
        .sized(Some(TICK_WIDTH_PX), Some(height_px))
        .compact()
        .with_child(Node::Block(BlockBox::spacer()))
}

fn series_fill(fills: &[Fill], series: usize) -> Fill {
    fills
        .get(series)
        .or_else(|| fills.first())
        .cloned()
        .unwrap_or_else(|| Fill::Color(FALLBACK_FILL.to_owned()))
}
