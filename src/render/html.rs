use std::fmt::Write;

use crate::error::ChartResult;
use crate::render::{
    BlockBox, CellNode, Fill, HAlign, LayoutFrame, Node, OverlayNode, Renderer, TableNode,
    TextRun, VAlign,
};

/// Style of `compact` cells: nothing but the boxes contributes to their size.
const COMPACT_CELL_STYLE: &str =
    "font-size:1px;margin:0px;padding:0px;border-width:0px;line-height:0px;";

/// Markup emitted instead of a chart when no row was appended.
pub const EMPTY_GRAPH_MARKUP: &str = "<table><tr><td><tt>[empty graph]</tt></td></tr></table>\n";

/// Writes the box tree as nested HTML tables and divs.
///
/// Output is deterministic: the same frame always produces the same bytes.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    markup: String,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last rendered frame.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl Renderer for HtmlRenderer {
    fn render(&mut self, frame: &LayoutFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut out = String::new();
        match &frame.root {
            Some(root) => write_node(&mut out, root)?,
            None => out.push_str(EMPTY_GRAPH_MARKUP),
        }
        self.markup = out;
        Ok(())
    }
}

fn write_node(out: &mut String, node: &Node) -> ChartResult<()> {
    match node {
        Node::Table(table) => write_table(out, table),
        Node::Block(block) => write_block(out, block),
        Node::Text(text) => write_text(out, text),
        Node::Overlay(overlay) => write_overlay(out, overlay),
    }
}

fn write_table(out: &mut String, table: &TableNode) -> ChartResult<()> {
    write!(
        out,
        "<table border=\"{}\" cellpadding=\"{}\" cellspacing=\"{}\"",
        table.border, table.padding, table.spacing
    )?;
    if let Some(width) = table.width_px {
        write!(out, " width=\"{width}\"")?;
    }
    if let Some(height) = table.height_px {
        write!(out, " height=\"{height}\"")?;
    }
    match &table.background {
        Some(Fill::Image(src)) => write!(
            out,
            " style=\"background-image:url('{}');\"",
            escape(src)
        )?,
        Some(Fill::Color(color)) => write!(out, " bgcolor=\"{}\"", escape(color))?,
        None => {}
    }
    out.push_str(">\n");

    for row in &table.rows {
        out.push_str("<tr");
        if let Some(height) = row.height_px {
            write!(out, " height=\"{height}\"")?;
        }
        out.push('>');
        for cell in &row.cells {
            write_cell(out, cell)?;
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    Ok(())
}

fn write_cell(out: &mut String, cell: &CellNode) -> ChartResult<()> {
    let tag = if cell.header { "th" } else { "td" };
    write!(out, "<{tag}")?;
    if cell.colspan > 1 {
        write!(out, " colspan=\"{}\"", cell.colspan)?;
    }
    if cell.rowspan > 1 {
        write!(out, " rowspan=\"{}\"", cell.rowspan)?;
    }
    if let Some(width) = cell.width_px {
        write!(out, " width=\"{width}\"")?;
    }
    if let Some(height) = cell.height_px {
        write!(out, " height=\"{height}\"")?;
    }
    if let Some(valign) = cell.valign {
        let valign = match valign {
            VAlign::Top => "top",
            VAlign::Bottom => "bottom",
        };
        write!(out, " valign=\"{valign}\"")?;
    }
    if let Some(align) = cell.align {
        write!(out, " align=\"{}\"", align_name(align))?;
    }
    if cell.nowrap {
        out.push_str(" nowrap");
    }
    match &cell.background {
        Some(Fill::Image(src)) => write!(
            out,
            " style=\"background-image:url('{}');\"",
            escape(src)
        )?,
        Some(Fill::Color(color)) => write!(out, " bgcolor=\"{}\"", escape(color))?,
        None if cell.compact => write!(out, " style=\"{COMPACT_CELL_STYLE}\"")?,
        None => {}
    }
    out.push('>');
    for child in &cell.children {
        write_node(out, child)?;
    }
    writeln!(out, "</{tag}>")?;
    Ok(())
}

fn write_block(out: &mut String, block: &BlockBox) -> ChartResult<()> {
    out.push_str("<div");
    if let Some(title) = &block.title {
        write!(out, " title=\"{}\"", escape(title))?;
    }
    out.push_str(" style=\"");
    if let Some((x, y)) = block.position {
        write!(out, "position:absolute;left:{x}px;top:{y}px;")?;
    } else if block.title.is_some() {
        out.push_str("position:relative;cursor:pointer;");
    }
    write!(
        out,
        "overflow:hidden;width:{}px;height:{}px;{}{}",
        block.width_px,
        block.height_px,
        block.extra_style,
        block.bevel.css()
    )?;
    match &block.fill {
        Some(Fill::Color(color)) => {
            write!(out, "background-color:{};\">", escape(color))?;
        }
        Some(Fill::Image(src)) => {
            write!(
                out,
                "\"><img src=\"{}\" width=\"{}\" height=\"{}\" border=\"0\" alt=\"\">",
                escape(src),
                block.width_px,
                block.height_px
            )?;
        }
        None => out.push_str("\">"),
    }
    out.push_str("</div>");
    Ok(())
}

fn write_text(out: &mut String, text: &TextRun) -> ChartResult<()> {
    out.push_str("<div");
    if let Some(align) = text.align {
        write!(out, " align=\"{}\"", align_name(align))?;
    }
    out.push_str(" style=\"");
    if text.padding_px > 0 {
        write!(out, "padding:{}px;", text.padding_px)?;
    }
    write!(
        out,
        "font-family:{};font-size:{}px;",
        escape(&text.style.font),
        text.style.size_px
    )?;
    if !text.style.color.is_empty() {
        write!(out, "color:{};", escape(&text.style.color))?;
    }
    out.push_str("\">");
    for (index, line) in text.lines.iter().enumerate() {
        if index > 0 {
            out.push_str("<br>\n");
        }
        out.push_str(&escape(line));
    }
    out.push_str("</div>");
    Ok(())
}

fn write_overlay(out: &mut String, overlay: &OverlayNode) -> ChartResult<()> {
    write!(
        out,
        "<div id=\"{}\" style=\"position:absolute;z-index:1;width:{}px;height:{}px;\">",
        escape(&overlay.id),
        overlay.width_px,
        overlay.height_px
    )?;
    for polyline in &overlay.polylines {
        let points = polyline
            .points
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            out,
            "<div class=\"trend-line\" data-color=\"{}\" data-stroke=\"{}\" data-points=\"{}\"></div>",
            escape(polyline.color.value()),
            polyline.stroke_width,
            points
        )?;
    }
    for marker in &overlay.markers {
        write_block(out, marker)?;
    }
    out.push_str("</div>\n");
    Ok(())
}

fn align_name(align: HAlign) -> &'static str {
    match align {
        HAlign::Left => "left",
        HAlign::Center => "center",
        HAlign::Right => "right",
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
