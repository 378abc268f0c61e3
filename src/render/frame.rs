use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{BlockBox, Fill, HAlign, Polyline, TextRun, VAlign};

/// Node of the box tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Table(TableNode),
    Block(BlockBox),
    Text(TextRun),
    Overlay(OverlayNode),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableNode {
    pub border: u32,
    pub padding: u32,
    pub spacing: u32,
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
    pub background: Option<Fill>,
    pub rows: Vec<RowNode>,
}

impl TableNode {
    #[must_use]
    pub fn new(border: u32, padding: u32) -> Self {
        Self {
            border,
            padding,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sized(mut self, width_px: Option<u32>, height_px: Option<u32>) -> Self {
        self.width_px = width_px;
        self.height_px = height_px;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Option<Fill>) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: RowNode) -> Self {
        self.rows.push(row);
        self
    }

    /// Single-cell table wrapping `cell`.
    #[must_use]
    pub fn wrapping(border: u32, padding: u32, cell: CellNode) -> Self {
        Self::new(border, padding).with_row(RowNode::default().with_cell(cell))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowNode {
    pub height_px: Option<u32>,
    pub cells: Vec<CellNode>,
}

impl RowNode {
    #[must_use]
    pub fn with_height(height_px: u32) -> Self {
        Self {
            height_px: Some(height_px),
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cell(mut self, cell: CellNode) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn push(&mut self, cell: CellNode) {
        self.cells.push(cell);
    }
}

/// One grid cell. `compact` strips font size, padding and line height so
/// the cell is exactly as tall as its boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellNode {
    pub header: bool,
    pub colspan: u32,
    pub rowspan: u32,
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
    pub valign: Option<VAlign>,
    pub align: Option<HAlign>,
    pub nowrap: bool,
    pub compact: bool,
    pub background: Option<Fill>,
    pub children: Vec<Node>,
}

impl Default for CellNode {
    fn default() -> Self {
        Self {
            header: false,
            colspan: 1,
            rowspan: 1,
            width_px: None,
            height_px: None,
            valign: None,
            align: None,
            nowrap: false,
            compact: false,
            background: None,
            children: Vec::new(),
        }
    }
}

impl CellNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header() -> Self {
        Self {
            header: true,
            ..Self::default()
        }
    }

    /// Empty cell holding a 1x1 spacer.
    #[must_use]
    pub fn spacer() -> Self {
        Self::new().with_child(Node::Block(BlockBox::spacer()))
    }

    #[must_use]
    pub fn span(mut self, colspan: u32, rowspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self.rowspan = rowspan.max(1);
        self
    }

    #[must_use]
    pub fn sized(mut self, width_px: Option<u32>, height_px: Option<u32>) -> Self {
        self.width_px = width_px;
        self.height_px = height_px;
        self
    }

    #[must_use]
    pub fn aligned(mut self, valign: Option<VAlign>, align: Option<HAlign>) -> Self {
        self.valign = valign;
        self.align = align;
        self
    }

    #[must_use]
    pub fn nowrap(mut self) -> Self {
        self.nowrap = true;
        self
    }

    #[must_use]
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Option<Fill>) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }
}

/// Absolutely positioned layer drawn above the bar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayNode {
    pub id: String,
    pub width_px: u32,
    pub height_px: u32,
    pub markers: Vec<BlockBox>,
    pub polylines: Vec<Polyline>,
}

/// Complete box tree of one chart build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub viewport: Viewport,
    pub root: Option<Node>,
}

impl LayoutFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            root: None,
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: Node) -> Self {
        self.root = Some(root);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let mut result = Ok(());
        self.walk(&mut |node| {
            if result.is_err() {
                return;
            }
            result = match node {
                Node::Block(block) => block.validate(),
                Node::Text(text) => text.validate(),
                Node::Overlay(overlay) => overlay
                    .markers
                    .iter()
                    .try_for_each(BlockBox::validate)
                    .and_then(|()| overlay.polylines.iter().try_for_each(Polyline::validate)),
                Node::Table(table) => match &table.background {
                    Some(fill) => fill.validate(),
                    None => Ok(()),
                },
            };
        });
        result
    }

    /// Visits every node depth-first, parents before children.
    pub fn walk(&self, visit: &mut impl FnMut(&Node)) {
        if let Some(root) = &self.root {
            walk_node(root, visit);
        }
    }

    /// Boxes that are not 1x1 spacers.
    #[must_use]
    pub fn visible_block_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if let Node::Block(block) = node {
                if !block.is_spacer() {
                    count += 1;
                }
            }
        });
        count
    }
}

fn walk_node(node: &Node, visit: &mut impl FnMut(&Node)) {
    visit(node);
    if let Node::Table(table) = node {
        for row in &table.rows {
            for cell in &row.cells {
                for child in &cell.children {
                    walk_node(child, visit);
                }
            }
        }
    }
}
