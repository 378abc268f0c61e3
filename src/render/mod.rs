mod frame;
mod html;
mod null_renderer;
mod primitives;

pub use frame::{CellNode, LayoutFrame, Node, OverlayNode, RowNode, TableNode};
pub use html::{EMPTY_GRAPH_MARKUP, HtmlRenderer};
pub use null_renderer::NullRenderer;
pub use primitives::{BlockBox, Bevel, Fill, HAlign, Polyline, TextRun, TextStyle, VAlign};

use crate::error::ChartResult;

/// Contract implemented by any markup backend.
///
/// Backends receive a fully materialized, deterministic `LayoutFrame` so
/// emission code stays isolated from the scaling and planning logic.
pub trait Renderer {
    fn render(&mut self, frame: &LayoutFrame) -> ChartResult<()>;
}
