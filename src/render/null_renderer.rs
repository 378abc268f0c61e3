use crate::error::ChartResult;
use crate::render::{LayoutFrame, Node, Renderer};

/// No-op renderer used by tests and headless builds.
///
/// It still validates the frame and records what a real backend would draw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_block_count: usize,
    pub last_text_count: usize,
    pub last_overlay_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &LayoutFrame) -> ChartResult<()> {
        frame.validate()?;
        let (mut blocks, mut texts, mut overlays) = (0, 0, 0);
        frame.walk(&mut |node| match node {
            Node::Block(_) => blocks += 1,
            Node::Text(_) => texts += 1,
            Node::Overlay(_) => overlays += 1,
            Node::Table(_) => {}
        });
        self.last_block_count = blocks;
        self.last_text_count = texts;
        self.last_overlay_count = overlays;
        Ok(())
    }
}
