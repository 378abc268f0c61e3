use wx_boxchart::core::Viewport;
use wx_boxchart::render::{
    Bevel, BlockBox, CellNode, EMPTY_GRAPH_MARKUP, Fill, HAlign, HtmlRenderer, LayoutFrame, Node,
    NullRenderer, Renderer, RowNode, TableNode, TextRun, TextStyle, VAlign,
};
use wx_boxchart::error::ChartError;

fn frame_with(cell: CellNode) -> LayoutFrame {
    LayoutFrame::new(Viewport::new(100, 50)).with_root(Node::Table(TableNode::wrapping(0, 0, cell)))
}

#[test]
fn empty_frame_renders_placeholder() {
    let mut renderer = HtmlRenderer::new();
    renderer
        .render(&LayoutFrame::new(Viewport::new(100, 50)))
        .expect("render");
    assert_eq!(renderer.markup(), EMPTY_GRAPH_MARKUP);
}

#[test]
fn compact_cell_and_colour_block() {
    let cell = CellNode::new()
        .span(2, 1)
        .sized(Some(11), None)
        .aligned(Some(VAlign::Bottom), Some(HAlign::Left))
        .compact()
        .with_child(Node::Block(
            BlockBox::new(10, 40)
                .filled(Fill::parse("#FF0000"))
                .titled("3 C")
                .with_bevel(Bevel::Out),
        ));
    let mut renderer = HtmlRenderer::new();
    renderer.render(&frame_with(cell)).expect("render");
    let markup = renderer.into_markup();

    assert!(markup.starts_with("<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\">\n"));
    assert!(markup.contains(
        "<td colspan=\"2\" width=\"11\" valign=\"bottom\" align=\"left\" style=\"font-size:1px;"
    ));
    assert!(markup.contains("<div title=\"3 C\" style=\"position:relative;cursor:pointer;overflow:hidden;width:10px;height:40px;"));
    assert!(markup.contains("border-color:#DDDDDD #222222 #222222 #DDDDDD;"));
    assert!(markup.contains("background-color:#FF0000;\"></div>"));
}

#[test]
fn image_fill_and_text_lines() {
    let cell = CellNode::header()
        .with_child(Node::Block(BlockBox::new(4, 8).filled(Fill::parse("img/bar.gif"))))
        .with_child(Node::Text(
            TextRun::with_lines(
                TextStyle::new("Arial", 10, "#112233"),
                vec!["Mon".to_owned(), "3/4".to_owned()],
            )
            .aligned(HAlign::Center),
        ));
    let mut renderer = HtmlRenderer::new();
    renderer.render(&frame_with(cell)).expect("render");
    let markup = renderer.markup();

    assert!(markup.contains("<th>"));
    assert!(markup.contains("<img src=\"img/bar.gif\" width=\"4\" height=\"8\""));
    assert!(markup.contains(
        "<div align=\"center\" style=\"font-family:Arial;font-size:10px;color:#112233;\">Mon<br>\n3/4</div>"
    ));
}

#[test]
fn fill_parse_distinguishes_images_from_colours() {
    assert_eq!(Fill::parse("bar.gif"), Fill::Image("bar.gif".to_owned()));
    assert_eq!(Fill::parse("#00FF00"), Fill::Color("#00FF00".to_owned()));
    assert_eq!(Fill::parse(".hidden"), Fill::Color(".hidden".to_owned()));
    assert_eq!(Fill::parse("red"), Fill::Color("red".to_owned()));
}

#[test]
fn markup_characters_in_styles_are_rejected() {
    let cell = CellNode::new().with_child(Node::Block(
        BlockBox::new(1, 1).with_style("color:red\"><script>"),
    ));
    let err = HtmlRenderer::new()
        .render(&frame_with(cell))
        .expect_err("unsafe style should fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let bad_font = CellNode::new().with_child(Node::Text(TextRun::new(
        TextStyle::new("Arial;x", 10, ""),
        "t",
    )));
    assert!(HtmlRenderer::new().render(&frame_with(bad_font)).is_err());
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = HtmlRenderer::new()
        .render(&LayoutFrame::new(Viewport::new(0, 10)))
        .expect_err("zero width should fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn null_renderer_counts_nodes() {
    let table = TableNode::new(0, 0)
        .with_row(
            RowNode::with_height(1)
                .with_cell(CellNode::spacer())
                .with_cell(CellNode::new().with_child(Node::Text(TextRun::new(
                    TextStyle::new("Arial", 10, ""),
                    "x",
                )))),
        )
        .with_row(RowNode::default().with_cell(CellNode::new().with_child(Node::Block(
            BlockBox::new(5, 5).filled(Fill::parse("#000000")),
        ))));
    let frame = LayoutFrame::new(Viewport::new(10, 10)).with_root(Node::Table(table));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_block_count, 2);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(renderer.last_overlay_count, 0);
    assert_eq!(frame.visible_block_count(), 1);
}
