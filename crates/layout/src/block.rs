//! Approximate block flow.
//!
//! Block boxes stack vertically inside their parent's content box. Text and
//! inline elements between two blocks form one anonymous run whose height is
//! `lines * line-height`, where the line count comes from an average glyph
//! advance instead of real shaping. Inline elements are given the box of the
//! run they sit in. A block inside an inline element closes the run and is
//! stacked like any other block; the inline element then spans from where it
//! started to the bottom of its last block.

use crate::geometry::{LayoutRect, Viewport};
use crate::snapshot::LayoutSnapshot;
use html::{Document, NodeId, NodeKind};
use log::{debug, trace};
use style::{ComputedStyle, Display, StyleMap};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    pub viewport: Viewport,
    /// Average glyph advance as a fraction of the font size.
    pub glyph_ratio: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            glyph_ratio: 0.5,
        }
    }
}

/// Lay out every rendered element of `document`.
pub fn layout_document(document: &Document, styles: StyleMap, options: LayoutOptions) -> LayoutSnapshot {
    let mut snapshot = LayoutSnapshot::new(styles, options.viewport);
    let mut rects: Vec<(NodeId, LayoutRect)> = Vec::new();
    let mut cursor = 0.0_f32;
    {
        let mut layouter = BlockLayouter {
            document,
            styles: snapshot.styles(),
            options,
            rects: &mut rects,
        };
        for child in document.element_children(document.root()) {
            cursor += layouter.layout_block(child, 0.0, cursor, options.viewport.width);
        }
    }
    for (node, rect) in rects {
        snapshot.insert_rect(node, rect);
    }
    snapshot.set_document_height(cursor);
    debug!(
        "Laid out {} boxes, document height {cursor}px",
        snapshot.len()
    );
    snapshot
}

/// Text and inline elements waiting to be placed as one anonymous run.
#[derive(Default)]
struct InlineRun {
    chars: usize,
    elements: Vec<NodeId>,
}

impl InlineRun {
    fn is_empty(&self) -> bool {
        self.chars == 0 && self.elements.is_empty()
    }

    fn push_text(&mut self, text: &str) {
        let mut words = 0_usize;
        for word in text.split_whitespace() {
            if self.chars > 0 || words > 0 {
                self.chars += 1;
            }
            self.chars += word.chars().count();
            words += 1;
        }
    }
}

/// The content box a run is flushed into.
#[derive(Clone, Copy)]
struct Flow {
    style: ComputedStyle,
    x: f32,
    y: f32,
    width: f32,
}

struct BlockLayouter<'layout> {
    document: &'layout Document,
    styles: &'layout StyleMap,
    options: LayoutOptions,
    rects: &'layout mut Vec<(NodeId, LayoutRect)>,
}

impl BlockLayouter<'_> {
    fn style(&self, node: NodeId) -> ComputedStyle {
        self.styles.get(node).copied().unwrap_or_else(|| {
            ComputedStyle::root(self.styles.default_font_size())
        })
    }

    /// Place `node` as a block at `(x, y)` inside `width`; returns the
    /// vertical space consumed including margins.
    fn layout_block(&mut self, node: NodeId, x: f32, y: f32, width: f32) -> f32 {
        let style = self.style(node);
        if style.display == Display::None {
            return 0.0;
        }
        let margin = style.margin;
        let box_x = x + margin.left;
        let box_y = y + margin.top;
        let box_width = (width - margin.left - margin.right).max(0.0);
        let content_height = self.layout_contents(node, &style, box_x, box_y, box_width);
        trace!(
            "<{}> at ({box_x}, {box_y}) {box_width}x{content_height}",
            self.document.tag_name(node).unwrap_or_default()
        );
        self.rects
            .push((node, LayoutRect::new(box_x, box_y, box_width, content_height)));
        margin.top + content_height + margin.bottom
    }

    fn layout_contents(
        &mut self,
        node: NodeId,
        style: &ComputedStyle,
        x: f32,
        y: f32,
        width: f32,
    ) -> f32 {
        let flow = Flow {
            style: *style,
            x,
            y,
            width,
        };
        let mut cursor = 0.0_f32;
        let mut run = InlineRun::default();
        let document = self.document;
        for child in document.children(node) {
            let Some(data) = document.node(child) else {
                continue;
            };
            match &data.kind {
                NodeKind::Text { text } => run.push_text(text),
                NodeKind::Element { .. } => match self.style(child).display {
                    Display::None => {}
                    Display::Inline => {
                        self.collect_inline(child, &mut run, flow, &mut cursor);
                    }
                    Display::Block => self.place_block(child, &mut run, flow, &mut cursor),
                },
                NodeKind::Document => {}
            }
        }
        cursor + self.flush_run(&mut run, flow, cursor)
    }

    /// Close the pending run and stack `node` under it.
    fn place_block(&mut self, node: NodeId, run: &mut InlineRun, flow: Flow, cursor: &mut f32) {
        *cursor += self.flush_run(run, flow, *cursor);
        *cursor += self.layout_block(node, flow.x, flow.y + *cursor, flow.width);
    }

    /// Fold an inline element and its rendered descendants into `run`.
    ///
    /// Returns whether a block descendant split the run.
    fn collect_inline(
        &mut self,
        node: NodeId,
        run: &mut InlineRun,
        flow: Flow,
        cursor: &mut f32,
    ) -> bool {
        let start = flow.y + *cursor;
        let mut split = false;
        run.elements.push(node);
        let document = self.document;
        for child in document.children(node) {
            match document.node(child).map(|data| &data.kind) {
                Some(NodeKind::Text { text }) => run.push_text(text),
                Some(NodeKind::Element { .. }) => match self.style(child).display {
                    Display::None => {}
                    Display::Inline => split |= self.collect_inline(child, run, flow, cursor),
                    Display::Block => {
                        self.place_block(child, run, flow, cursor);
                        split = true;
                    }
                },
                _ => {}
            }
        }
        if split {
            let end = flow.y + *cursor;
            self.rects
                .push((node, LayoutRect::new(flow.x, start, flow.width, end - start)));
        }
        split
    }

    fn flush_run(&mut self, run: &mut InlineRun, flow: Flow, cursor: f32) -> f32 {
        if run.is_empty() {
            return 0.0;
        }
        let Flow { style, x, width, .. } = flow;
        let y = flow.y + cursor;
        let height = if run.chars == 0 {
            0.0
        } else {
            let advance = style.font_size * self.options.glyph_ratio;
            let text_width = run.chars as f32 * advance;
            let lines = if width > 0.0 {
                (text_width / width).ceil().max(1.0)
            } else {
                run.chars as f32
            };
            lines * style.line_height_px()
        };
        let rect = LayoutRect::new(x, y, width, height);
        for element in run.elements.drain(..) {
            self.rects.push((element, rect));
        }
        run.chars = 0;
        height
    }
}

#[cfg(test)]
mod tests {
    use super::InlineRun;

    #[test]
    fn runs_count_collapsed_characters() {
        let mut run = InlineRun::default();
        run.push_text("  Hello \n  world ");
        assert_eq!(run.chars, 11);
        run.push_text("again");
        assert_eq!(run.chars, 17);
        run.push_text("   ");
        assert_eq!(run.chars, 17);
    }
}
