use crate::geometry::{LayoutRect, Viewport};
use html::NodeId;
use std::collections::HashMap;
use style::{ComputedStyle, StyleMap};

/// Geometry and style queries the readable/hover logic depends on.
///
/// Implemented by [`LayoutSnapshot`]; an embedder with a real engine can
/// implement it over its own layout results.
pub trait GeometrySource {
    /// Page-framed border box, or `None` when the node generates no box.
    fn bounding_box(&self, node: NodeId) -> Option<LayoutRect>;

    fn computed_style(&self, node: NodeId) -> Option<&ComputedStyle>;

    /// Font size an element gets when nothing sets one explicitly.
    fn default_font_size(&self) -> f32 {
        style::DEFAULT_FONT_SIZE
    }
}

/// Layout results for one document generation.
#[derive(Clone, Debug)]
pub struct LayoutSnapshot {
    rects: HashMap<NodeId, LayoutRect>,
    styles: StyleMap,
    viewport: Viewport,
    document_height: f32,
}

impl LayoutSnapshot {
    /// An empty snapshot; boxes are added with [`LayoutSnapshot::insert_rect`].
    pub fn new(styles: StyleMap, viewport: Viewport) -> Self {
        Self {
            rects: HashMap::new(),
            styles,
            viewport,
            document_height: 0.0,
        }
    }

    /// Record a box, e.g. one measured by a browser. Grows the document
    /// height to cover it.
    pub fn insert_rect(&mut self, node: NodeId, rect: LayoutRect) {
        self.document_height = self.document_height.max(rect.bottom());
        self.rects.insert(node, rect);
    }

    pub fn rect(&self, node: NodeId) -> Option<LayoutRect> {
        self.rects.get(&node).copied()
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    pub(crate) fn set_document_height(&mut self, height: f32) {
        self.document_height = self.document_height.max(height);
    }

    /// Number of nodes with a box.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl GeometrySource for LayoutSnapshot {
    fn bounding_box(&self, node: NodeId) -> Option<LayoutRect> {
        self.rect(node)
    }

    fn computed_style(&self, node: NodeId) -> Option<&ComputedStyle> {
        self.styles.get(node)
    }

    fn default_font_size(&self) -> f32 {
        self.styles.default_font_size()
    }
}
