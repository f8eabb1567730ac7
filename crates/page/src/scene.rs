use crate::config::LectorConfig;
use html::Document;
use hover::HoverSurface;
use layout::{GeometrySource, LayoutSnapshot, layout_document};
use log::debug;
use style::compute_styles;

/// A document together with the geometry computed for its current
/// generation.
pub struct Scene {
    document: Document,
    geometry: LayoutSnapshot,
    /// Generation `geometry` was computed for.
    laid_out_at: u64,
}

impl Scene {
    /// Style and lay out `document`.
    pub fn build(document: Document, config: &LectorConfig) -> Self {
        let geometry = Self::lay_out(&document, config);
        let laid_out_at = document.generation();
        Self {
            document,
            geometry,
            laid_out_at,
        }
    }

    /// Use geometry measured elsewhere instead of the built-in layouter.
    pub fn with_geometry(document: Document, geometry: LayoutSnapshot) -> Self {
        let laid_out_at = document.generation();
        Self {
            document,
            geometry,
            laid_out_at,
        }
    }

    fn lay_out(document: &Document, config: &LectorConfig) -> LayoutSnapshot {
        let styles = compute_styles(document, config.style_options());
        layout_document(document, styles, config.layout_options())
    }

    /// Recompute styles and layout if the document changed since the last
    /// layout. Returns whether anything was recomputed.
    pub fn refresh(&mut self, config: &LectorConfig) -> bool {
        if self.laid_out_at == self.document.generation() {
            return false;
        }
        debug!(
            "Re-laying out generation {} (was {})",
            self.document.generation(),
            self.laid_out_at
        );
        self.geometry = Self::lay_out(&self.document, config);
        self.laid_out_at = self.document.generation();
        true
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn layout(&self) -> &LayoutSnapshot {
        &self.geometry
    }
}

impl HoverSurface for Scene {
    fn document(&self) -> &Document {
        &self.document
    }

    fn geometry(&self) -> &dyn GeometrySource {
        &self.geometry
    }
}
