use crate::config::LectorConfig;
use crate::scene::Scene;
use crate::summary::{ElementSummary, HoverSummary};
use anyhow::Error;
use html::{DOMUpdate, Document, NodeId, NodeKey, parse_html};
use hover::{HoverInfo, HoverSurface as _, HoverTracker, Window};
use layout::{ClientPoint, LayoutSnapshot, ScrollOffset};
use log::{info, warn};
use readable::{Classifier, ReadableSet};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// A page ready for the hover player.
pub struct ReadablePage {
    config: LectorConfig,
    classifier: Classifier,
    scene: Rc<RefCell<Scene>>,
    readable: ReadableSet,
    window: Window,
    tracker: HoverTracker<Scene>,
}

impl ReadablePage {
    /// Parse `html` and build a page from it.
    ///
    /// # Errors
    /// Returns an error if the HTML cannot be turned into a document.
    pub fn from_html(html: &str, config: LectorConfig) -> Result<Self, Error> {
        let document = parse_html(html)?;
        Ok(Self::from_document(document, config))
    }

    /// Style and lay out `document` with the built-in layouter.
    pub fn from_document(document: Document, config: LectorConfig) -> Self {
        let scene = Scene::build(document, &config);
        Self::from_scene(scene, config, Classifier::default())
    }

    /// Use externally measured geometry instead of the built-in layouter.
    /// DOM updates applied later are laid out by the built-in layouter.
    pub fn with_geometry(document: Document, geometry: LayoutSnapshot, config: LectorConfig) -> Self {
        Self::from_scene(Scene::with_geometry(document, geometry), config, Classifier::default())
    }

    /// Build a page around a prepared scene, classifying with `classifier`.
    pub fn from_scene(scene: Scene, config: LectorConfig, classifier: Classifier) -> Self {
        let readable = classifier.collect(scene.document());
        let window = Window::default();
        let scene = Rc::new(RefCell::new(scene));
        let tracker = HoverTracker::attach(
            &window,
            Rc::clone(&scene),
            readable.elements().to_vec(),
            config.first_line_metric,
        );
        info!("Page ready with {} readable elements", readable.len());
        Self {
            config,
            classifier,
            scene,
            readable,
            window,
            tracker,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> Ref<'_, Document> {
        Ref::map(self.scene.borrow(), |scene| scene.document())
    }

    pub fn layout(&self) -> Ref<'_, LayoutSnapshot> {
        Ref::map(self.scene.borrow(), Scene::layout)
    }

    /// The top-level readable elements of the current document.
    pub fn readable_elements(&self) -> &ReadableSet {
        &self.readable
    }

    /// Deliver a pointer move at client coordinates `(x, y)` and return what
    /// is hovered afterwards.
    pub fn dispatch_pointer_move(&self, x: f32, y: f32) -> Option<HoverInfo> {
        self.window.dispatch_pointer_move(ClientPoint::new(x, y));
        self.tracker.current()
    }

    pub fn scroll_to(&self, x: f32, y: f32) {
        self.window.scroll_to(x, y);
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.window.scroll_offset()
    }

    pub fn hovered(&self) -> Option<HoverInfo> {
        self.tracker.current()
    }

    /// Call `observer` whenever the hovered element changes.
    pub fn on_hover_change<F>(&self, observer: F)
    where
        F: FnMut(Option<&HoverInfo>) + 'static,
    {
        self.tracker.on_change(observer);
    }

    /// A node key no update has used yet, for building update batches.
    pub fn allocate_key(&self) -> NodeKey {
        self.scene.borrow_mut().document_mut().allocate_key()
    }

    /// Apply a DOM update batch and bring layout, the readable elements and
    /// the tracker up to date.
    ///
    /// Updates applied before a failing one stay applied, so the page is
    /// refreshed either way.
    ///
    /// # Errors
    /// Returns the first update that could not be applied.
    pub fn apply_updates<I>(&mut self, batch: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = DOMUpdate>,
    {
        let result = self.scene.borrow_mut().document_mut().apply_updates(batch);
        if let Err(err) = &result {
            warn!("DOM update batch failed part way: {err}");
        }
        self.refresh();
        result
    }

    /// Re-run layout and classification if the document changed.
    pub fn refresh(&mut self) {
        let readable = {
            let mut scene = self.scene.borrow_mut();
            scene.refresh(&self.config);
            if !self.readable.is_stale(scene.document()) {
                return;
            }
            self.classifier.collect(scene.document())
        };
        self.tracker.set_candidates(readable.elements().to_vec());
        self.readable = readable;
    }

    /// Summarise `node`, or `None` when it is not an element.
    pub fn describe(&self, node: NodeId) -> Option<ElementSummary> {
        let scene = self.scene.borrow();
        ElementSummary::new(scene.document(), scene.geometry(), node)
    }

    pub fn describe_hover(&self, info: &HoverInfo) -> Option<HoverSummary> {
        let scene = self.scene.borrow();
        HoverSummary::new(scene.document(), scene.geometry(), info)
    }

    /// Summaries of every readable element, in document order.
    pub fn summaries(&self) -> Vec<ElementSummary> {
        self.readable
            .iter()
            .filter_map(|node| self.describe(node))
            .collect()
    }
}
