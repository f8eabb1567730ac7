use crate::classifier::Classifier;
use html::{Document, NodeId};
use log::info;

/// Classifier output for one document generation.
///
/// The set is a snapshot: once the document changes, [`ReadableSet::is_stale`]
/// reports it and the caller recomputes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadableSet {
    elements: Vec<NodeId>,
    generation: u64,
}

impl ReadableSet {
    pub fn new(elements: Vec<NodeId>, generation: u64) -> Self {
        Self {
            elements,
            generation,
        }
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stale(&self, document: &Document) -> bool {
        self.generation != document.generation()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.elements.contains(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Classifier {
    /// Classify from `<body>`, or from the document element when the page has
    /// no body.
    pub fn collect(&self, document: &Document) -> ReadableSet {
        let root = document
            .body()
            .or_else(|| document.document_element())
            .unwrap_or_else(|| document.root());
        let elements = self.classify(document, root);
        info!(
            "Collected {} readable elements at generation {}",
            elements.len(),
            document.generation()
        );
        ReadableSet::new(elements, document.generation())
    }
}

/// [`Classifier::collect`] with the default ignore list.
pub fn collect_readable(document: &Document) -> ReadableSet {
    Classifier::default().collect(document)
}
