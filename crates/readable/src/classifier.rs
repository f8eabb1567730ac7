use html::{Document, NodeId};
use log::{debug, trace};
use std::collections::HashSet;

/// Tags whose subtrees are never offered to the hover player.
pub const IGNORED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "button", "label", "span", "img", "pre", "script",
];

/// Whether `node` could stand on its own as a readable unit.
///
/// Elements with exactly one child element are never readable by themselves;
/// the single-child rule in [`Classifier::classify`] reads them as a whole
/// instead.
pub fn is_readable(document: &Document, node: NodeId) -> bool {
    document.has_text(node) && document.element_child_count(node) != 1
}

/// Whether any element below `node` satisfies [`is_readable`].
///
/// Ignored tags are not consulted here, so a heading with text still keeps
/// its container from being chosen.
pub fn has_nested_readable(document: &Document, node: NodeId) -> bool {
    document
        .descendants(node)
        .skip(1)
        .filter(|id| document.is_element(*id))
        .any(|id| is_readable(document, id))
}

/// Picks the top-level readable elements below a root.
#[derive(Clone, Debug)]
pub struct Classifier {
    ignored: HashSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_ignored_tags(IGNORED_TAGS.iter().copied())
    }
}

impl Classifier {
    /// A classifier that skips the given tags instead of [`IGNORED_TAGS`].
    pub fn with_ignored_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ignored: tags
                .into_iter()
                .map(|tag| tag.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_ignored(&self, tag: &str) -> bool {
        self.ignored.contains(&tag.to_ascii_lowercase())
    }

    /// Readable elements at or below `root`, in document order.
    pub fn classify(&self, document: &Document, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        if document.is_element(root) {
            self.visit(document, root, &mut found);
        } else {
            for child in document.element_children(root) {
                self.visit(document, child, &mut found);
            }
        }
        debug!("Found {} readable elements", found.len());
        found
    }

    fn visit(&self, document: &Document, node: NodeId, found: &mut Vec<NodeId>) {
        let tag = document.tag_name(node).unwrap_or_default();
        if self.is_ignored(tag) {
            trace!("Skipping ignored <{tag}>");
            return;
        }

        let has_text = document.has_text(node);
        if has_text && document.element_child_count(node) == 1 {
            trace!("Emitting <{tag}> for its single child");
            found.push(node);
            return;
        }

        if is_readable(document, node) && !has_nested_readable(document, node) {
            trace!("Emitting <{tag}>");
            found.push(node);
            return;
        }

        for child in document.element_children(node) {
            self.visit(document, child, found);
        }
    }
}

/// [`Classifier::classify`] with the default ignore list.
pub fn top_level_readable_elements(document: &Document, root: NodeId) -> Vec<NodeId> {
    Classifier::default().classify(document, root)
}
