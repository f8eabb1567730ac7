use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;
use std::collections::HashMap;

mod printing;
mod updating;

pub use updating::DOMUpdate;

/// Stable identifier assigned by whoever produces [`DOMUpdate`]s.
///
/// Arena ids are internal to a [`Document`]; keys are what update batches use
/// to refer to nodes across batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// Key of the document node itself.
    pub const ROOT: Self = Self(0);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub key: Option<NodeKey>,
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

impl DOMNode {
    fn element(key: NodeKey, tag: &str) -> Self {
        Self {
            key: Some(key),
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            attrs: SmallVec::new(),
        }
    }

    fn text(key: NodeKey, text: String) -> Self {
        Self {
            key: Some(key),
            kind: NodeKind::Text { text },
            attrs: SmallVec::new(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

/// An HTML document stored in an arena.
pub struct Document {
    arena: Arena<DOMNode>,
    root: NodeId,
    keys: HashMap<NodeKey, NodeId>,
    next_key: u64,
    generation: u64,
    finished: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DOMNode {
            key: Some(NodeKey::ROOT),
            ..DOMNode::default()
        });
        let mut keys = HashMap::new();
        keys.insert(NodeKey::ROOT, root);
        Self {
            arena,
            root,
            keys,
            next_key: 1,
            generation: 0,
            finished: false,
        }
    }

    /// The `#document` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of update batches applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an `EndOfDocument` update has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reserve a key that no node in this document uses yet.
    pub fn allocate_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        key
    }

    pub fn node_id(&self, key: NodeKey) -> Option<NodeId> {
        self.keys.get(&key).copied()
    }

    pub fn node_key(&self, node: NodeId) -> Option<NodeKey> {
        self.node(node).and_then(|data| data.key)
    }

    /// Node data, or `None` if `node` was removed or never belonged here.
    pub fn node(&self, node: NodeId) -> Option<&DOMNode> {
        self.live(node).map(Node::get)
    }

    fn live(&self, node: NodeId) -> Option<&Node<DOMNode>> {
        self.arena.get(node).filter(|entry| !entry.is_removed())
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(DOMNode::tag)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(DOMNode::is_element)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?
            .attrs
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live(node).and_then(Node::parent)
    }

    /// All child nodes, text included.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.live(node).map(|_| node);
        start
            .into_iter()
            .flat_map(move |id| id.children(&self.arena))
    }

    /// Child nodes that are elements, in document order.
    pub fn element_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).filter(|child| self.is_element(*child))
    }

    pub fn element_child_count(&self, node: NodeId) -> usize {
        self.element_children(node).count()
    }

    /// Pre-order walk of `node` and everything below it.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.live(node).map(|_| node);
        start
            .into_iter()
            .flat_map(move |id| id.descendants(&self.arena))
    }

    /// Concatenated text of every text node below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in self.descendants(node) {
            if let Some(NodeKind::Text { text }) = self.node(id).map(|data| &data.kind) {
                out.push_str(text);
            }
        }
        out
    }

    /// Whether the text content of `node` is non-empty after trimming.
    pub fn has_text(&self, node: NodeId) -> bool {
        self.descendants(node).any(|id| {
            matches!(
                self.node(id).map(|data| &data.kind),
                Some(NodeKind::Text { text }) if !text.trim().is_empty()
            )
        })
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.live(node).is_some() && node.ancestors(&self.arena).any(|id| id == ancestor)
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root).next()
    }

    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .find(|child| self.tag_name(*child) == Some("body"))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|node| self.attribute(*node, "id") == Some(id))
    }
}
