use super::{DOMNode, Document, NodeKey};
use anyhow::{Error, anyhow, bail};
use indextree::NodeId;
use log::{debug, trace};

/// A single change to a [`Document`], addressed by [`NodeKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DOMUpdate {
    InsertElement {
        parent: NodeKey,
        node: NodeKey,
        tag: String,
        pos: usize,
    },
    InsertText {
        parent: NodeKey,
        node: NodeKey,
        text: String,
        pos: usize,
    },
    SetAttr {
        node: NodeKey,
        name: String,
        value: String,
    },
    RemoveNode {
        node: NodeKey,
    },
    EndOfDocument,
}

impl Document {
    /// Apply a batch of updates and advance the generation.
    ///
    /// The generation advances even when an update in the middle of the batch
    /// fails, since the updates before it have already been applied.
    ///
    /// # Errors
    /// Returns an error for the first update that references an unknown key,
    /// reuses a key, or targets the document node with an attribute/removal.
    pub fn apply_updates<I>(&mut self, batch: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = DOMUpdate>,
    {
        let mut applied = 0_usize;
        let result = batch.into_iter().try_for_each(|update| {
            applied += 1;
            self.apply_update(update)
        });
        self.generation += 1;
        debug!(
            "Applied {applied} DOM updates, generation is now {}",
            self.generation
        );
        result
    }

    /// Apply one update without advancing the generation.
    ///
    /// # Errors
    /// See [`Document::apply_updates`].
    pub fn apply_update(&mut self, update: DOMUpdate) -> Result<(), Error> {
        trace!("DOM update {update:?}");
        match update {
            DOMUpdate::InsertElement {
                parent,
                node,
                tag,
                pos,
            } => {
                self.ensure_unused(node)?;
                let id = self.arena.new_node(DOMNode::element(node, &tag));
                self.insert(parent, id, pos)?;
                self.register(node, id);
            }
            DOMUpdate::InsertText {
                parent,
                node,
                text,
                pos,
            } => {
                self.ensure_unused(node)?;
                let id = self.arena.new_node(DOMNode::text(node, text));
                self.insert(parent, id, pos)?;
                self.register(node, id);
            }
            DOMUpdate::SetAttr { node, name, value } => {
                let id = self.resolve(node)?;
                let data = self
                    .arena
                    .get_mut(id)
                    .ok_or_else(|| anyhow!("Node {node:?} vanished from the arena"))?
                    .get_mut();
                if !data.is_element() {
                    bail!("Cannot set attribute {name} on non-element {node:?}");
                }
                let name = name.to_ascii_lowercase();
                if let Some(slot) = data.attrs.iter_mut().find(|(attr, _)| *attr == name) {
                    slot.1 = value;
                } else {
                    data.attrs.push((name, value));
                }
            }
            DOMUpdate::RemoveNode { node } => {
                if node == NodeKey::ROOT {
                    bail!("The document node cannot be removed");
                }
                let id = self.resolve(node)?;
                let removed: Vec<NodeKey> = id
                    .descendants(&self.arena)
                    .filter_map(|child| self.arena.get(child).and_then(|entry| entry.get().key))
                    .collect();
                for key in removed {
                    self.keys.remove(&key);
                }
                id.remove_subtree(&mut self.arena);
            }
            DOMUpdate::EndOfDocument => {
                self.finished = true;
            }
        }
        Ok(())
    }

    fn resolve(&self, key: NodeKey) -> Result<NodeId, Error> {
        self.node_id(key)
            .ok_or_else(|| anyhow!("Unknown node key {key:?}"))
    }

    fn ensure_unused(&self, key: NodeKey) -> Result<(), Error> {
        if self.keys.contains_key(&key) {
            bail!("Node key {key:?} is already in use");
        }
        Ok(())
    }

    fn register(&mut self, key: NodeKey, id: NodeId) {
        self.keys.insert(key, id);
        self.next_key = self.next_key.max(key.0 + 1);
    }

    fn insert(&mut self, parent: NodeKey, id: NodeId, pos: usize) -> Result<(), Error> {
        let parent_id = match self.resolve(parent) {
            Ok(parent_id) => parent_id,
            Err(err) => {
                id.remove(&mut self.arena);
                return Err(err);
            }
        };
        let sibling = parent_id.children(&self.arena).nth(pos);
        let inserted = match sibling {
            Some(sibling) => sibling.checked_insert_before(id, &mut self.arena),
            None => parent_id.checked_append(id, &mut self.arena),
        };
        inserted.map_err(|err| anyhow!("Failed to insert under {parent:?}: {err}"))
    }
}
