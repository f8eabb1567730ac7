//! HTML parsing on top of html5ever.
//!
//! html5ever builds an `RcDom`, which is then walked once to produce the
//! [`DOMUpdate`] batch a [`Document`] is built from. Comments, doctypes and
//! processing instructions are dropped; so are whitespace-only text runs,
//! which never contribute to text content after trimming.

use crate::dom::{DOMUpdate, Document, NodeKey};
use anyhow::Error;
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::HashMap;

struct ParserState<'state> {
    updates: &'state mut Vec<DOMUpdate>,
    positions: HashMap<NodeKey, usize>,
    next_key: &'state mut u64,
}

impl ParserState<'_> {
    fn next_key(&mut self) -> NodeKey {
        let key = NodeKey(*self.next_key);
        *self.next_key += 1;
        key
    }

    fn next_position(&mut self, parent: NodeKey) -> usize {
        let slot = self.positions.entry(parent).or_insert(0);
        let pos = *slot;
        *slot += 1;
        pos
    }
}

fn walk_tree(handle: &Handle, parent: NodeKey, state: &mut ParserState<'_>) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let node = state.next_key();
            let pos = state.next_position(parent);
            state.updates.push(DOMUpdate::InsertElement {
                parent,
                node,
                tag: name.local.to_string(),
                pos,
            });
            for attr in attrs.borrow().iter() {
                state.updates.push(DOMUpdate::SetAttr {
                    node,
                    name: attr.name.local.to_string(),
                    value: attr.value.to_string(),
                });
            }
            for child in handle.children.borrow().iter() {
                walk_tree(child, node, state);
            }
        }
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if text.trim().is_empty() {
                return;
            }
            let node = state.next_key();
            let pos = state.next_position(parent);
            state.updates.push(DOMUpdate::InsertText {
                parent,
                node,
                text,
                pos,
            });
        }
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                walk_tree(child, parent, state);
            }
        }
        NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => {}
    }
}

/// Parse a full HTML document into updates rooted at `parent`.
///
/// `next_key` is the first key handed out and is advanced past every key used.
///
/// # Errors
/// Returns an error if the input cannot be read as UTF-8.
pub fn parse_html_to_updates(
    html: &str,
    parent: NodeKey,
    next_key: &mut u64,
) -> Result<Vec<DOMUpdate>, Error> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut updates = Vec::new();
    walk_tree(
        &dom.document,
        parent,
        &mut ParserState {
            updates: &mut updates,
            positions: HashMap::new(),
            next_key,
        },
    );
    Ok(updates)
}

/// Parse `html` into a finished [`Document`].
///
/// html5ever always synthesises `<html>`, `<head>` and `<body>`, so the result
/// has a body even for fragments.
///
/// # Errors
/// Returns an error if the input cannot be decoded or the produced updates
/// cannot be applied.
pub fn parse_html(html: &str) -> Result<Document, Error> {
    let mut document = Document::new();
    let mut next_key = document.allocate_key().0;
    let mut updates = parse_html_to_updates(html, NodeKey::ROOT, &mut next_key)?;
    updates.push(DOMUpdate::EndOfDocument);
    debug!("Parsed {} bytes of HTML into {} updates", html.len(), updates.len());
    document.apply_updates(updates)?;
    Ok(document)
}
