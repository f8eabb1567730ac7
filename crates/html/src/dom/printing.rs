use core::fmt;

use super::{DOMNode, Document, NodeKind};
use indextree::NodeId;
use serde_json::{Map, Value, json};

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

fn coalesce_children(document: &Document, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in document.children(id) {
        if let Some(NodeKind::Text { text }) = document.node(child).map(|data| &data.kind) {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        let value = node_to_json(document, child);
        if !value.is_null() {
            children.push(value);
        }
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn sorted_attrs(data: &DOMNode) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = data
        .attrs
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    pairs.sort_by(|left, right| left.0.cmp(right.0));
    pairs
}

fn node_to_json(document: &Document, id: NodeId) -> Value {
    let Some(data) = document.node(id) else {
        return Value::Null;
    };
    match &data.kind {
        NodeKind::Document => {
            json!({ "type": "document", "children": coalesce_children(document, id) })
        }
        NodeKind::Element { tag } => {
            let mut attrs_obj = Map::new();
            for (name, value) in sorted_attrs(data) {
                attrs_obj.insert(name.to_owned(), Value::String(value.to_owned()));
            }
            json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(document, id),
            })
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(character),
        }
    }
    out
}

fn write_indent(out: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}

fn fmt_node(
    document: &Document,
    id: NodeId,
    out: &mut fmt::Formatter<'_>,
    depth: usize,
) -> fmt::Result {
    let Some(data) = document.node(id) else {
        return Ok(());
    };
    match &data.kind {
        NodeKind::Document => {
            write_indent(out, depth)?;
            writeln!(out, "#document")?;
        }
        NodeKind::Element { tag } => {
            write_indent(out, depth)?;
            write!(out, "<{tag}")?;
            for (name, value) in sorted_attrs(data) {
                write!(out, " {name}=\"{}\"", escape_text(value))?;
            }
            writeln!(out, ">")?;
        }
        NodeKind::Text { text } => {
            // Whitespace-only runs carry no content worth printing
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            write_indent(out, depth)?;
            writeln!(out, "\"{}\"", escape_text(text))?;
            return Ok(());
        }
    }
    for child in document.children(id) {
        fmt_node(document, child, out, depth + 1)?;
    }
    if let NodeKind::Element { tag } = &data.kind {
        write_indent(out, depth)?;
        writeln!(out, "</{tag}>")?;
    }
    Ok(())
}

impl fmt::Debug for Document {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "Document (generation {})", self.generation)?;
        fmt_node(self, self.root, out, 0)
    }
}

impl Document {
    /// Build a deterministic JSON representation of the document.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }
}
