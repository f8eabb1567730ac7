#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

#![forbid(unsafe_code)]

//! DOM storage and HTML parsing for lector.
//!
//! Documents are built from batches of [`DOMUpdate`]s so that parsed pages and
//! later content changes flow through the same path. Every applied batch bumps
//! the document generation, which downstream snapshots use to detect staleness.

pub mod dom;
pub mod parser;

pub use dom::{DOMNode, DOMUpdate, Document, NodeKey, NodeKind};
pub use indextree::NodeId;
pub use parser::{parse_html, parse_html_to_updates};
