#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]

#![forbid(unsafe_code)]

//! Top-level readable element classification.
//!
//! A readable element is the smallest block of a page that a reader would
//! want narrated as one unit: it has visible text, it is not a heading or a
//! control, and no other readable element sits inside it. Elements that wrap
//! exactly one child element together with text are read as a whole.

mod classifier;
mod set;

pub use classifier::{Classifier, IGNORED_TAGS, has_nested_readable, is_readable, top_level_readable_elements};
pub use set::{ReadableSet, collect_readable};
