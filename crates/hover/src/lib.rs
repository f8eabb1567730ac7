#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]

#![forbid(unsafe_code)]

//! Pointer tracking for the hover player.
//!
//! A [`HoverTracker`] listens for pointer moves on a [`Window`] and keeps the
//! readable element under the pointer, together with where the player should
//! be drawn, up to date. Everything here is single-threaded: windows, guards
//! and trackers share state through `Rc<RefCell<_>>`.

mod line_height;
mod tracker;
pub mod window;

pub use line_height::{FirstLineMetric, first_line_height};
pub use tracker::{HoverInfo, HoverSurface, HoverTracker, find_hovered};
pub use window::{EventKind, ListenerGuard, PointerEvent, Window};
