//! Page geometry for lector.
//!
//! Boxes are always in the page frame (document coordinates, scroll offset
//! included). Pointer positions arrive in the client frame and must be
//! converted with [`ClientPoint::to_page`] before they are compared to a box.

#![forbid(unsafe_code)]

mod block;
mod geometry;
mod snapshot;

pub use block::{LayoutOptions, layout_document};
pub use geometry::{ClientPoint, LayoutRect, PagePoint, ScrollOffset, Viewport};
pub use snapshot::{GeometrySource, LayoutSnapshot};
