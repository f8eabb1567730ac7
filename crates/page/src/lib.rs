#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]

#![forbid(unsafe_code)]

//! A loaded page with its readable elements and a live hover tracker.
//!
//! This crate wires the pipeline together: HTML is parsed into a
//! [`html::Document`], styled, laid out, classified, and a
//! [`hover::HoverTracker`] is attached to a fresh [`hover::Window`]. Later DOM
//! updates re-run every stage and hand the tracker the new candidates.

pub mod config;
mod scene;
pub mod state;
mod summary;

pub use config::LectorConfig;
pub use scene::Scene;
pub use state::ReadablePage;
pub use summary::{ElementSummary, HoverSummary};
