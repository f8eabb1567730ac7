//! Computed font metrics, display and margins for lector documents.
//!
//! This is not a CSS engine: it resolves user-agent defaults and inline
//! `style` attributes, which is what the layouter and the hover player's
//! first-line sizing need.

#![forbid(unsafe_code)]

mod cascade;
pub mod declarations;
mod user_agent;
pub mod values;

pub use cascade::{StyleMap, StyleOptions, compute_styles};
pub use values::ParseError;

/// Default `medium` font size in CSS pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// `line-height: normal` as a multiple of the font size.
pub const NORMAL_LINE_HEIGHT: f32 = 1.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Block,
    Inline,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    #[default]
    Normal,
    /// Multiple of the element's own font size.
    Number(f32),
    /// Already computed pixels.
    Px(f32),
}

/// Four-sided pixel sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    /// Computed font size in pixels.
    pub font_size: f32,
    pub line_height: LineHeight,
    pub margin: Edges,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::root(DEFAULT_FONT_SIZE)
    }
}

impl ComputedStyle {
    /// Style of the document node for a given default font size.
    pub fn root(font_size: f32) -> Self {
        Self {
            display: Display::Block,
            font_size,
            line_height: LineHeight::Normal,
            margin: Edges::default(),
        }
    }

    /// Used line height in pixels.
    pub fn line_height_px(&self) -> f32 {
        match self.line_height {
            LineHeight::Normal => self.font_size * NORMAL_LINE_HEIGHT,
            LineHeight::Number(factor) => self.font_size * factor,
            LineHeight::Px(pixels) => pixels,
        }
    }
}
