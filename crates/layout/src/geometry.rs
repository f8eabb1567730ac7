//! Basic geometry types shared by the layouter and the hover tracker.

use serde::Serialize;

/// A position relative to the viewport, as pointer events report it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClientPoint {
    pub x: f32,
    pub y: f32,
}

impl ClientPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_page(self, scroll: ScrollOffset) -> PagePoint {
        PagePoint {
            x: self.x + scroll.x,
            y: self.y + scroll.y,
        }
    }
}

/// A position relative to the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

impl PagePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_client(self, scroll: ScrollOffset) -> ClientPoint {
        ClientPoint {
            x: self.x - scroll.x,
            y: self.y - scroll.y,
        }
    }
}

/// How far the viewport has scrolled from the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// A border box in the page frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: PagePoint) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Top-left corner as the viewport currently shows it.
    pub fn client_origin(&self, scroll: ScrollOffset) -> ClientPoint {
        PagePoint::new(self.x, self.y).to_client(scroll)
    }
}
