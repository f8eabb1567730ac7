use html::{Document, NodeId};
use hover::HoverInfo;
use layout::{GeometrySource, LayoutRect};
use serde::Serialize;

/// Longest text excerpt kept in a summary, in characters.
const TEXT_EXCERPT_CHARS: usize = 80;

/// A serialisable description of one element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementSummary {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Collapsed text content, cut to a short excerpt.
    pub text: String,
    pub rect: Option<LayoutRect>,
}

impl ElementSummary {
    pub fn new(document: &Document, geometry: &dyn GeometrySource, node: NodeId) -> Option<Self> {
        let tag = document.tag_name(node)?.to_owned();
        let collapsed = document
            .text_content(node)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let text = if collapsed.chars().count() > TEXT_EXCERPT_CHARS {
            let mut excerpt: String = collapsed.chars().take(TEXT_EXCERPT_CHARS).collect();
            excerpt.push('…');
            excerpt
        } else {
            collapsed
        };
        Some(Self {
            tag,
            id: document.attribute(node, "id").map(str::to_owned),
            text,
            rect: geometry.bounding_box(node),
        })
    }
}

/// Where the hover player goes, with the element it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HoverSummary {
    pub element: ElementSummary,
    pub top: f32,
    pub left: f32,
    pub height_of_first_line: f32,
}

impl HoverSummary {
    pub fn new(document: &Document, geometry: &dyn GeometrySource, info: &HoverInfo) -> Option<Self> {
        Some(Self {
            element: ElementSummary::new(document, geometry, info.element)?,
            top: info.top,
            left: info.left,
            height_of_first_line: info.height_of_first_line,
        })
    }
}
