use anyhow::{Error, bail};
use html::{Document, NodeId};
use layout::GeometrySource;
use std::str::FromStr;
use style::ComputedStyle;

/// Which computed value sizes the hover player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FirstLineMetric {
    /// The computed `font-size`.
    #[default]
    FontSize,
    /// The used `line-height` in pixels.
    LineHeight,
}

impl FirstLineMetric {
    pub fn measure(self, style: &ComputedStyle) -> f32 {
        match self {
            Self::FontSize => style.font_size,
            Self::LineHeight => style.line_height_px(),
        }
    }
}

impl FromStr for FirstLineMetric {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "font-size" | "fontsize" => Ok(Self::FontSize),
            "line-height" | "lineheight" => Ok(Self::LineHeight),
            other => bail!("Unknown first line metric {other:?}"),
        }
    }
}

/// Height of the first line of text in `node`, used to size the player.
///
/// An element that sets its own font size is measured directly. Otherwise the
/// first child element with text decides, since that is usually where the
/// first line is rendered.
pub fn first_line_height<G>(
    document: &Document,
    geometry: &G,
    node: NodeId,
    metric: FirstLineMetric,
) -> f32
where
    G: GeometrySource + ?Sized,
{
    if !document.has_text(node) {
        return 0.0;
    }
    let default_font_size = geometry.default_font_size();
    let fallback = ComputedStyle::root(default_font_size);
    let own = geometry.computed_style(node).unwrap_or(&fallback);
    if (own.font_size - default_font_size).abs() > f32::EPSILON {
        return metric.measure(own);
    }

    document
        .element_children(node)
        .find(|child| document.has_text(*child))
        .and_then(|child| geometry.computed_style(child))
        .map_or_else(|| metric.measure(own), |style| metric.measure(style))
}
