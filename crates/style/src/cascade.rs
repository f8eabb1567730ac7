use crate::declarations::{Declaration, last_value, parse_style_attribute};
use crate::user_agent::rule_for;
use crate::values::{
    FontContext, Length, parse_display, parse_font_size, parse_length, parse_line_height,
    parse_margin_shorthand,
};
use crate::{ComputedStyle, DEFAULT_FONT_SIZE, Display, Edges};
use html::{Document, NodeId};
use log::{debug, trace};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleOptions {
    /// Font size of `medium` and of the document node.
    pub default_font_size: f32,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Computed styles for every element of one document generation.
#[derive(Clone, Debug)]
pub struct StyleMap {
    styles: HashMap<NodeId, ComputedStyle>,
    default_font_size: f32,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE)
    }
}

impl StyleMap {
    pub fn new(default_font_size: f32) -> Self {
        Self {
            styles: HashMap::new(),
            default_font_size,
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&ComputedStyle> {
        self.styles.get(&node)
    }

    /// Override or add a style, e.g. one measured by an external engine.
    pub fn insert(&mut self, node: NodeId, style: ComputedStyle) {
        self.styles.insert(node, style);
    }

    pub fn default_font_size(&self) -> f32 {
        self.default_font_size
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Resolve user-agent defaults and inline styles for every element.
pub fn compute_styles(document: &Document, options: StyleOptions) -> StyleMap {
    let mut map = StyleMap::new(options.default_font_size);
    let root_style = ComputedStyle::root(options.default_font_size);
    let walker = Walker {
        document,
        options,
        document_element: document.document_element(),
    };
    walker.style_children(
        document.root(),
        &root_style,
        options.default_font_size,
        &mut map,
    );
    debug!("Computed styles for {} elements", map.len());
    map
}

struct Walker<'doc> {
    document: &'doc Document,
    options: StyleOptions,
    document_element: Option<NodeId>,
}

impl Walker<'_> {
    fn style_children(
        &self,
        node: NodeId,
        parent: &ComputedStyle,
        root_font_size: f32,
        map: &mut StyleMap,
    ) {
        for child in self.document.element_children(node) {
            let style = self.compute_element(child, parent, root_font_size);
            // rem units resolve against the <html> element's font size
            let child_root = if Some(child) == self.document_element {
                style.font_size
            } else {
                root_font_size
            };
            map.insert(child, style);
            self.style_children(child, &style, child_root, map);
        }
    }

    fn compute_element(
        &self,
        node: NodeId,
        parent: &ComputedStyle,
        root_font_size: f32,
    ) -> ComputedStyle {
        let tag = self.document.tag_name(node).unwrap_or_default();
        let rule = rule_for(tag);
        let declarations: Vec<Declaration> = self
            .document
            .attribute(node, "style")
            .map(parse_style_attribute)
            .unwrap_or_default();

        let mut font_size = rule
            .font_scale
            .map_or(parent.font_size, |scale| parent.font_size * scale);
        if let Some(value) = last_value(&declarations, "font-size") {
            let context = FontContext {
                parent_font_size: parent.font_size,
                root_font_size,
                default_font_size: self.options.default_font_size,
            };
            match parse_font_size(value, context) {
                Ok(size) => font_size = size,
                Err(err) => debug!("Ignoring font-size {value:?} on <{tag}>: {err:?}"),
            }
        }

        let mut line_height = parent.line_height;
        if let Some(value) = last_value(&declarations, "line-height") {
            match parse_line_height(value, font_size, root_font_size) {
                Ok(parsed) => line_height = parsed,
                Err(err) => debug!("Ignoring line-height {value:?} on <{tag}>: {err:?}"),
            }
        }

        let mut display = rule.display.unwrap_or(Display::Block);
        if let Some(value) = last_value(&declarations, "display") {
            match parse_display(value) {
                Ok(parsed) => display = parsed,
                Err(err) => debug!("Ignoring display {value:?} on <{tag}>: {err:?}"),
            }
        }

        let mut margin = rule
            .margin
            .map(|lengths| resolve_edges(lengths, font_size, root_font_size))
            .unwrap_or_default();
        for decl in &declarations {
            apply_margin(&mut margin, decl, font_size, root_font_size);
        }

        trace!("<{tag}> font-size {font_size}px display {display:?}");
        ComputedStyle {
            display,
            font_size,
            line_height,
            margin,
        }
    }
}

// Percentages would resolve against the containing block width, which is
// only known during layout; they compute to zero here.
fn resolve_length(length: Length, font_size: f32, root_font_size: f32) -> f32 {
    length.to_px(font_size, root_font_size, 0.0)
}

fn resolve_edges(lengths: [Length; 4], font_size: f32, root_font_size: f32) -> Edges {
    let [top, right, bottom, left] =
        lengths.map(|length| resolve_length(length, font_size, root_font_size));
    Edges {
        top,
        right,
        bottom,
        left,
    }
}

fn apply_margin(margin: &mut Edges, decl: &Declaration, font_size: f32, root_font_size: f32) {
    let side = match decl.property.as_str() {
        "margin" => {
            match parse_margin_shorthand(&decl.value) {
                Ok(lengths) => *margin = resolve_edges(lengths, font_size, root_font_size),
                Err(err) => debug!("Ignoring margin {:?}: {err:?}", decl.value),
            }
            return;
        }
        "margin-top" => &mut margin.top,
        "margin-right" => &mut margin.right,
        "margin-bottom" => &mut margin.bottom,
        "margin-left" => &mut margin.left,
        _ => return,
    };
    match parse_length(&decl.value) {
        Ok(length) => *side = resolve_length(length, font_size, root_font_size),
        Err(err) => debug!("Ignoring {} {:?}: {err:?}", decl.property, decl.value),
    }
}
