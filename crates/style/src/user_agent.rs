//! User-agent defaults, a subset of the HTML rendering section.
//! Spec: <https://html.spec.whatwg.org/multipage/rendering.html>

use crate::Display;
use crate::values::Length;
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UaRule {
    pub display: Option<Display>,
    /// Font size relative to the parent.
    pub font_scale: Option<f32>,
    /// Top, right, bottom, left.
    pub margin: Option<[Length; 4]>,
}

const HIDDEN: &[&str] = &[
    "head", "script", "style", "title", "meta", "link", "template", "base",
];

const INLINE: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "q", "s", "samp", "select", "small", "span", "strong",
    "sub", "sup", "textarea", "time", "u", "var",
];

/// Monospace text renders at 13px against a 16px default.
const MONOSPACE_SCALE: f32 = 13.0 / 16.0;

const fn block_margin(em: f32) -> [Length; 4] {
    [Length::Em(em), Length::Px(0.0), Length::Em(em), Length::Px(0.0)]
}

static RULES: Lazy<HashMap<&'static str, UaRule>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, UaRule> = HashMap::new();
    for &tag in HIDDEN {
        rules.insert(tag, UaRule { display: Some(Display::None), ..UaRule::default() });
    }
    for &tag in INLINE {
        rules.insert(tag, UaRule { display: Some(Display::Inline), ..UaRule::default() });
    }
    for tag in ["code", "kbd", "samp"] {
        rules.insert(
            tag,
            UaRule {
                display: Some(Display::Inline),
                font_scale: Some(MONOSPACE_SCALE),
                margin: None,
            },
        );
    }
    rules.insert(
        "small",
        UaRule {
            display: Some(Display::Inline),
            font_scale: Some(1.0 / 1.2),
            margin: None,
        },
    );
    rules.insert(
        "body",
        UaRule { margin: Some([Length::Px(8.0); 4]), ..UaRule::default() },
    );
    for tag in ["p", "dl"] {
        rules.insert(tag, UaRule { margin: Some(block_margin(1.0)), ..UaRule::default() });
    }
    for tag in ["blockquote", "figure"] {
        rules.insert(
            tag,
            UaRule {
                margin: Some([Length::Em(1.0), Length::Px(40.0), Length::Em(1.0), Length::Px(40.0)]),
                ..UaRule::default()
            },
        );
    }
    for tag in ["ul", "ol"] {
        rules.insert(
            tag,
            UaRule {
                margin: Some([Length::Em(1.0), Length::Px(0.0), Length::Em(1.0), Length::Px(40.0)]),
                ..UaRule::default()
            },
        );
    }
    rules.insert(
        "pre",
        UaRule {
            font_scale: Some(MONOSPACE_SCALE),
            margin: Some(block_margin(1.0)),
            ..UaRule::default()
        },
    );
    for (tag, scale, margin) in [
        ("h1", 2.0, 0.67),
        ("h2", 1.5, 0.83),
        ("h3", 1.17, 1.0),
        ("h4", 1.0, 1.33),
        ("h5", 0.83, 1.67),
        ("h6", 0.67, 2.33),
    ] {
        rules.insert(
            tag,
            UaRule {
                display: None,
                font_scale: Some(scale),
                margin: Some(block_margin(margin)),
            },
        );
    }
    rules
});

/// Defaults for `tag`; unknown tags are plain blocks.
pub fn rule_for(tag: &str) -> UaRule {
    RULES.get(tag).copied().unwrap_or_default()
}
