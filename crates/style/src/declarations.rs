//! `style="..."` attribute processing.
//! Spec: <https://www.w3.org/TR/css-style-attr/>

/// A single CSS declaration parsed from a style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase.
    pub property: String,
    /// Value trimmed of surrounding ASCII whitespace, without `!important`.
    pub value: String,
}

/// Parse the value of a `style` attribute into declarations, in source order.
///
/// Splits on `;`, then on the first `:`. Items with no colon, an empty
/// property or an empty value are skipped. A trailing `!important` is
/// accepted and dropped since inline declarations already win the cascade
/// here.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim_matches(is_ascii_whitespace);
        let Some((raw_prop, raw_value)) = item.split_once(':') else {
            continue;
        };
        let property_text = raw_prop.trim_matches(is_ascii_whitespace);
        let value_text = strip_important(raw_value.trim_matches(is_ascii_whitespace));
        if property_text.is_empty() || value_text.is_empty() {
            continue;
        }
        out.push(Declaration {
            property: property_text.to_ascii_lowercase(),
            value: value_text.to_owned(),
        });
    }
    out
}

/// Last declaration for `property`, matching source-order precedence.
pub fn last_value<'decls>(declarations: &'decls [Declaration], property: &str) -> Option<&'decls str> {
    declarations
        .iter()
        .rev()
        .find(|decl| decl.property == property)
        .map(|decl| decl.value.as_str())
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    lower
        .rfind("!important")
        .filter(|index| lower[index + "!important".len()..].trim().is_empty())
        .map_or(value, |index| value[..index].trim_matches(is_ascii_whitespace))
}

/// ASCII whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}
