//! Value parsing for the handful of properties lector computes.
//! Spec: <https://www.w3.org/TR/css-values-3/>

use crate::{Display, LineHeight};
use cssparser::{Parser, ParserInput, Token};

/// Parse error for property values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The value was empty.
    UnexpectedEnd,
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A valid value was followed by more tokens.
    TrailingInput,
}

/// A CSS `<length-percentage>` before resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Em(f32),
    Rem(f32),
    Percent(f32),
}

impl Length {
    /// Resolve to pixels. Percentages resolve against `percent_base`.
    pub fn to_px(self, font_size: f32, root_font_size: f32, percent_base: f32) -> f32 {
        match self {
            Self::Px(value) => value,
            Self::Em(value) => value * font_size,
            Self::Rem(value) => value * root_font_size,
            Self::Percent(value) => value / 100.0 * percent_base,
        }
    }
}

/// Font context used to resolve font-relative values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontContext {
    pub parent_font_size: f32,
    pub root_font_size: f32,
    pub default_font_size: f32,
}

/// Ratio between adjacent `smaller`/`larger` steps.
const RELATIVE_STEP: f32 = 1.2;

/// Absolute-size keywords as multiples of `medium`.
/// Spec: <https://www.w3.org/TR/css-fonts-4/#absolute-size-mapping>
fn absolute_size_factor(keyword: &str) -> Option<f32> {
    let factor = match keyword {
        "xx-small" => 3.0 / 5.0,
        "x-small" => 3.0 / 4.0,
        "small" => 8.0 / 9.0,
        "medium" => 1.0,
        "large" => 6.0 / 5.0,
        "x-large" => 3.0 / 2.0,
        "xx-large" => 2.0,
        "xxx-large" => 3.0,
        _ => return None,
    };
    Some(factor)
}

fn with_single_token<T>(
    value: &str,
    map: impl FnOnce(&Token<'_>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let token = parser
        .next()
        .map_err(|_| ParseError::UnexpectedEnd)?
        .clone();
    let parsed = map(&token)?;
    if parser.is_exhausted() {
        Ok(parsed)
    } else {
        Err(ParseError::TrailingInput)
    }
}

fn length_from_token(token: &Token<'_>) -> Result<Length, ParseError> {
    match token {
        Token::Dimension { value, unit, .. } => match unit.to_ascii_lowercase().as_str() {
            "px" => Ok(Length::Px(*value)),
            "em" => Ok(Length::Em(*value)),
            "rem" => Ok(Length::Rem(*value)),
            "pt" => Ok(Length::Px(*value * 4.0 / 3.0)),
            _ => Err(ParseError::UnexpectedToken),
        },
        Token::Percentage { unit_value, .. } => Ok(Length::Percent(*unit_value * 100.0)),
        Token::Number { value, .. } if value.abs() <= f32::EPSILON => Ok(Length::Px(0.0)),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a single `<length-percentage>`.
///
/// # Errors
/// Returns an error for anything other than one px/em/rem/pt length, a
/// percentage, or unitless zero.
pub fn parse_length(value: &str) -> Result<Length, ParseError> {
    with_single_token(value, length_from_token)
}

/// Parse a `margin` shorthand into top/right/bottom/left lengths.
///
/// # Errors
/// Returns an error when there are not 1 to 4 valid lengths. `auto` is
/// accepted and treated as zero.
pub fn parse_margin_shorthand(value: &str) -> Result<[Length; 4], ParseError> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut parts: Vec<Length> = Vec::with_capacity(4);
    while let Ok(token) = parser.next() {
        let length = match token {
            Token::Ident(ident) if ident.eq_ignore_ascii_case("auto") => Length::Px(0.0),
            other => length_from_token(other)?,
        };
        parts.push(length);
    }
    match parts.as_slice() {
        [all] => Ok([*all; 4]),
        [vertical, horizontal] => Ok([*vertical, *horizontal, *vertical, *horizontal]),
        [top, horizontal, bottom] => Ok([*top, *horizontal, *bottom, *horizontal]),
        [top, right, bottom, left] => Ok([*top, *right, *bottom, *left]),
        [] => Err(ParseError::UnexpectedEnd),
        _ => Err(ParseError::TrailingInput),
    }
}

/// Parse and compute a `font-size` value to pixels.
/// Spec: <https://www.w3.org/TR/css-fonts-4/#font-size-prop>
///
/// # Errors
/// Returns an error for unsupported tokens or negative sizes.
pub fn parse_font_size(value: &str, context: FontContext) -> Result<f32, ParseError> {
    let size = with_single_token(value, |token| match token {
        Token::Ident(ident) => {
            let keyword = ident.to_ascii_lowercase();
            match keyword.as_str() {
                "smaller" => Ok(context.parent_font_size / RELATIVE_STEP),
                "larger" => Ok(context.parent_font_size * RELATIVE_STEP),
                other => absolute_size_factor(other)
                    .map(|factor| factor * context.default_font_size)
                    .ok_or(ParseError::UnexpectedToken),
            }
        }
        other => length_from_token(other).map(|length| {
            length.to_px(
                context.parent_font_size,
                context.root_font_size,
                context.parent_font_size,
            )
        }),
    })?;
    if size < 0.0 {
        return Err(ParseError::UnexpectedToken);
    }
    Ok(size)
}

/// Parse a `line-height` value for an element with the given font size.
/// Spec: <https://www.w3.org/TR/CSS2/visudet.html#propdef-line-height>
///
/// Numbers stay numbers so descendants rescale them; lengths and
/// percentages are computed to pixels here.
///
/// # Errors
/// Returns an error for unsupported tokens or negative values.
pub fn parse_line_height(
    value: &str,
    font_size: f32,
    root_font_size: f32,
) -> Result<LineHeight, ParseError> {
    let line_height = with_single_token(value, |token| match token {
        Token::Ident(ident) if ident.eq_ignore_ascii_case("normal") => Ok(LineHeight::Normal),
        Token::Number { value, .. } => Ok(LineHeight::Number(*value)),
        other => length_from_token(other)
            .map(|length| LineHeight::Px(length.to_px(font_size, root_font_size, font_size))),
    })?;
    match line_height {
        LineHeight::Number(value) | LineHeight::Px(value) if value < 0.0 => {
            Err(ParseError::UnexpectedToken)
        }
        LineHeight::Normal | LineHeight::Number(_) | LineHeight::Px(_) => Ok(line_height),
    }
}

/// Parse a `display` value. Anything laid out as a box that is not inline
/// is treated as block.
///
/// # Errors
/// Returns an error when the value is not a keyword.
pub fn parse_display(value: &str) -> Result<Display, ParseError> {
    with_single_token(value, |token| match token {
        Token::Ident(ident) => Ok(match ident.to_ascii_lowercase().as_str() {
            "none" => Display::None,
            "inline" | "inline-block" | "inline-flex" | "inline-grid" | "contents" => {
                Display::Inline
            }
            _ => Display::Block,
        }),
        _ => Err(ParseError::UnexpectedToken),
    })
}
