//! Runtime settings for lector pages.
//!
//! Settings can be built explicitly or read from `LECTOR_*` environment
//! variables. Out-of-range or unparsable values fall back to defaults.

use hover::FirstLineMetric;
use layout::{LayoutOptions, Viewport};
use log::warn;
use std::env;
use style::{DEFAULT_FONT_SIZE, StyleOptions};

const DEFAULT_GLYPH_RATIO: f32 = 0.5;
const GLYPH_RATIO_RANGE: (f32, f32) = (0.1, 2.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LectorConfig {
    /// Size of the window pages are laid out for.
    pub viewport: Viewport,
    /// Font size of `medium`, also the size the first-line rule compares against.
    pub default_font_size: f32,
    /// Which computed value sizes the hover player.
    pub first_line_metric: FirstLineMetric,
    /// Average glyph advance as a fraction of the font size.
    pub glyph_ratio: f32,
}

impl Default for LectorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            default_font_size: DEFAULT_FONT_SIZE,
            first_line_metric: FirstLineMetric::default(),
            glyph_ratio: DEFAULT_GLYPH_RATIO,
        }
    }
}

impl LectorConfig {
    /// Construct a config, clamping sizes to at least one pixel and the glyph
    /// ratio into `0.1..=2.0`.
    pub fn new(
        viewport_width: f32,
        viewport_height: f32,
        default_font_size: f32,
        first_line_metric: FirstLineMetric,
        glyph_ratio: f32,
    ) -> Self {
        let (min_ratio, max_ratio) = GLYPH_RATIO_RANGE;
        Self {
            viewport: Viewport {
                width: at_least_one(viewport_width),
                height: at_least_one(viewport_height),
            },
            default_font_size: at_least_one(default_font_size),
            first_line_metric,
            glyph_ratio: if glyph_ratio.is_finite() {
                glyph_ratio.clamp(min_ratio, max_ratio)
            } else {
                DEFAULT_GLYPH_RATIO
            },
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `LECTOR_VIEWPORT_WIDTH`, `LECTOR_VIEWPORT_HEIGHT`: window size (default 1280x720)
    /// - `LECTOR_DEFAULT_FONT_SIZE`: default font size in px (default 16)
    /// - `LECTOR_FIRST_LINE_METRIC`: `font-size` or `line-height` (default `font-size`)
    /// - `LECTOR_GLYPH_RATIO`: average glyph advance per font size (default 0.5)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`LectorConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, fallback: f32| {
            lookup(key)
                .and_then(|val| match val.trim().parse::<f32>() {
                    Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Some(parsed),
                    _ => {
                        warn!("Ignoring {key}={val:?}");
                        None
                    }
                })
                .unwrap_or(fallback)
        };
        let first_line_metric = lookup("LECTOR_FIRST_LINE_METRIC")
            .and_then(|val| {
                val.parse::<FirstLineMetric>()
                    .map_err(|err| warn!("Ignoring LECTOR_FIRST_LINE_METRIC: {err}"))
                    .ok()
            })
            .unwrap_or(defaults.first_line_metric);
        Self::new(
            number("LECTOR_VIEWPORT_WIDTH", defaults.viewport.width),
            number("LECTOR_VIEWPORT_HEIGHT", defaults.viewport.height),
            number("LECTOR_DEFAULT_FONT_SIZE", defaults.default_font_size),
            first_line_metric,
            number("LECTOR_GLYPH_RATIO", defaults.glyph_ratio),
        )
    }

    pub fn style_options(&self) -> StyleOptions {
        StyleOptions {
            default_font_size: self.default_font_size,
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            viewport: self.viewport,
            glyph_ratio: self.glyph_ratio,
        }
    }
}

fn at_least_one(value: f32) -> f32 {
    if value.is_finite() { value.max(1.0) } else { 1.0 }
}
