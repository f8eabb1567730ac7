use clap::{ArgAction, Parser};
use hover::FirstLineMetric;
use layout::{ClientPoint, ScrollOffset};
use page::LectorConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lector")]
#[command(about = "Find the readable elements of an HTML page and replay pointer moves over them")]
#[command(version)]
pub struct Cli {
    /// HTML file to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Pointer position in client coordinates, repeatable
    #[arg(long = "move", value_name = "X,Y", value_parser = parse_client_point, action = ArgAction::Append)]
    pub moves: Vec<ClientPoint>,

    /// Scroll offset applied before the pointer moves
    #[arg(long, value_name = "X,Y", value_parser = parse_scroll)]
    pub scroll: Option<ScrollOffset>,

    /// Viewport width in CSS pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height in CSS pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// What sizes the hover player: font-size or line-height
    #[arg(long)]
    pub metric: Option<FirstLineMetric>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also print the parsed DOM
    #[arg(long)]
    pub dump_dom: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Environment configuration with command line overrides applied.
    pub fn config(&self) -> LectorConfig {
        let base = LectorConfig::from_env();
        LectorConfig::new(
            self.width.unwrap_or(base.viewport.width),
            self.height.unwrap_or(base.viewport.height),
            base.default_font_size,
            self.metric.unwrap_or(base.first_line_metric),
            base.glyph_ratio,
        )
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_pair(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {value:?}"))?;
    let coordinate = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| format!("{part:?} is not a number"))
    };
    Ok((coordinate(x)?, coordinate(y)?))
}

fn parse_client_point(value: &str) -> Result<ClientPoint, String> {
    parse_pair(value).map(|(x, y)| ClientPoint::new(x, y))
}

fn parse_scroll(value: &str) -> Result<ScrollOffset, String> {
    parse_pair(value).map(|(x, y)| ScrollOffset { x, y })
}
