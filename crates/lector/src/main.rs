#![forbid(unsafe_code)]

use crate::cli::Cli;
use crate::report::Report;
use anyhow::{Context as _, Error};
use clap::Parser as _;
use env_logger::Env;
use log::{error, info};
use page::ReadablePage;
use std::fs;
use std::io::{self, Write as _};
use std::process::ExitCode;

mod cli;
mod report;

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let html = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let config = cli.config();
    info!("Loading {} with {config:?}", cli.file.display());
    let page = ReadablePage::from_html(&html, config)?;
    if let Some(scroll) = cli.scroll {
        page.scroll_to(scroll.x, scroll.y);
    }

    let report = Report::collect(&page, &cli.moves, cli.dump_dom);
    let mut out = io::stdout().lock();
    if cli.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;
    Ok(())
}
