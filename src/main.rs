use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use snipmark::Config;
use snipmark::backend::{self, RunOptions, Script};
use snipmark::capture::{GrimSource, PngFileSource, ScreenSource};
use snipmark::util::Rect;

#[derive(Parser, Debug)]
#[command(name = "snipmark")]
#[command(version, about = "Screen capture and annotation tool")]
struct Cli {
    /// Use this PNG instead of capturing the screen with grim
    #[arg(long, value_name = "PNG")]
    screenshot: Option<PathBuf>,

    /// Select a region without dragging: X,Y,W,H
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_region)]
    region: Option<Rect>,

    /// Replay pointer/key events from a TOML script
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Save the result; without a path a name is generated in the save directory
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    save: Option<Option<PathBuf>>,

    /// Copy the result to the clipboard
    #[arg(long)]
    copy: bool,

    /// Configuration file (defaults to ~/.config/snipmark/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the on-screen rendering of the final session state to a PNG
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,
}

fn parse_region(value: &str) -> Result<Rect, String> {
    let parts: Vec<i32> = value
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid number in region '{}': {}", value, e))?;

    match parts.as_slice() {
        [x, y, width, height] => Rect::new(*x, *y, *width, *height)
            .ok_or_else(|| format!("region '{}' must have a positive size", value)),
        _ => Err(format!("expected X,Y,W,H, got '{}'", value)),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let script = cli
        .script
        .as_deref()
        .map(Script::load)
        .transpose()
        .context("Failed to load event script")?;

    let source: Box<dyn ScreenSource> = match cli.screenshot {
        Some(path) => Box::new(PngFileSource::new(path)),
        None => {
            log::info!("No --screenshot given; capturing with grim");
            Box::new(GrimSource::default())
        }
    };

    let options = RunOptions {
        region: cli.region,
        script,
        save: cli.save,
        copy: cli.copy,
        preview: cli.preview,
    };

    let outcome = backend::run_headless(source.as_ref(), &config, options)?;
    println!("{}", outcome);
    Ok(())
}
