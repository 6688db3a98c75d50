//! camera_preview - show a camera feed in a resizable window until Escape

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vision_lessons::display::open_window;
use vision_lessons::session;
use vision_lessons::{open_source, LessonsConfig, SourceSpec, WindowConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Show a camera feed in a resizable window")]
struct Args {
    /// Camera index, local video file, or stub:// source.
    #[arg(default_value = "0")]
    source: String,
    /// Config file (TOML, or JSON when the extension is .json).
    #[arg(long, env = "VISION_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    vision_lessons::init_logging();
    let args = Args::parse();
    let cfg = LessonsConfig::load(args.config.as_deref())?;

    let spec = SourceSpec::parse(&args.source)?;
    let source = open_source(&spec).inspect_err(|e| log::error!("{e:#}"))?;
    let window = open_window(&WindowConfig::resizable(&cfg.window.preview_title))?;

    session::run_preview(source, window)?;
    Ok(())
}
