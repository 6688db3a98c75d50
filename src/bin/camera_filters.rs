//! camera_filters - live filter switching on a mirrored camera feed
//!
//! Keys: P preview, B blur, F corner features, C Canny edges, L bilateral.
//! Q or Escape quits.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vision_lessons::cv::CvImageOps;
use vision_lessons::display::open_window;
use vision_lessons::session;
use vision_lessons::{open_source, FilterPipeline, LessonsConfig, SourceSpec, WindowConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Switch between image filters on a live camera feed")]
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
    let window = open_window(&WindowConfig::resizable(&cfg.window.filters_title))?;
    let source = open_source(&spec).inspect_err(|e| log::error!("{e:#}"))?;
    let pipeline = FilterPipeline::new(CvImageOps::new(), cfg.filters.clone());

    session::run_filters(source, window, pipeline)?;
    Ok(())
}
