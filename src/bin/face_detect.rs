//! face_detect - SSD face detection on a mirrored camera feed

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vision_lessons::detect::CaffeSsdBackend;
use vision_lessons::display::open_window;
use vision_lessons::session;
use vision_lessons::{open_source, FaceAnnotator, LessonsConfig, SourceSpec, WindowConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Detect faces with a pre-trained Caffe SSD model and label their confidence"
)]
struct Args {
    /// Camera index, local video file, or stub:// source.
    #[arg(default_value = "0")]
    source: String,
    /// Config file (TOML, or JSON when the extension is .json).
    #[arg(long, env = "VISION_CONFIG")]
    config: Option<PathBuf>,
    /// Network definition (deploy.prototxt).
    #[arg(long, env = "VISION_FACE_PROTOTXT")]
    prototxt: Option<PathBuf>,
    /// Network weights (.caffemodel).
    #[arg(long, env = "VISION_FACE_MODEL")]
    model: Option<PathBuf>,
    /// Minimum confidence (exclusive) for a detection to be drawn.
    #[arg(long, env = "VISION_FACE_THRESHOLD")]
    threshold: Option<f32>,
}

fn main() -> Result<()> {
    vision_lessons::init_logging();
    let args = Args::parse();
    let mut cfg = LessonsConfig::load(args.config.as_deref())?;
    if let Some(prototxt) = args.prototxt {
        cfg.face.prototxt = prototxt;
    }
    if let Some(model) = args.model {
        cfg.face.model = model;
    }
    if let Some(threshold) = args.threshold {
        cfg.face.threshold = threshold;
    }

    let spec = SourceSpec::parse(&args.source)?;
    let source = open_source(&spec).inspect_err(|e| log::error!("{e:#}"))?;
    let window = open_window(&WindowConfig::resizable(&cfg.window.preview_title))?;
    let backend = CaffeSsdBackend::new(&cfg.face).inspect_err(|e| log::error!("{e:#}"))?;
    let annotator = FaceAnnotator::new(cfg.face.threshold)?;

    session::run_face_detection(source, window, backend, &annotator)?;
    Ok(())
}
