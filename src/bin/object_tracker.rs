//! object_tracker - track one object through a video file
//!
//! This tool:
//! 1. Opens the input video and reads its first frame (fatal if either fails)
//! 2. Seeds the tracker with the configured bounding box
//! 3. Updates the tracker on every frame, drawing the box or a failure label
//! 4. Writes every annotated frame to the output video

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vision_lessons::cv::CvTracker;
use vision_lessons::sink::open_video_sink;
use vision_lessons::track::{default_output_path, InstantTicks};
use vision_lessons::ui::{Ui, UiMode};
use vision_lessons::{open_source, session, LessonsConfig, SourceSpec, TrackerKind, VideoSinkConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Track a single object through a video and save the result")]
struct Args {
    /// Input video file.
    #[arg(long, env = "VISION_TRACKER_INPUT")]
    input: Option<PathBuf>,
    /// Output video file (defaults to <input dir>/Saved/<stem>-<TRACKER>.mp4).
    #[arg(long, env = "VISION_TRACKER_OUTPUT")]
    output: Option<PathBuf>,
    /// Tracker algorithm (goturn|mil).
    #[arg(long, env = "VISION_TRACKER_KIND")]
    tracker: Option<TrackerKind>,
    /// Config file (TOML, or JSON when the extension is .json).
    #[arg(long, env = "VISION_CONFIG")]
    config: Option<PathBuf>,
    /// UI mode for stderr progress (auto|plain|pretty)
    #[arg(long, default_value = "auto", value_name = "MODE")]
    ui: UiMode,
}

fn main() -> Result<()> {
    vision_lessons::init_logging();
    let args = Args::parse();
    let mut cfg = LessonsConfig::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        cfg.tracking.input = input;
    }
    if let Some(output) = args.output {
        cfg.tracking.output = Some(output);
    }
    if let Some(kind) = args.tracker {
        cfg.tracking.tracker = kind;
    }
    let tracking = &cfg.tracking;
    let output = tracking
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&tracking.input, tracking.tracker));

    let ui = Ui::detect(args.ui);
    let source = {
        let _stage = ui.stage("Open input video");
        open_source(&SourceSpec::File(tracking.input.clone()))
            .inspect_err(|e| log::error!("{e:#}"))?
    };
    let tracker = {
        let _stage = ui.stage(&format!("Create {} tracker", tracking.tracker));
        CvTracker::create(tracking).inspect_err(|e| log::error!("{e:#}"))?
    };

    let progress = ui.frame_progress(None);
    let summary = session::run_tracking(
        source,
        tracker,
        InstantTicks::new(),
        tracking.initial_bbox,
        |size| {
            let sink_cfg =
                VideoSinkConfig::new(output.clone(), &tracking.fourcc, tracking.fps, size)?;
            open_video_sink(&sink_cfg)
        },
        &progress,
    )
    .inspect_err(|e| log::error!("{e:#}"))?;

    log::info!(
        "{} frames written, target lost on {}",
        summary.frames_written,
        summary.lost_frames
    );
    log::info!("Video saved for {}: {}", summary.kind, output.display());
    Ok(())
}
