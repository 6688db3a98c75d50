//! Frame loops for the four lessons.
//!
//! Each runner takes ownership of its source, window or sink, and backend.
//! They are dropped when the runner returns, on every path, which is what
//! releases the underlying capture, writer and window handles.

use anyhow::{anyhow, Result};

use crate::detect::{FaceAnnotator, FaceDetectorBackend};
use crate::display::Display;
use crate::filter::{FilterPipeline, ImageOps, KeyAction, ModeSelector};
use crate::frame::{BoundingBox, FrameSize};
use crate::ingest::{FrameSource, SourceStats};
use crate::keys::{ExitKeys, KEY_POLL_MS};
use crate::overlay::AnnotatedFrame;
use crate::sink::FrameSink;
use crate::track::{TickCounter, Tracker, TrackerKind, TrackingSession};
use crate::ui::FrameProgress;

/// Why a loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The source returned no frame.
    EndOfStream,
    /// The user pressed an exit key.
    ExitKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub exit: ExitReason,
}

impl RunSummary {
    fn log(&self, lesson: &str, stats: &SourceStats) {
        log::info!(
            "{}: stopped after {} frames ({:?}), {} read from {}",
            lesson,
            self.frames_processed,
            self.exit,
            stats.frames_read,
            stats.source
        );
    }
}

/// Show the camera feed unmodified until Escape or end-of-stream.
pub fn run_preview<S, D>(mut source: S, mut display: D) -> Result<RunSummary>
where
    S: FrameSource,
    D: Display,
{
    let mut frames_processed = 0;
    let exit = loop {
        if exit_requested(&mut display, ExitKeys::EscOnly)? {
            break ExitReason::ExitKey;
        }
        let Some(frame) = source.read_frame()? else {
            break ExitReason::EndOfStream;
        };
        display.show(&AnnotatedFrame::new(frame))?;
        frames_processed += 1;
    };
    let summary = RunSummary {
        frames_processed,
        exit,
    };
    summary.log("preview", &source.stats());
    Ok(summary)
}

/// Mirror each frame, apply the selected filter, show it, then read one key.
pub fn run_filters<S, D, O>(
    mut source: S,
    mut display: D,
    mut pipeline: FilterPipeline<O>,
) -> Result<RunSummary>
where
    S: FrameSource,
    D: Display,
    O: ImageOps,
{
    let mut selector = ModeSelector::new(ExitKeys::EscOrQ);
    let mut frames_processed = 0;
    log::info!(
        "filters: starting in {} mode (ops backend: {})",
        selector.current(),
        pipeline.ops().name()
    );
    let exit = loop {
        let Some(mut frame) = source.read_frame()? else {
            break ExitReason::EndOfStream;
        };
        frame.mirror_horizontal();
        let result = pipeline.apply(selector.current(), frame)?;
        display.show(&result)?;
        frames_processed += 1;

        if let Some(key) = display.poll_key(KEY_POLL_MS)? {
            match selector.on_key(key) {
                KeyAction::Exit => break ExitReason::ExitKey,
                KeyAction::Switched(mode) => log::debug!("filters: switched to {} mode", mode),
                KeyAction::Ignored => {}
            }
        }
    };
    let summary = RunSummary {
        frames_processed,
        exit,
    };
    summary.log("filters", &source.stats());
    Ok(summary)
}

/// Mirror each frame, detect faces and show boxes above the threshold.
pub fn run_face_detection<S, D, B>(
    mut source: S,
    mut display: D,
    mut backend: B,
    annotator: &FaceAnnotator,
) -> Result<RunSummary>
where
    S: FrameSource,
    D: Display,
    B: FaceDetectorBackend,
{
    backend.warm_up()?;
    log::info!(
        "faces: backend {} with confidence threshold {}",
        backend.name(),
        annotator.threshold()
    );
    let mut frames_processed = 0;
    let exit = loop {
        if exit_requested(&mut display, ExitKeys::EscOnly)? {
            break ExitReason::ExitKey;
        }
        let Some(mut frame) = source.read_frame()? else {
            break ExitReason::EndOfStream;
        };
        frame.mirror_horizontal();
        let detections = backend.detect(&frame)?;
        let annotated = annotator.annotate(frame, &detections);
        display.show(&annotated)?;
        frames_processed += 1;
    };
    let summary = RunSummary {
        frames_processed,
        exit,
    };
    summary.log("faces", &source.stats());
    Ok(summary)
}

/// Result of a tracking run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingSummary {
    pub kind: TrackerKind,
    pub frames_written: u64,
    pub lost_frames: u64,
}

/// Track one object through a whole video and write every annotated frame.
///
/// The first frame seeds the tracker with `initial_bbox`; an unreadable first
/// frame is fatal. `open_sink` is called once, after the tracker accepted the
/// seed, with the size the source reports (or the first frame's size when the
/// source reports none).
pub fn run_tracking<S, T, C, K, F>(
    mut source: S,
    tracker: T,
    clock: C,
    initial_bbox: BoundingBox,
    open_sink: F,
    progress: &FrameProgress,
) -> Result<TrackingSummary>
where
    S: FrameSource,
    T: Tracker,
    C: TickCounter,
    K: FrameSink,
    F: FnOnce(FrameSize) -> Result<K>,
{
    let first = source
        .read_frame()?
        .ok_or_else(|| anyhow!("could not read the first frame"))?;
    let size = source.frame_size().unwrap_or_else(|| first.size());

    let (mut session, annotated) = TrackingSession::start(tracker, clock, first, initial_bbox)?;
    let mut sink = open_sink(size)?;
    sink.write(&annotated)?;
    progress.inc();

    while let Some(frame) = source.read_frame()? {
        let (annotated, _) = session.process(frame)?;
        sink.write(&annotated)?;
        progress.inc();
    }
    progress.finish();

    let summary = TrackingSummary {
        kind: session.kind(),
        frames_written: sink.frames_written(),
        lost_frames: session.lost_frames(),
    };
    let stats = source.stats();
    log::info!(
        "tracking: {} frames read from {}, {} written",
        stats.frames_read,
        stats.source,
        summary.frames_written
    );
    if summary.lost_frames > 0 {
        log::warn!(
            "tracking: target lost on {} of {} frames",
            summary.lost_frames,
            summary.frames_written
        );
    }
    Ok(summary)
}

fn exit_requested<D: Display>(display: &mut D, exit_keys: ExitKeys) -> Result<bool> {
    Ok(display
        .poll_key(KEY_POLL_MS)?
        .is_some_and(|key| exit_keys.is_exit(key)))
}
