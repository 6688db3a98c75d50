//! Vision lessons
//!
//! Four small computer-vision programs built on one shared shell:
//! open a source, loop over frames, apply one library operation per frame,
//! then show or save the result.
//!
//! # Lessons
//!
//! - `camera_preview`: raw camera feed in a resizable window.
//! - `camera_filters`: live switching between preview, blur, corner features,
//!   Canny edges and bilateral smoothing.
//! - `object_tracker`: single-object tracking over a video file, written to
//!   an annotated output video.
//! - `face_detect`: SSD face detection with confidence labels.
//!
//! # Module Structure
//!
//! - `frame`, `overlay`: pixel buffers, geometry and drawing commands
//! - `ingest`, `sink`, `display`: sources, video writers and windows
//! - `filter`, `track`, `detect`: per-frame operations behind capability traits
//! - `session`: the frame loops
//! - `config`, `ui`: settings and terminal feedback
//! - `cv`: OpenCV bindings for every trait (feature: backend-opencv)

pub mod config;
#[cfg(feature = "backend-opencv")]
pub mod cv;
pub mod detect;
pub mod display;
pub mod filter;
pub mod frame;
pub mod ingest;
pub mod keys;
pub mod overlay;
pub mod session;
pub mod sink;
pub mod track;
pub mod ui;

pub use config::LessonsConfig;
pub use detect::{Detection, FaceAnnotator, FaceDetectorBackend};
pub use display::{Display, WindowConfig};
pub use filter::{FilterMode, FilterParams, FilterPipeline, ImageOps, ModeSelector};
pub use frame::{BoundingBox, Frame, FrameSize, PixelFormat, Point};
pub use ingest::{open_source, FrameSource, SourceSpec};
pub use overlay::{AnnotatedFrame, Color, Overlay};
pub use session::{ExitReason, RunSummary, TrackingSummary};
pub use sink::{FrameSink, VideoSinkConfig};
pub use track::{Tracker, TrackerKind};

/// Initialise `env_logger` at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
