//! Frame sources.
//!
//! This module provides the sources a lesson can read from:
//! - Cameras by index (feature: backend-opencv)
//! - Local video files (feature: backend-opencv)
//! - Synthetic `stub://` sources (always available, used by tests and dry runs)
//!
//! Every source hands out owned `Frame` values one at a time. A source signals
//! end-of-stream by returning `Ok(None)`; callers stop on the first such read
//! and do not retry. Handles are released when the source is dropped.

mod synthetic;

use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::frame::{Frame, FrameSize};

pub use synthetic::{SyntheticConfig, SyntheticSource};

/// Where frames come from, as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    /// Camera device index (0 is the default webcam).
    Camera(i32),
    /// Local video file.
    File(PathBuf),
    /// Synthetic frames, `stub://<name>[?frames=N&width=W&height=H]`.
    Synthetic(String),
}

impl SourceSpec {
    /// Parse a positional argument. Integers select a camera, `stub://` URLs a
    /// synthetic source, and anything else is treated as a local file path.
    pub fn parse(arg: &str) -> Result<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(anyhow!("video source must not be empty"));
        }
        if let Ok(index) = arg.parse::<i32>() {
            if index < 0 {
                return Err(anyhow!("camera index must be >= 0, got {}", index));
            }
            return Ok(SourceSpec::Camera(index));
        }
        if arg.starts_with("stub://") {
            return Ok(SourceSpec::Synthetic(arg.to_string()));
        }
        if arg.contains("://") {
            return Err(anyhow!(
                "video source only supports camera indices and local paths (no URL schemes)"
            ));
        }
        Ok(SourceSpec::File(PathBuf::from(arg)))
    }
}

impl Default for SourceSpec {
    fn default() -> Self {
        SourceSpec::Camera(0)
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Camera(index) => write!(f, "camera {}", index),
            SourceSpec::File(path) => write!(f, "{}", path.display()),
            SourceSpec::Synthetic(url) => f.write_str(url),
        }
    }
}

/// A blocking producer of frames.
pub trait FrameSource {
    /// Read the next frame. `Ok(None)` is end-of-stream.
    fn read_frame(&mut self) -> Result<Option<Frame>>;

    /// Frame size reported by the source, when known.
    fn frame_size(&self) -> Option<FrameSize>;

    fn stats(&self) -> SourceStats;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        (**self).read_frame()
    }

    fn frame_size(&self) -> Option<FrameSize> {
        (**self).frame_size()
    }

    fn stats(&self) -> SourceStats {
        (**self).stats()
    }
}

/// Statistics for a frame source.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_read: u64,
    pub source: String,
}

/// Open a source. Failure is fatal for every lesson; the error names the
/// source so the binary can print a useful diagnostic.
pub fn open_source(spec: &SourceSpec) -> Result<Box<dyn FrameSource>> {
    match spec {
        SourceSpec::Synthetic(url) => {
            let config = SyntheticConfig::from_url(url)?;
            Ok(Box::new(SyntheticSource::new(config)))
        }
        SourceSpec::File(path) if !path.is_file() => Err(anyhow!(
            "could not open video source {}: no such file",
            path.display()
        )),
        #[cfg(feature = "backend-opencv")]
        SourceSpec::Camera(_) | SourceSpec::File(_) => {
            Ok(Box::new(crate::cv::CvCapture::open(spec)?))
        }
        #[cfg(not(feature = "backend-opencv"))]
        SourceSpec::Camera(_) | SourceSpec::File(_) => Err(anyhow!(
            "could not open video source {}: built without the backend-opencv feature",
            spec
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_camera_indices() -> Result<()> {
        assert_eq!(SourceSpec::parse("0")?, SourceSpec::Camera(0));
        assert_eq!(SourceSpec::parse(" 2 ")?, SourceSpec::Camera(2));
        assert!(SourceSpec::parse("-1").is_err());
        Ok(())
    }

    #[test]
    fn paths_and_stubs() -> Result<()> {
        assert_eq!(
            SourceSpec::parse("datos/video.mp4")?,
            SourceSpec::File(PathBuf::from("datos/video.mp4"))
        );
        assert_eq!(
            SourceSpec::parse("stub://demo?frames=3")?,
            SourceSpec::Synthetic("stub://demo?frames=3".to_string())
        );
        assert!(SourceSpec::parse("rtsp://camera").is_err());
        assert!(SourceSpec::parse("").is_err());
        Ok(())
    }

    #[test]
    fn missing_file_is_a_fatal_open_error() {
        let spec = SourceSpec::File(PathBuf::from("/definitely/not/here.mp4"));
        let err = open_source(&spec).err().expect("open must fail");
        let message = err.to_string();
        assert!(message.contains("could not open video source"), "{message}");
        assert!(message.contains("/definitely/not/here.mp4"), "{message}");
    }

    #[test]
    fn synthetic_source_opens() -> Result<()> {
        let mut source = open_source(&SourceSpec::parse("stub://test?frames=2")?)?;
        assert!(source.read_frame()?.is_some());
        assert!(source.read_frame()?.is_some());
        assert!(source.read_frame()?.is_none());
        assert_eq!(source.stats().frames_read, 2);
        Ok(())
    }
}
