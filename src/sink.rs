//! Video file output.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::frame::FrameSize;
use crate::overlay::AnnotatedFrame;

pub const DEFAULT_FOURCC: &str = "avc1";
pub const DEFAULT_OUTPUT_FPS: f64 = 10.0;

/// A consumer of annotated frames. Overlays are rasterised by the sink.
pub trait FrameSink {
    fn write(&mut self, frame: &AnnotatedFrame) -> Result<()>;

    /// Frames accepted so far.
    fn frames_written(&self) -> u64;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn write(&mut self, frame: &AnnotatedFrame) -> Result<()> {
        (**self).write(frame)
    }

    fn frames_written(&self) -> u64 {
        (**self).frames_written()
    }
}

/// Four-character codec tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fourcc([u8; 4]);

impl Fourcc {
    pub fn parse(tag: &str) -> Result<Self> {
        let bytes = tag.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(anyhow!(
                "fourcc must be exactly four printable ASCII characters, got '{}'",
                tag
            ));
        }
        Ok(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn chars(&self) -> [char; 4] {
        self.0.map(char::from)
    }
}

/// Settings for a video file sink.
#[derive(Clone, Debug)]
pub struct VideoSinkConfig {
    pub path: PathBuf,
    pub fourcc: Fourcc,
    pub fps: f64,
    /// Output size; always the input video's frame size.
    pub size: FrameSize,
}

impl VideoSinkConfig {
    pub fn new(path: PathBuf, fourcc: &str, fps: f64, size: FrameSize) -> Result<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(anyhow!("output fps must be greater than zero"));
        }
        if size.width == 0 || size.height == 0 {
            return Err(anyhow!(
                "output frame size must be non-zero, got {}x{}",
                size.width,
                size.height
            ));
        }
        Ok(Self {
            path,
            fourcc: Fourcc::parse(fourcc)?,
            fps,
            size,
        })
    }
}

/// Open a video file sink.
#[cfg(feature = "backend-opencv")]
pub fn open_video_sink(config: &VideoSinkConfig) -> Result<Box<dyn FrameSink>> {
    Ok(Box::new(crate::cv::CvVideoWriter::open(config)?))
}

#[cfg(not(feature = "backend-opencv"))]
pub fn open_video_sink(config: &VideoSinkConfig) -> Result<Box<dyn FrameSink>> {
    Err(anyhow!(
        "could not open video writer {}: built without the backend-opencv feature",
        config.path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourcc_requires_four_ascii_chars() -> Result<()> {
        assert_eq!(Fourcc::parse("avc1")?.chars(), ['a', 'v', 'c', '1']);
        assert!(Fourcc::parse("mp4").is_err());
        assert!(Fourcc::parse("mp4v2").is_err());
        assert!(Fourcc::parse("a c1").is_err());
        Ok(())
    }

    #[test]
    fn sink_config_validates_rate_and_size() {
        let size = FrameSize {
            width: 640,
            height: 480,
        };
        assert!(VideoSinkConfig::new("out.mp4".into(), "avc1", 10.0, size).is_ok());
        assert!(VideoSinkConfig::new("out.mp4".into(), "avc1", 0.0, size).is_err());
        assert!(VideoSinkConfig::new("out.mp4".into(), "avc1", f64::NAN, size).is_err());
        let empty = FrameSize {
            width: 0,
            height: 480,
        };
        assert!(VideoSinkConfig::new("out.mp4".into(), "avc1", 10.0, empty).is_err());
    }
}
