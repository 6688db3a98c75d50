use anyhow::{bail, Context, Result};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use super::mat_to_frame;
use crate::frame::{Frame, FrameSize};
use crate::ingest::{FrameSource, SourceSpec, SourceStats};

/// Camera or video file opened through `cv::VideoCapture`.
pub struct CvCapture {
    capture: VideoCapture,
    source: String,
    frames_read: u64,
}

impl CvCapture {
    pub fn open(spec: &SourceSpec) -> Result<Self> {
        let source = spec.to_string();
        let capture = match spec {
            SourceSpec::Camera(index) => VideoCapture::new(*index, videoio::CAP_ANY),
            SourceSpec::File(path) => {
                VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)
            }
            SourceSpec::Synthetic(url) => {
                bail!("{} is synthetic and cannot be opened with OpenCV", url)
            }
        }
        .with_context(|| format!("could not open video source {}", source))?;

        if !capture
            .is_opened()
            .with_context(|| format!("could not open video source {}", source))?
        {
            bail!("could not open video source {}", source);
        }
        log::info!("source: opened {} (opencv)", source);
        Ok(Self {
            capture,
            source,
            frames_read: 0,
        })
    }

    fn property(&self, prop: i32) -> Option<u32> {
        let value = self.capture.get(prop).ok()?;
        (value.is_finite() && value >= 1.0).then(|| value as u32)
    }
}

impl FrameSource for CvCapture {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        let mut mat = Mat::default();
        let has_frame = self
            .capture
            .read(&mut mat)
            .with_context(|| format!("read frame from {}", self.source))?;
        if !has_frame || mat.empty() {
            return Ok(None);
        }
        self.frames_read += 1;
        mat_to_frame(&mat).map(Some)
    }

    fn frame_size(&self) -> Option<FrameSize> {
        Some(FrameSize {
            width: self.property(videoio::CAP_PROP_FRAME_WIDTH)?,
            height: self.property(videoio::CAP_PROP_FRAME_HEIGHT)?,
        })
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_read: self.frames_read,
            source: self.source.clone(),
        }
    }
}

impl Drop for CvCapture {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            log::warn!("source: failed to release {}: {}", self.source, e);
        } else {
            log::debug!("source: released {}", self.source);
        }
    }
}
