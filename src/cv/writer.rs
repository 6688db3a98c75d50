use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use opencv::core::{Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::videoio::VideoWriter;

use super::{draw_overlays, frame_to_mat};
use crate::frame::PixelFormat;
use crate::overlay::AnnotatedFrame;
use crate::sink::{FrameSink, VideoSinkConfig};

/// Video file written through `cv::VideoWriter`.
pub struct CvVideoWriter {
    writer: VideoWriter,
    path: PathBuf,
    frames_written: u64,
}

impl CvVideoWriter {
    pub fn open(config: &VideoSinkConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
        let [a, b, c, d] = config.fourcc.chars();
        let fourcc = VideoWriter::fourcc(a, b, c, d).context("encode fourcc")?;
        let size = Size::new(config.size.width as i32, config.size.height as i32);
        let path = config.path.to_string_lossy().into_owned();
        let writer = VideoWriter::new(&path, fourcc, config.fps, size, true)
            .with_context(|| format!("could not open video writer {}", path))?;
        if !writer.is_opened().context("query video writer state")? {
            bail!(
                "could not open video writer {} (fourcc {}{}{}{})",
                path,
                a,
                b,
                c,
                d
            );
        }
        log::info!(
            "sink: writing {}x{} @ {} fps to {}",
            config.size.width,
            config.size.height,
            config.fps,
            path
        );
        Ok(Self {
            writer,
            path: config.path.clone(),
            frames_written: 0,
        })
    }
}

impl FrameSink for CvVideoWriter {
    fn write(&mut self, frame: &AnnotatedFrame) -> Result<()> {
        let mut mat = frame_to_mat(&frame.frame)?;
        if frame.frame.format == PixelFormat::Gray8 {
            let mut bgr = Mat::default();
            imgproc::cvt_color_def(&mat, &mut bgr, imgproc::COLOR_GRAY2BGR)
                .context("expand gray frame for color writer")?;
            mat = bgr;
        }
        draw_overlays(&mut mat, &frame.overlays)?;
        self.writer
            .write(&mat)
            .with_context(|| format!("write frame to {}", self.path.display()))?;
        self.frames_written += 1;
        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl Drop for CvVideoWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.release() {
            log::warn!("sink: failed to release {}: {}", self.path.display(), e);
        }
    }
}
