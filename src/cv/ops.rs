use anyhow::{Context, Result};
use opencv::core::{self, Mat, Point, Point2f, Size, Vector};
use opencv::imgproc;

use super::{frame_to_mat, mat_to_frame};
use crate::filter::{BilateralParams, CornerParams, ImageOps};
use crate::frame::{Frame, PixelFormat};

/// `ImageOps` over `opencv::imgproc`.
#[derive(Default)]
pub struct CvImageOps;

impl CvImageOps {
    pub fn new() -> Self {
        Self
    }
}

impl ImageOps for CvImageOps {
    fn name(&self) -> &'static str {
        "opencv"
    }

    fn blur(&mut self, frame: &Frame, kernel: (u32, u32)) -> Result<Frame> {
        let src = frame_to_mat(frame)?;
        let mut dst = Mat::default();
        imgproc::blur(
            &src,
            &mut dst,
            Size::new(kernel.0 as i32, kernel.1 as i32),
            Point::new(-1, -1),
            core::BORDER_DEFAULT,
        )
        .context("blur")?;
        mat_to_frame(&dst)
    }

    fn bilateral(&mut self, frame: &Frame, params: &BilateralParams) -> Result<Frame> {
        let src = frame_to_mat(frame)?;
        let mut dst = Mat::default();
        imgproc::bilateral_filter(
            &src,
            &mut dst,
            params.diameter,
            params.sigma_color,
            params.sigma_space,
            core::BORDER_DEFAULT,
        )
        .context("bilateral filter")?;
        mat_to_frame(&dst)
    }

    fn canny(&mut self, frame: &Frame, low_threshold: f64, high_threshold: f64) -> Result<Frame> {
        let src = frame_to_mat(frame)?;
        let mut dst = Mat::default();
        imgproc::canny(&src, &mut dst, low_threshold, high_threshold, 3, false)
            .context("canny")?;
        mat_to_frame(&dst)
    }

    fn to_gray(&mut self, frame: &Frame) -> Result<Frame> {
        if frame.format == PixelFormat::Gray8 {
            return Ok(frame.clone());
        }
        let src = frame_to_mat(frame)?;
        let mut dst = Mat::default();
        imgproc::cvt_color_def(&src, &mut dst, imgproc::COLOR_BGR2GRAY).context("to gray")?;
        mat_to_frame(&dst)
    }

    fn good_features(&mut self, gray: &Frame, params: &CornerParams) -> Result<Vec<(f32, f32)>> {
        let src = frame_to_mat(gray)?;
        let mut corners = Vector::<Point2f>::new();
        imgproc::good_features_to_track(
            &src,
            &mut corners,
            params.max_corners,
            params.quality_level,
            params.min_distance,
            &core::no_array(),
            params.block_size,
            false,
            0.04,
        )
        .context("good features to track")?;
        Ok(corners.iter().map(|p| (p.x, p.y)).collect())
    }
}
