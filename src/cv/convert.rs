use anyhow::{bail, Context, Result};
use opencv::core::{Mat, Scalar, CV_8UC1, CV_8UC3, CV_8UC4};
use opencv::imgproc;
use opencv::prelude::*;

use crate::frame::{Frame, PixelFormat};

/// Copy a frame into a freshly allocated, continuous `Mat`.
pub(crate) fn frame_to_mat(frame: &Frame) -> Result<Mat> {
    let typ = match frame.format {
        PixelFormat::Bgr24 => CV_8UC3,
        PixelFormat::Gray8 => CV_8UC1,
    };
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height as i32,
        frame.width as i32,
        typ,
        Scalar::all(0.0),
    )
    .context("allocate OpenCV frame")?;
    mat.data_bytes_mut()
        .context("access OpenCV frame bytes")?
        .copy_from_slice(frame.data());
    Ok(mat)
}

/// Copy an 8-bit `Mat` out into a `Frame`. BGRA input is reduced to BGR.
pub(crate) fn mat_to_frame(mat: &Mat) -> Result<Frame> {
    let converted;
    let (mat, format) = match mat.typ() {
        CV_8UC3 => (mat, PixelFormat::Bgr24),
        CV_8UC1 => (mat, PixelFormat::Gray8),
        CV_8UC4 => {
            let mut bgr = Mat::default();
            imgproc::cvt_color_def(mat, &mut bgr, imgproc::COLOR_BGRA2BGR)
                .context("convert BGRA frame to BGR")?;
            converted = bgr;
            (&converted, PixelFormat::Bgr24)
        }
        other => bail!("unsupported OpenCV frame type {}", other),
    };

    let continuous;
    let mat = if mat.is_continuous() {
        mat
    } else {
        continuous = mat.try_clone().context("copy non-continuous frame")?;
        &continuous
    };

    let data = mat
        .data_bytes()
        .context("read OpenCV frame bytes")?
        .to_vec();
    Frame::new(data, mat.cols() as u32, mat.rows() as u32, format)
}
