use anyhow::{Context, Result};
use opencv::core::{self, Mat, Scalar};
use opencv::imgproc;

use crate::frame::Point;
use crate::overlay::{Color, Overlay};

/// Rasterise overlays in order onto `mat`.
pub(crate) fn draw_overlays(mat: &mut Mat, overlays: &[Overlay]) -> Result<()> {
    for overlay in overlays {
        match overlay {
            Overlay::Rectangle {
                top_left,
                bottom_right,
                color,
                thickness,
            } => imgproc::rectangle_points(
                mat,
                cv_point(*top_left),
                cv_point(*bottom_right),
                scalar(*color),
                *thickness,
                imgproc::LINE_8,
                0,
            )
            .context("draw rectangle")?,
            Overlay::Circle {
                center,
                radius,
                color,
                thickness,
            } => imgproc::circle(
                mat,
                cv_point(*center),
                *radius,
                scalar(*color),
                *thickness,
                imgproc::LINE_8,
                0,
            )
            .context("draw circle")?,
            Overlay::Text {
                text,
                origin,
                scale,
                color,
                thickness,
            } => imgproc::put_text(
                mat,
                text,
                cv_point(*origin),
                imgproc::FONT_HERSHEY_SIMPLEX,
                *scale,
                scalar(*color),
                *thickness,
                imgproc::LINE_8,
                false,
            )
            .context("draw text")?,
        }
    }
    Ok(())
}

fn cv_point(p: Point) -> core::Point {
    core::Point::new(p.x, p.y)
}

fn scalar(c: Color) -> Scalar {
    Scalar::new(c.b as f64, c.g as f64, c.r as f64, 0.0)
}
