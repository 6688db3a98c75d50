//! Live filter switching.
//!
//! `FilterPipeline` turns one mirrored camera frame into a displayable frame
//! according to the current `FilterMode`. The only thing the pipeline does on
//! its own is lay out corner circles; everything else is an `ImageOps` call.

mod mode;
mod ops;

pub use mode::{FilterMode, KeyAction, ModeSelector};
pub use ops::ImageOps;

use anyhow::Result;
use serde::Deserialize;

use crate::frame::{Frame, Point};
use crate::overlay::{AnnotatedFrame, Color, Overlay};

/// Bilateral filter settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Diameter of each pixel neighbourhood.
    pub diameter: i32,
    pub sigma_color: f64,
    pub sigma_space: f64,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 15,
            sigma_color: 75.0,
            sigma_space: 75.0,
        }
    }
}

/// Corner detector settings (`goodFeaturesToTrack`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CornerParams {
    pub max_corners: i32,
    /// Minimal accepted quality relative to the best corner, in `(0, 1]`.
    pub quality_level: f64,
    pub min_distance: f64,
    pub block_size: i32,
    /// Circle radius used to mark each corner.
    pub marker_radius: i32,
}

impl Default for CornerParams {
    fn default() -> Self {
        Self {
            max_corners: 1000,
            quality_level: 0.5,
            min_distance: 10.0,
            block_size: 8,
            marker_radius: 10,
        }
    }
}

/// Canny thresholds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub low_threshold: f64,
    pub high_threshold: f64,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 70.0,
            high_threshold: 200.0,
        }
    }
}

/// All tunables of the filter program.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub blur_kernel: (u32, u32),
    pub bilateral: BilateralParams,
    pub canny: CannyParams,
    pub corners: CornerParams,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            blur_kernel: (30, 30),
            bilateral: BilateralParams::default(),
            canny: CannyParams::default(),
            corners: CornerParams::default(),
        }
    }
}

/// Applies the selected transform through an `ImageOps` backend.
pub struct FilterPipeline<O> {
    ops: O,
    params: FilterParams,
}

impl<O: ImageOps> FilterPipeline<O> {
    pub fn new(ops: O, params: FilterParams) -> Self {
        Self { ops, params }
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Transform one frame. The input frame is consumed; Preview and Features
    /// hand it back untouched, the other modes replace it.
    pub fn apply(&mut self, mode: FilterMode, frame: Frame) -> Result<AnnotatedFrame> {
        let params = &self.params;
        match mode {
            FilterMode::Preview => Ok(AnnotatedFrame::new(frame)),
            FilterMode::Blur => Ok(self.ops.blur(&frame, params.blur_kernel)?.into()),
            FilterMode::Bilateral => Ok(self.ops.bilateral(&frame, &params.bilateral)?.into()),
            FilterMode::Canny => Ok(self
                .ops
                .canny(
                    &frame,
                    params.canny.low_threshold,
                    params.canny.high_threshold,
                )?
                .into()),
            FilterMode::Features => {
                let gray = self.ops.to_gray(&frame)?;
                let corners = self.ops.good_features(&gray, &params.corners)?;
                let mut annotated = AnnotatedFrame::new(frame);
                annotated
                    .overlays
                    .extend(corner_markers(&corners, params.corners.marker_radius));
                Ok(annotated)
            }
        }
    }
}

/// One green circle per corner, centred on the truncated coordinate.
pub fn corner_markers(corners: &[(f32, f32)], radius: i32) -> Vec<Overlay> {
    corners
        .iter()
        .map(|&(x, y)| Overlay::Circle {
            center: Point::new(x as i32, y as i32),
            radius,
            color: Color::GREEN,
            thickness: 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;

    #[derive(Default)]
    struct RecordingOps {
        calls: Vec<String>,
        corners: Vec<(f32, f32)>,
    }

    impl ImageOps for RecordingOps {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn blur(&mut self, frame: &Frame, kernel: (u32, u32)) -> Result<Frame> {
            self.calls.push(format!("blur {}x{}", kernel.0, kernel.1));
            Ok(frame.clone())
        }

        fn bilateral(&mut self, frame: &Frame, params: &BilateralParams) -> Result<Frame> {
            self.calls.push(format!(
                "bilateral {} {} {}",
                params.diameter, params.sigma_color, params.sigma_space
            ));
            Ok(frame.clone())
        }

        fn canny(&mut self, frame: &Frame, low: f64, high: f64) -> Result<Frame> {
            self.calls.push(format!("canny {low} {high}"));
            Ok(Frame::filled(frame.width, frame.height, PixelFormat::Gray8, [255; 3]))
        }

        fn to_gray(&mut self, frame: &Frame) -> Result<Frame> {
            self.calls.push("gray".to_string());
            Ok(Frame::filled(frame.width, frame.height, PixelFormat::Gray8, [0; 3]))
        }

        fn good_features(&mut self, gray: &Frame, params: &CornerParams) -> Result<Vec<(f32, f32)>> {
            assert_eq!(gray.format, PixelFormat::Gray8);
            self.calls.push(format!(
                "corners {} {} {} {}",
                params.max_corners, params.quality_level, params.min_distance, params.block_size
            ));
            Ok(self.corners.clone())
        }
    }

    fn frame() -> Frame {
        Frame::filled(64, 48, PixelFormat::Bgr24, [10, 20, 30])
    }

    #[test]
    fn preview_is_identity_without_library_calls() -> Result<()> {
        let mut pipeline = FilterPipeline::new(RecordingOps::default(), FilterParams::default());
        let out = pipeline.apply(FilterMode::Preview, frame())?;
        assert_eq!(out.frame, frame());
        assert!(out.overlays.is_empty());
        assert!(pipeline.ops().calls.is_empty());
        Ok(())
    }

    #[test]
    fn default_parameters_reach_the_library() -> Result<()> {
        let mut pipeline = FilterPipeline::new(RecordingOps::default(), FilterParams::default());
        pipeline.apply(FilterMode::Blur, frame())?;
        pipeline.apply(FilterMode::Bilateral, frame())?;
        let edges = pipeline.apply(FilterMode::Canny, frame())?;
        assert_eq!(edges.frame.format, PixelFormat::Gray8);
        assert_eq!(
            pipeline.ops().calls,
            vec!["blur 30x30", "bilateral 15 75 75", "canny 70 200"]
        );
        Ok(())
    }

    #[test]
    fn features_draws_one_circle_per_corner() -> Result<()> {
        let ops = RecordingOps {
            corners: vec![(10.2, 5.9), (0.0, 0.0), (63.7, 47.1), (10.2, 5.9)],
            ..RecordingOps::default()
        };
        let mut pipeline = FilterPipeline::new(ops, FilterParams::default());
        let out = pipeline.apply(FilterMode::Features, frame())?;

        assert_eq!(out.frame, frame());
        assert_eq!(out.circles().count(), 4);
        let centers: Vec<Point> = out
            .overlays
            .iter()
            .map(|o| match o {
                Overlay::Circle {
                    center,
                    radius,
                    color,
                    thickness,
                } => {
                    assert_eq!(*radius, 10);
                    assert_eq!(*color, Color::GREEN);
                    assert_eq!(*thickness, 1);
                    *center
                }
                other => panic!("unexpected overlay {other:?}"),
            })
            .collect();
        assert_eq!(
            centers,
            vec![
                Point::new(10, 5),
                Point::new(0, 0),
                Point::new(63, 47),
                Point::new(10, 5)
            ]
        );
        assert_eq!(pipeline.ops().calls, vec!["gray", "corners 1000 0.5 10 8"]);
        Ok(())
    }

    #[test]
    fn features_without_corners_draws_nothing() -> Result<()> {
        let mut pipeline = FilterPipeline::new(RecordingOps::default(), FilterParams::default());
        let out = pipeline.apply(FilterMode::Features, frame())?;
        assert!(out.overlays.is_empty());
        Ok(())
    }
}
