use anyhow::{anyhow, Result};

use crate::detect::result::Detection;
use crate::frame::{Frame, Point};
use crate::overlay::{AnnotatedFrame, Color, Overlay};

/// Detections at or below this confidence are discarded.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Turns raw detections into box + label overlays for one frame.
#[derive(Clone, Debug)]
pub struct FaceAnnotator {
    threshold: f32,
}

impl FaceAnnotator {
    pub fn new(threshold: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(anyhow!(
                "confidence threshold must be within [0, 1], got {}",
                threshold
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Keep detections strictly above the threshold, scaled to the frame's own
    /// size, and draw one box and one label for each.
    pub fn annotate(&self, frame: Frame, detections: &[Detection]) -> AnnotatedFrame {
        let width = frame.width as f32;
        let height = frame.height as f32;
        let mut annotated = AnnotatedFrame::new(frame);
        for det in detections.iter().filter(|d| d.confidence > self.threshold) {
            let top_left = Point::new((det.x_min * width) as i32, (det.y_min * height) as i32);
            let bottom_right = Point::new((det.x_max * width) as i32, (det.y_max * height) as i32);
            annotated.push(Overlay::Rectangle {
                top_left,
                bottom_right,
                color: Color::GREEN,
                thickness: 2,
            });
            annotated.push(Overlay::Text {
                text: format!("Face: {:.2}", det.confidence),
                origin: Point::new(top_left.x, top_left.y - 10),
                scale: 0.5,
                color: Color::GREEN,
                thickness: 1,
            });
        }
        annotated
    }
}

impl Default for FaceAnnotator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}
