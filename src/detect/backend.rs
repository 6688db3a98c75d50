use anyhow::Result;

use crate::detect::result::Detection;
use crate::frame::Frame;

/// Face detector backend trait.
///
/// Backends return every candidate the model produced, weak ones included.
/// Thresholding and coordinate scaling belong to `FaceAnnotator`.
pub trait FaceDetectorBackend {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    ///
    /// Coordinates in the result are normalised to the frame (0..1).
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: FaceDetectorBackend + ?Sized> FaceDetectorBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>> {
        (**self).detect(frame)
    }

    fn warm_up(&mut self) -> Result<()> {
        (**self).warm_up()
    }
}
