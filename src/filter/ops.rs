use anyhow::Result;

use crate::filter::{BilateralParams, CornerParams};
use crate::frame::Frame;

/// Image operations delegated to the vision library.
///
/// Implementations wrap library calls one-to-one. They must not add tuning of
/// their own: every parameter arrives from `FilterParams`.
pub trait ImageOps {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Normalised box filter with a `kernel.0 × kernel.1` window.
    fn blur(&mut self, frame: &Frame, kernel: (u32, u32)) -> Result<Frame>;

    /// Edge-preserving bilateral filter.
    fn bilateral(&mut self, frame: &Frame, params: &BilateralParams) -> Result<Frame>;

    /// Canny edge map. Output is single channel.
    fn canny(&mut self, frame: &Frame, low_threshold: f64, high_threshold: f64) -> Result<Frame>;

    /// BGR to single-channel luminance.
    fn to_gray(&mut self, frame: &Frame) -> Result<Frame>;

    /// Shi-Tomasi corners on a grayscale frame, in sub-pixel coordinates.
    fn good_features(&mut self, gray: &Frame, params: &CornerParams) -> Result<Vec<(f32, f32)>>;
}
