//! OpenCV bindings for the capability traits.
//!
//! Every type here owns exactly one OpenCV handle and releases it in `Drop`.

mod capture;
mod convert;
mod ops;
mod render;
mod tracker;
mod window;
mod writer;

pub use capture::CvCapture;
pub(crate) use convert::{frame_to_mat, mat_to_frame};
pub use ops::CvImageOps;
pub(crate) use render::draw_overlays;
pub use tracker::CvTracker;
pub use window::HighguiWindow;
pub use writer::CvVideoWriter;
