mod annotate;
mod backend;
mod backends;
mod result;

pub use annotate::{FaceAnnotator, DEFAULT_CONFIDENCE_THRESHOLD};
pub use backend::FaceDetectorBackend;
pub use backends::StubBackend;
pub use result::Detection;

#[cfg(feature = "backend-opencv")]
pub use backends::CaffeSsdBackend;
