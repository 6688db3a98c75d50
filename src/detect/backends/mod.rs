pub mod stub;

#[cfg(feature = "backend-opencv")]
pub mod caffe;

pub use stub::StubBackend;

#[cfg(feature = "backend-opencv")]
pub use caffe::CaffeSsdBackend;
