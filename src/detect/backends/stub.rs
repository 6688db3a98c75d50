use std::collections::VecDeque;

use anyhow::Result;

use crate::detect::backend::FaceDetectorBackend;
use crate::detect::result::Detection;
use crate::frame::Frame;

/// Stub backend for testing. Replays scripted detections, one batch per frame,
/// and returns nothing once the script runs out.
#[derive(Default)]
pub struct StubBackend {
    script: VecDeque<Vec<Detection>>,
    frames_seen: u64,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Vec<Detection>>) -> Self {
        Self {
            script: script.into(),
            frames_seen: 0,
        }
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl FaceDetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>> {
        self.frames_seen += 1;
        Ok(self.script.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;

    #[test]
    fn stub_backend_replays_script() -> Result<()> {
        let face = Detection::new(0.9, 0.1, 0.1, 0.2, 0.2);
        let mut backend = StubBackend::with_script(vec![vec![face], vec![]]);
        let frame = Frame::filled(4, 4, PixelFormat::Bgr24, [0; 3]);

        assert_eq!(backend.detect(&frame)?, vec![face]);
        assert!(backend.detect(&frame)?.is_empty());
        assert!(backend.detect(&frame)?.is_empty());
        assert_eq!(backend.frames_seen(), 3);
        Ok(())
    }
}
