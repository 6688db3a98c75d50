//! On-screen presentation.

use anyhow::Result;

use crate::overlay::AnnotatedFrame;

/// A window that shows frames and reports key presses.
pub trait Display {
    /// Render overlays onto the frame and show it.
    fn show(&mut self, frame: &AnnotatedFrame) -> Result<()>;

    /// Wait up to `timeout_ms` for a key. Returns the low byte of the key code.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<u8>>;
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn show(&mut self, frame: &AnnotatedFrame) -> Result<()> {
        (**self).show(frame)
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<u8>> {
        (**self).poll_key(timeout_ms)
    }
}

/// Window title and flags.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    /// Create the window with `WINDOW_NORMAL` so it can be resized.
    pub resizable: bool,
}

impl WindowConfig {
    pub fn resizable(title: &str) -> Self {
        Self {
            title: title.to_string(),
            resizable: true,
        }
    }
}

/// Open an on-screen window.
#[cfg(feature = "backend-opencv")]
pub fn open_window(config: &WindowConfig) -> Result<Box<dyn Display>> {
    Ok(Box::new(crate::cv::HighguiWindow::open(config)?))
}

#[cfg(not(feature = "backend-opencv"))]
pub fn open_window(config: &WindowConfig) -> Result<Box<dyn Display>> {
    Err(anyhow::anyhow!(
        "could not open window '{}': built without the backend-opencv feature",
        config.title
    ))
}
