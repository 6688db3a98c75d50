use anyhow::{Context, Result};
use opencv::highgui;

use super::{draw_overlays, frame_to_mat};
use crate::display::{Display, WindowConfig};
use crate::keys::normalize_key;
use crate::overlay::AnnotatedFrame;

/// A highgui window. Destroyed on drop.
pub struct HighguiWindow {
    title: String,
}

impl HighguiWindow {
    pub fn open(config: &WindowConfig) -> Result<Self> {
        let flags = if config.resizable {
            highgui::WINDOW_NORMAL
        } else {
            highgui::WINDOW_AUTOSIZE
        };
        highgui::named_window(&config.title, flags)
            .with_context(|| format!("could not create window '{}'", config.title))?;
        log::info!("window: created '{}'", config.title);
        Ok(Self {
            title: config.title.clone(),
        })
    }
}

impl Display for HighguiWindow {
    fn show(&mut self, frame: &AnnotatedFrame) -> Result<()> {
        let mut mat = frame_to_mat(&frame.frame)?;
        draw_overlays(&mut mat, &frame.overlays)?;
        highgui::imshow(&self.title, &mat).context("show frame")
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<u8>> {
        let raw = highgui::wait_key(timeout_ms).context("poll key")?;
        Ok(normalize_key(raw))
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("window: failed to destroy '{}': {}", self.title, e);
        }
    }
}
