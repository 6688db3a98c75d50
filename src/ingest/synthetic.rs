use anyhow::{anyhow, Result};

use super::{FrameSource, SourceStats};
use crate::frame::{Frame, FrameSize, PixelFormat};

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;

/// Configuration for a synthetic source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticConfig {
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Number of frames before end-of-stream. `None` never ends.
    pub frames: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            url: "stub://synthetic".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frames: None,
        }
    }
}

impl SyntheticConfig {
    /// Parse `stub://<name>[?frames=N&width=W&height=H]`.
    pub fn from_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("stub://")
            .ok_or_else(|| anyhow!("synthetic sources must use stub:// (got {})", url))?;
        let mut config = SyntheticConfig {
            url: url.to_string(),
            ..SyntheticConfig::default()
        };
        let Some((_, query)) = rest.split_once('?') else {
            return Ok(config);
        };
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("malformed stub query parameter '{}'", pair))?;
            let parsed: u64 = value
                .parse()
                .map_err(|_| anyhow!("stub parameter '{}' must be an integer", key))?;
            match key {
                "frames" => config.frames = Some(parsed),
                "width" => config.width = dimension(key, parsed)?,
                "height" => config.height = dimension(key, parsed)?,
                other => return Err(anyhow!("unknown stub parameter '{}'", other)),
            }
        }
        Ok(config)
    }
}

fn dimension(key: &str, value: u64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(anyhow!("stub {} must be between 1 and {}", key, u32::MAX)),
    }
}

/// Deterministic BGR frames: a diagonal gradient that drifts one step per frame.
pub struct SyntheticSource {
    config: SyntheticConfig,
    frame_count: u64,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        log::info!("source: opened {} (synthetic)", config.url);
        Self {
            config,
            frame_count: 0,
        }
    }

    fn generate_pixels(&self) -> Vec<u8> {
        let width = self.config.width as usize;
        let height = self.config.height as usize;
        let mut pixels = vec![0u8; width * height * 3];
        for (i, px) in pixels.chunks_exact_mut(3).enumerate() {
            let x = (i % width) as u64;
            let y = (i / width) as u64;
            let base = x + y + self.frame_count;
            px[0] = (base % 256) as u8;
            px[1] = ((base / 2) % 256) as u8;
            px[2] = ((x * 3 + self.frame_count) % 256) as u8;
        }
        pixels
    }
}

impl FrameSource for SyntheticSource {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        if self
            .config
            .frames
            .is_some_and(|limit| self.frame_count >= limit)
        {
            return Ok(None);
        }
        let pixels = self.generate_pixels();
        self.frame_count += 1;
        let frame = Frame::new(
            pixels,
            self.config.width,
            self.config.height,
            PixelFormat::Bgr24,
        )?;
        Ok(Some(frame))
    }

    fn frame_size(&self) -> Option<FrameSize> {
        Some(FrameSize {
            width: self.config.width,
            height: self.config.height,
        })
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_read: self.frame_count,
            source: self.config.url.clone(),
        }
    }
}
