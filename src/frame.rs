//! In-memory frames and pixel geometry.
//!
//! - `Frame`: owned 8-bit pixel buffer produced once per loop iteration.
//! - `BoundingBox`: axis-aligned box in pixel space, as reported by trackers.
//! - `Point`: integer pixel coordinate used by overlays.
//!
//! Frames are moved through the loop, not shared. A frame that is shown or
//! written is dropped at the end of its iteration.

use anyhow::{anyhow, Result};

/// Pixel layout of a frame buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three interleaved channels in OpenCV's native blue/green/red order.
    Bgr24,
    /// Single luminance channel (grayscale or an edge map).
    Gray8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Bgr24 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// One decoded image sampled from a camera or video file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl Frame {
    /// Wrap a pixel buffer, checking that its length matches the dimensions.
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(format.channels()))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))?;
        if data.len() != expected {
            return Err(anyhow!(
                "frame length mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Solid-colour frame. `bgr` is ignored past the first channel for gray frames.
    pub fn filled(width: u32, height: u32, format: PixelFormat, bgr: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let data = match format {
            PixelFormat::Bgr24 => bgr.iter().copied().cycle().take(pixels * 3).collect(),
            PixelFormat::Gray8 => vec![bgr[0]; pixels],
        };
        Self {
            data,
            width,
            height,
            format,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)` as a channel slice, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cn = self.channels();
        let offset = (y as usize * self.width as usize + x as usize) * cn;
        self.data.get(offset..offset + cn)
    }

    /// Mirror the frame around its vertical axis (selfie view).
    pub fn mirror_horizontal(&mut self) {
        let cn = self.channels();
        let row_bytes = self.width as usize * cn;
        if row_bytes == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(row_bytes) {
            let w = row.len() / cn;
            for i in 0..w / 2 {
                let j = w - 1 - i;
                for c in 0..cn {
                    row.swap(i * cn + c, j * cn + c);
                }
            }
        }
    }
}

/// Frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Integer pixel coordinate. May lie outside the frame; drawing clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle `(x, y, width, height)` in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner, truncated to whole pixels.
    pub fn top_left(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    /// Bottom-right corner `(x + w, y + h)`, truncated to whole pixels.
    pub fn bottom_right(&self) -> Point {
        Point::new((self.x + self.width) as i32, (self.y + self.height) as i32)
    }
}
