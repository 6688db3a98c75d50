//! Drawing primitives attached to frames.
//!
//! Drivers never rasterise. They describe what to draw as `Overlay` values and
//! hand an `AnnotatedFrame` to a window or video sink; the rendering backend
//! draws the overlays with the vision library's primitives just before output.

use crate::frame::{Frame, Point};

/// BGR colour triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    pub const GREEN: Color = Color::bgr(0, 255, 0);
    pub const BLUE: Color = Color::bgr(255, 0, 0);
    pub const RED: Color = Color::bgr(0, 0, 255);
    /// Muted green used for status labels.
    pub const STATUS: Color = Color::bgr(50, 170, 50);
}

/// A single drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// Rectangle between two opposite corners.
    Rectangle {
        top_left: Point,
        bottom_right: Point,
        color: Color,
        thickness: i32,
    },
    Circle {
        center: Point,
        radius: i32,
        color: Color,
        thickness: i32,
    },
    /// Text in the Hershey simplex face; `origin` is the bottom-left of the baseline.
    Text {
        text: String,
        origin: Point,
        scale: f64,
        color: Color,
        thickness: i32,
    },
}

impl Overlay {
    pub fn is_rectangle(&self) -> bool {
        matches!(self, Overlay::Rectangle { .. })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Overlay::Circle { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Overlay::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A frame plus the overlays to draw on it, in draw order.
#[derive(Clone, Debug)]
pub struct AnnotatedFrame {
    pub frame: Frame,
    pub overlays: Vec<Overlay>,
}

impl AnnotatedFrame {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            overlays: Vec::new(),
        }
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(|o| o.is_rectangle())
    }

    pub fn circles(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(|o| o.is_circle())
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.overlays.iter().filter_map(Overlay::text)
    }
}

impl From<Frame> for AnnotatedFrame {
    fn from(frame: Frame) -> Self {
        Self::new(frame)
    }
}
