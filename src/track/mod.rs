//! Single-object tracking over a video file.
//!
//! A `TrackingSession` seeds one tracker with the first frame and a fixed box,
//! then updates it on every further frame. Lost tracks are labelled, never
//! re-initialised. Every frame that goes in comes out annotated.

mod fps;

pub use fps::{fps_from_ticks, FpsMeter, InstantTicks, TickCounter};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::frame::{BoundingBox, Frame, Point};
use crate::overlay::{AnnotatedFrame, Color, Overlay};

pub const TRACKING_FAILURE_LABEL: &str = "Tracking failure detected";

/// Tracking algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    /// Deep regression tracker; needs `goturn.prototxt` / `goturn.caffemodel`.
    #[default]
    Goturn,
    /// Multiple-instance learning tracker; no model files.
    Mil,
}

impl TrackerKind {
    pub fn label(self) -> &'static str {
        match self {
            TrackerKind::Goturn => "GOTURN",
            TrackerKind::Mil => "MIL",
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrackerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goturn" => Ok(TrackerKind::Goturn),
            "mil" => Ok(TrackerKind::Mil),
            other => Err(anyhow!("unknown tracker '{}' (expected goturn|mil)", other)),
        }
    }
}

/// A pre-trained single-object tracker.
pub trait Tracker {
    fn kind(&self) -> TrackerKind;

    /// Seed the tracker with the first frame and the target box.
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<()>;

    /// Locate the target in the next frame. `None` means the target was lost.
    fn update(&mut self, frame: &Frame) -> Result<Option<BoundingBox>>;
}

impl<T: Tracker + ?Sized> Tracker for Box<T> {
    fn kind(&self) -> TrackerKind {
        (**self).kind()
    }

    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<()> {
        (**self).init(frame, bbox)
    }

    fn update(&mut self, frame: &Frame) -> Result<Option<BoundingBox>> {
        (**self).update(frame)
    }
}

/// Default output file for a given input: `<dir>/Saved/<stem>-<KIND>.mp4`.
pub fn default_output_path(input: &Path, kind: TrackerKind) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tracking".to_string());
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join("Saved").join(format!("{}-{}.mp4", stem, kind.label()))
}

/// Overlays for one tracked frame, in draw order.
pub fn tracking_overlays(kind: TrackerKind, bbox: Option<BoundingBox>, fps: f64) -> Vec<Overlay> {
    let mut overlays = Vec::with_capacity(3);
    match bbox {
        Some(bbox) => overlays.push(Overlay::Rectangle {
            top_left: bbox.top_left(),
            bottom_right: bbox.bottom_right(),
            color: Color::BLUE,
            thickness: 2,
        }),
        None => overlays.push(status_text(TRACKING_FAILURE_LABEL, 140, Color::RED)),
    }
    overlays.push(status_text(&format!("{} Tracker", kind.label()), 60, Color::STATUS));
    overlays.push(status_text(&format!("FPS : {}", fps as i64), 100, Color::STATUS));
    overlays
}

fn status_text(text: &str, y: i32, color: Color) -> Overlay {
    Overlay::Text {
        text: text.to_string(),
        origin: Point::new(80, y),
        scale: 1.0,
        color,
        thickness: 3,
    }
}

/// Per-frame result of a tracking step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackStep {
    pub bbox: Option<BoundingBox>,
    pub fps: f64,
}

/// A seeded tracker plus its FPS meter.
pub struct TrackingSession<T, C> {
    tracker: T,
    meter: FpsMeter<C>,
    lost_frames: u64,
}

impl<T: Tracker, C: TickCounter> TrackingSession<T, C> {
    /// Seed the tracker. The first frame comes back annotated with the seed box.
    pub fn start(
        mut tracker: T,
        clock: C,
        first: Frame,
        bbox: BoundingBox,
    ) -> Result<(Self, AnnotatedFrame)> {
        tracker.init(&first, bbox)?;
        log::info!(
            "{} tracker initialised at ({}, {}, {}, {})",
            tracker.kind(),
            bbox.x,
            bbox.y,
            bbox.width,
            bbox.height
        );
        let mut annotated = AnnotatedFrame::new(first);
        annotated
            .overlays
            .extend(tracking_overlays(tracker.kind(), Some(bbox), 0.0));
        let session = Self {
            tracker,
            meter: FpsMeter::new(clock),
            lost_frames: 0,
        };
        Ok((session, annotated))
    }

    /// Track one frame and annotate it.
    pub fn process(&mut self, frame: Frame) -> Result<(AnnotatedFrame, TrackStep)> {
        self.meter.start();
        let bbox = self.tracker.update(&frame)?;
        let fps = self.meter.stop();

        if bbox.is_none() {
            self.lost_frames += 1;
            log::debug!("{} tracker lost the target", self.tracker.kind());
        }

        let mut annotated = AnnotatedFrame::new(frame);
        annotated
            .overlays
            .extend(tracking_overlays(self.tracker.kind(), bbox, fps));
        Ok((annotated, TrackStep { bbox, fps }))
    }

    pub fn kind(&self) -> TrackerKind {
        self.tracker.kind()
    }

    /// Frames on which `update` reported a lost target.
    pub fn lost_frames(&self) -> u64 {
        self.lost_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;

    struct ScriptedTracker {
        script: Vec<Option<BoundingBox>>,
        seeded: Option<BoundingBox>,
    }

    impl Tracker for ScriptedTracker {
        fn kind(&self) -> TrackerKind {
            TrackerKind::Mil
        }

        fn init(&mut self, _frame: &Frame, bbox: BoundingBox) -> Result<()> {
            self.seeded = Some(bbox);
            Ok(())
        }

        fn update(&mut self, _frame: &Frame) -> Result<Option<BoundingBox>> {
            Ok(if self.script.is_empty() {
                None
            } else {
                self.script.remove(0)
            })
        }
    }

    fn frame() -> Frame {
        Frame::filled(32, 32, PixelFormat::Bgr24, [0, 0, 0])
    }

    #[test]
    fn tracker_kind_parses_case_insensitively() -> Result<()> {
        assert_eq!("GOTURN".parse::<TrackerKind>()?, TrackerKind::Goturn);
        assert_eq!(" mil ".parse::<TrackerKind>()?, TrackerKind::Mil);
        assert!("kcf".parse::<TrackerKind>().is_err());
        Ok(())
    }

    #[test]
    fn default_output_goes_to_saved_dir() {
        let path = default_output_path(
            Path::new("datos/ObjectTracking/formula_1.mp4"),
            TrackerKind::Goturn,
        );
        assert_eq!(
            path,
            PathBuf::from("datos/ObjectTracking/Saved/formula_1-GOTURN.mp4")
        );
    }

    #[test]
    fn success_overlays_box_then_labels() {
        let overlays = tracking_overlays(
            TrackerKind::Goturn,
            Some(BoundingBox::new(245.0, 555.0, 210.0, 160.0)),
            37.9,
        );
        assert_eq!(overlays.len(), 3);
        assert_eq!(
            overlays[0],
            Overlay::Rectangle {
                top_left: Point::new(245, 555),
                bottom_right: Point::new(455, 715),
                color: Color::BLUE,
                thickness: 2,
            }
        );
        assert_eq!(overlays[1].text(), Some("GOTURN Tracker"));
        assert_eq!(overlays[2].text(), Some("FPS : 37"));
    }

    #[test]
    fn failure_overlays_label_instead_of_box() {
        let overlays = tracking_overlays(TrackerKind::Goturn, None, 0.0);
        assert!(overlays.iter().all(|o| !o.is_rectangle()));
        match &overlays[0] {
            Overlay::Text {
                text,
                origin,
                color,
                ..
            } => {
                assert_eq!(text, TRACKING_FAILURE_LABEL);
                assert_eq!(*origin, Point::new(80, 140));
                assert_eq!(*color, Color::RED);
            }
            other => panic!("unexpected overlay {other:?}"),
        }
        assert_eq!(overlays[2].text(), Some("FPS : 0"));
    }

    #[test]
    fn session_seeds_and_keeps_going_after_loss() -> Result<()> {
        let seed = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let moved = BoundingBox::new(2.0, 3.0, 3.0, 4.0);
        let tracker = ScriptedTracker {
            script: vec![Some(moved), None, Some(moved)],
            seeded: None,
        };
        let (mut session, first) = TrackingSession::start(tracker, InstantTicks::new(), frame(), seed)?;
        assert_eq!(session.tracker.seeded, Some(seed));
        assert_eq!(first.rectangles().count(), 1);

        let (a, step_a) = session.process(frame())?;
        assert_eq!(step_a.bbox, Some(moved));
        assert_eq!(a.rectangles().count(), 1);

        let (b, step_b) = session.process(frame())?;
        assert_eq!(step_b.bbox, None);
        assert_eq!(b.rectangles().count(), 0);
        assert!(b.texts().any(|t| t == TRACKING_FAILURE_LABEL));

        let (c, _) = session.process(frame())?;
        assert_eq!(c.rectangles().count(), 1);
        assert_eq!(session.lost_frames(), 1);
        Ok(())
    }
}
