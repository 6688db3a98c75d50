use std::path::Path;

use anyhow::{bail, Context, Result};
use opencv::core::{Ptr, Rect};
use opencv::prelude::*;
use opencv::video;

use super::frame_to_mat;
use crate::config::TrackingSettings;
use crate::frame::{BoundingBox, Frame};
use crate::track::{Tracker, TrackerKind};

enum Inner {
    Goturn(Ptr<video::TrackerGOTURN>),
    Mil(Ptr<video::TrackerMIL>),
}

/// OpenCV video-module tracker.
pub struct CvTracker {
    kind: TrackerKind,
    inner: Inner,
}

impl CvTracker {
    pub fn create(settings: &TrackingSettings) -> Result<Self> {
        let inner = match settings.tracker {
            TrackerKind::Goturn => {
                require_file(&settings.goturn_prototxt)?;
                require_file(&settings.goturn_model)?;
                let mut params =
                    video::TrackerGOTURN_Params::default().context("GOTURN parameters")?;
                params.set_model_txt(&settings.goturn_prototxt.to_string_lossy());
                params.set_model_bin(&settings.goturn_model.to_string_lossy());
                let tracker =
                    video::TrackerGOTURN::create(&params).context("create GOTURN tracker")?;
                Inner::Goturn(tracker)
            }
            TrackerKind::Mil => {
                let params = video::TrackerMIL_Params::default().context("MIL parameters")?;
                Inner::Mil(video::TrackerMIL::create(params).context("create MIL tracker")?)
            }
        };
        Ok(Self {
            kind: settings.tracker,
            inner,
        })
    }
}

impl Tracker for CvTracker {
    fn kind(&self) -> TrackerKind {
        self.kind
    }

    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<()> {
        let mat = frame_to_mat(frame)?;
        let rect = Rect::new(
            bbox.x as i32,
            bbox.y as i32,
            bbox.width as i32,
            bbox.height as i32,
        );
        match &mut self.inner {
            Inner::Goturn(t) => t.init(&mat, rect),
            Inner::Mil(t) => t.init(&mat, rect),
        }
        .with_context(|| format!("initialise {} tracker", self.kind))
    }

    fn update(&mut self, frame: &Frame) -> Result<Option<BoundingBox>> {
        let mat = frame_to_mat(frame)?;
        let mut rect = Rect::default();
        let ok = match &mut self.inner {
            Inner::Goturn(t) => t.update(&mat, &mut rect),
            Inner::Mil(t) => t.update(&mat, &mut rect),
        }
        .with_context(|| format!("update {} tracker", self.kind))?;
        Ok(ok.then(|| {
            BoundingBox::new(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            )
        }))
    }
}

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("tracker model file {} not found", path.display());
    }
    Ok(())
}
