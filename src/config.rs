use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::filter::FilterParams;
use crate::frame::BoundingBox;
use crate::sink::{Fourcc, DEFAULT_FOURCC, DEFAULT_OUTPUT_FPS};
use crate::track::TrackerKind;

const DEFAULT_TRACKER_INPUT: &str = "datos/ObjectTracking/formula_1.mp4";
const DEFAULT_INITIAL_BBOX: [f64; 4] = [245.0, 555.0, 210.0, 160.0];
const DEFAULT_GOTURN_PROTOTXT: &str = "goturn.prototxt";
const DEFAULT_GOTURN_MODEL: &str = "goturn.caffemodel";
const DEFAULT_FACE_PROTOTXT: &str = "datos/FaceDetection/deploy.prototxt";
const DEFAULT_FACE_MODEL: &str =
    "datos/FaceDetection/res10_300x300_ssd_iter_140000_fp16.caffemodel";
const DEFAULT_FACE_INPUT: u32 = 300;
const DEFAULT_FACE_MEAN: [f64; 3] = [104.0, 117.0, 123.0];
const DEFAULT_FACE_THRESHOLD: f32 = 0.7;
const DEFAULT_PREVIEW_TITLE: &str = "Camera Preview";
const DEFAULT_FILTERS_TITLE: &str = "Camera Filters";

#[derive(Debug, Deserialize, Default)]
struct LessonsConfigFile {
    filters: Option<FilterParams>,
    tracking: Option<TrackingConfigFile>,
    face: Option<FaceConfigFile>,
    window: Option<WindowConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct TrackingConfigFile {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    tracker: Option<TrackerKind>,
    initial_bbox: Option<[f64; 4]>,
    fourcc: Option<String>,
    fps: Option<f64>,
    goturn_prototxt: Option<PathBuf>,
    goturn_model: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct FaceConfigFile {
    prototxt: Option<PathBuf>,
    model: Option<PathBuf>,
    input_width: Option<u32>,
    input_height: Option<u32>,
    mean: Option<[f64; 3]>,
    scale: Option<f64>,
    swap_rb: Option<bool>,
    threshold: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct WindowConfigFile {
    preview_title: Option<String>,
    filters_title: Option<String>,
}

/// Resolved settings for all four lessons.
#[derive(Debug, Clone)]
pub struct LessonsConfig {
    pub filters: FilterParams,
    pub tracking: TrackingSettings,
    pub face: FaceSettings,
    pub window: WindowSettings,
}

#[derive(Debug, Clone)]
pub struct TrackingSettings {
    pub input: PathBuf,
    /// Explicit output path. `None` derives one from the input and tracker.
    pub output: Option<PathBuf>,
    pub tracker: TrackerKind,
    pub initial_bbox: BoundingBox,
    pub fourcc: String,
    pub fps: f64,
    pub goturn_prototxt: PathBuf,
    pub goturn_model: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FaceSettings {
    pub prototxt: PathBuf,
    pub model: PathBuf,
    pub input_width: u32,
    pub input_height: u32,
    /// Per-channel mean subtracted in BGR order.
    pub mean: [f64; 3],
    pub scale: f64,
    pub swap_rb: bool,
    pub threshold: f32,
}

#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub preview_title: String,
    pub filters_title: String,
}

impl LessonsConfig {
    /// Load defaults, then the config file (explicit path or `VISION_CONFIG`),
    /// then environment overrides, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("VISION_CONFIG").ok();
        let path = path.or_else(|| env_path.as_deref().map(Path::new));
        let file_cfg = match path {
            Some(path) => Some(read_config_file(path)?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: LessonsConfigFile) -> Self {
        let tracking = file.tracking.unwrap_or_default();
        let face = file.face.unwrap_or_default();
        let window = file.window.unwrap_or_default();
        let [x, y, w, h] = tracking.initial_bbox.unwrap_or(DEFAULT_INITIAL_BBOX);
        Self {
            filters: file.filters.unwrap_or_default(),
            tracking: TrackingSettings {
                input: tracking
                    .input
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACKER_INPUT)),
                output: tracking.output,
                tracker: tracking.tracker.unwrap_or_default(),
                initial_bbox: BoundingBox::new(x, y, w, h),
                fourcc: tracking
                    .fourcc
                    .unwrap_or_else(|| DEFAULT_FOURCC.to_string()),
                fps: tracking.fps.unwrap_or(DEFAULT_OUTPUT_FPS),
                goturn_prototxt: tracking
                    .goturn_prototxt
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_GOTURN_PROTOTXT)),
                goturn_model: tracking
                    .goturn_model
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_GOTURN_MODEL)),
            },
            face: FaceSettings {
                prototxt: face
                    .prototxt
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FACE_PROTOTXT)),
                model: face
                    .model
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FACE_MODEL)),
                input_width: face.input_width.unwrap_or(DEFAULT_FACE_INPUT),
                input_height: face.input_height.unwrap_or(DEFAULT_FACE_INPUT),
                mean: face.mean.unwrap_or(DEFAULT_FACE_MEAN),
                scale: face.scale.unwrap_or(1.0),
                swap_rb: face.swap_rb.unwrap_or(false),
                threshold: face.threshold.unwrap_or(DEFAULT_FACE_THRESHOLD),
            },
            window: WindowSettings {
                preview_title: window
                    .preview_title
                    .unwrap_or_else(|| DEFAULT_PREVIEW_TITLE.to_string()),
                filters_title: window
                    .filters_title
                    .unwrap_or_else(|| DEFAULT_FILTERS_TITLE.to_string()),
            },
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(input) = non_empty_env("VISION_TRACKER_INPUT") {
            self.tracking.input = PathBuf::from(input);
        }
        if let Some(output) = non_empty_env("VISION_TRACKER_OUTPUT") {
            self.tracking.output = Some(PathBuf::from(output));
        }
        if let Some(kind) = non_empty_env("VISION_TRACKER_KIND") {
            self.tracking.tracker = kind
                .parse()
                .map_err(|e| anyhow!("VISION_TRACKER_KIND: {}", e))?;
        }
        if let Some(path) = non_empty_env("VISION_FACE_PROTOTXT") {
            self.face.prototxt = PathBuf::from(path);
        }
        if let Some(path) = non_empty_env("VISION_FACE_MODEL") {
            self.face.model = PathBuf::from(path);
        }
        if let Some(threshold) = non_empty_env("VISION_FACE_THRESHOLD") {
            self.face.threshold = threshold
                .parse()
                .map_err(|_| anyhow!("VISION_FACE_THRESHOLD must be a number between 0 and 1"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let filters = &self.filters;
        if filters.blur_kernel.0 == 0 || filters.blur_kernel.1 == 0 {
            return Err(anyhow!("filters.blur_kernel must be greater than zero"));
        }
        if filters.bilateral.diameter <= 0 {
            return Err(anyhow!("filters.bilateral.diameter must be greater than zero"));
        }
        if filters.canny.low_threshold > filters.canny.high_threshold {
            return Err(anyhow!(
                "filters.canny.low_threshold must not exceed high_threshold"
            ));
        }
        let corners = &filters.corners;
        if !(corners.quality_level > 0.0 && corners.quality_level <= 1.0) {
            return Err(anyhow!("filters.corners.quality_level must be within (0, 1]"));
        }
        if corners.max_corners < 0 || corners.block_size <= 0 || corners.marker_radius < 0 {
            return Err(anyhow!(
                "filters.corners counts and sizes must not be negative"
            ));
        }

        let bbox = self.tracking.initial_bbox;
        if !(bbox.width > 0.0 && bbox.height > 0.0) {
            return Err(anyhow!("tracking.initial_bbox width and height must be positive"));
        }
        if !(self.tracking.fps.is_finite() && self.tracking.fps > 0.0) {
            return Err(anyhow!("tracking.fps must be greater than zero"));
        }
        Fourcc::parse(&self.tracking.fourcc)?;

        if self.face.input_width == 0 || self.face.input_height == 0 {
            return Err(anyhow!("face input size must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.face.threshold) {
            return Err(anyhow!("face.threshold must be within [0, 1]"));
        }
        Ok(())
    }
}

impl Default for LessonsConfig {
    fn default() -> Self {
        Self::from_file(LessonsConfigFile::default())
    }
}

fn read_config_file(path: &Path) -> Result<LessonsConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let cfg = if is_json {
        serde_json::from_str(&raw).map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    } else {
        toml::from_str(&raw).map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    };
    Ok(cfg)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
