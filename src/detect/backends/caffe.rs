use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use opencv::core::{self, Scalar, Size};
use opencv::dnn;
use opencv::prelude::*;

use crate::config::FaceSettings;
use crate::cv::frame_to_mat;
use crate::detect::backend::FaceDetectorBackend;
use crate::detect::result::Detection;
use crate::frame::Frame;

/// Values per SSD detection row.
const SSD_ROW_LEN: usize = 7;

/// Caffe SSD face detector run through OpenCV's DNN module.
///
/// Loads the network definition and weights from local files once; every
/// frame is resized into a fixed-size blob with mean subtraction.
pub struct CaffeSsdBackend {
    net: dnn::Net,
    input: Size,
    mean: Scalar,
    scale: f64,
    swap_rb: bool,
}

impl CaffeSsdBackend {
    pub fn new(settings: &FaceSettings) -> Result<Self> {
        require_file(&settings.prototxt)?;
        require_file(&settings.model)?;
        let net = dnn::read_net_from_caffe(
            &settings.prototxt.to_string_lossy(),
            &settings.model.to_string_lossy(),
        )
        .with_context(|| {
            format!(
                "failed to load Caffe network {} / {}",
                settings.prototxt.display(),
                settings.model.display()
            )
        })?;
        if net.empty().context("query network state")? {
            bail!("Caffe network {} has no layers", settings.prototxt.display());
        }
        let [b, g, r] = settings.mean;
        Ok(Self {
            net,
            input: Size::new(settings.input_width as i32, settings.input_height as i32),
            mean: Scalar::new(b, g, r, 0.0),
            scale: settings.scale,
            swap_rb: settings.swap_rb,
        })
    }
}

impl FaceDetectorBackend for CaffeSsdBackend {
    fn name(&self) -> &'static str {
        "caffe-ssd"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>> {
        let mat = frame_to_mat(frame)?;
        let blob = dnn::blob_from_image(
            &mat,
            self.scale,
            self.input,
            self.mean,
            self.swap_rb,
            false,
            core::CV_32F,
        )
        .context("build input blob")?;
        self.net.set_input_def(&blob).context("set network input")?;
        let output = self
            .net
            .forward_single_def()
            .context("SSD forward pass failed")?;
        let values = output
            .data_typed::<f32>()
            .context("SSD output tensor was not f32")?;
        if values.len() % SSD_ROW_LEN != 0 {
            return Err(anyhow!(
                "SSD output has {} values, not a multiple of {}",
                values.len(),
                SSD_ROW_LEN
            ));
        }
        Ok(values
            .chunks_exact(SSD_ROW_LEN)
            .filter_map(Detection::from_ssd_row)
            .collect())
    }
}

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("model file {} not found", path.display());
    }
    Ok(())
}
