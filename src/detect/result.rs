/// One candidate face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub confidence: f32,
    /// Left edge (normalised 0..1).
    pub x_min: f32,
    /// Top edge (normalised 0..1).
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Detection {
    pub fn new(confidence: f32, x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            confidence,
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Decode one SSD output row `[image_id, label, confidence, x1, y1, x2, y2]`.
    pub fn from_ssd_row(row: &[f32]) -> Option<Self> {
        match row {
            [_, _, confidence, x1, y1, x2, y2] => {
                Some(Self::new(*confidence, *x1, *y1, *x2, *y2))
            }
            _ => None,
        }
    }
}
