use serde::{Deserialize, Serialize};

/// All tunable pipeline constants, fixed at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fraction of rows dropped from the top of the frame (letterbox band).
    pub crop_top: f32,
    /// Fraction of the frame height where the kept band ends.
    pub crop_bottom: f32,

    /// Background hue range, OpenCV convention (hue in [0, 180)).
    pub hue_min: u8,
    pub hue_max: u8,
    /// Minimum saturation/value for a pixel to count as background.
    pub sat_min: u8,
    pub val_min: u8,
    /// Radius of the square structuring element (2 gives a 5x5 kernel).
    pub morph_radius: u8,

    /// Accepted contour area range (strict bounds on both ends).
    pub min_contour_area: f64,
    pub max_contour_area: f64,

    /// Canonical card dimensions after perspective rectification.
    pub card_width: u32,
    pub card_height: u32,

    /// Corner crop fractions, shared by orientation scoring and symbol
    /// extraction so both stages look at the same region.
    pub corner_height_frac: f32,
    pub corner_width_frac: f32,
    /// Height fraction at which the corner splits into rank and suit.
    pub rank_split_frac: f32,

    /// Matches scoring below this are reported as "unrecognized".
    pub confidence_floor: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            crop_top: 0.20,
            crop_bottom: 0.80,
            hue_min: 30,
            hue_max: 90,
            sat_min: 30,
            val_min: 30,
            morph_radius: 2,
            min_contour_area: 3000.0,
            max_contour_area: 200_000.0,
            card_width: 200,
            card_height: 300,
            corner_height_frac: 0.40,
            corner_width_frac: 0.45,
            rank_split_frac: 0.55,
            confidence_floor: 0.30,
        }
    }
}
