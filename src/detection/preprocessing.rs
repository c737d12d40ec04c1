use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};

use crate::config::PipelineConfig;

/// Remove the letterbox bands, keeping the middle row range at full width.
pub fn crop_letterbox(frame: &RgbImage, config: &PipelineConfig) -> RgbImage {
    let (width, height) = frame.dimensions();
    let top = (height as f32 * config.crop_top) as u32;
    let bottom = (height as f32 * config.crop_bottom) as u32;

    if bottom <= top {
        return RgbImage::new(width, 0);
    }

    image::imageops::crop_imm(frame, 0, top, width, bottom - top).to_image()
}

/// Binary foreground mask: background pixels (hue/saturation/value inside
/// the configured range) become 0, everything else 255. Speckle is removed
/// with one morphological open followed by one close.
pub fn segment_background(frame: &RgbImage, config: &PipelineConfig) -> GrayImage {
    let (width, height) = frame.dimensions();
    let mut mask = GrayImage::new(width, height);

    for (x, y, pixel) in frame.enumerate_pixels() {
        let (h, s, v) = rgb_to_hsv(pixel.0[0], pixel.0[1], pixel.0[2]);
        let is_background = h >= config.hue_min
            && h <= config.hue_max
            && s >= config.sat_min
            && v >= config.val_min;
        mask.put_pixel(x, y, Luma([if is_background { 0 } else { 255 }]));
    }

    if width == 0 || height == 0 {
        return mask;
    }

    let opened = open(&mask, Norm::LInf, config.morph_radius);
    close(&opened, Norm::LInf, config.morph_radius)
}

/// RGB to HSV with OpenCV's 8-bit conventions: hue in [0, 180),
/// saturation and value in [0, 255].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let value = max;
    let saturation = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

    let hue = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    (
        (hue / 2.0).round().min(179.0) as u8,
        saturation.round().min(255.0) as u8,
        value.round() as u8,
    )
}
