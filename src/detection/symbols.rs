use image::{GrayImage, RgbImage};

use crate::config::PipelineConfig;
use crate::detection::orientation::ink_mask;

/// Crop the top-left corner of an oriented card and split its binarized
/// form into the rank (upper) and suit (lower) sub-images.
///
/// Returns `None` when the crop fractions produce a zero-area region,
/// which only happens for degenerate card sizes.
pub fn extract_symbols(card: &RgbImage, config: &PipelineConfig) -> Option<(GrayImage, GrayImage)> {
    let (w, h) = card.dimensions();
    let corner_h = (h as f32 * config.corner_height_frac) as u32;
    let corner_w = (w as f32 * config.corner_width_frac) as u32;
    if corner_w == 0 || corner_h == 0 {
        return None;
    }

    let corner = image::imageops::crop_imm(card, 0, 0, corner_w, corner_h).to_image();
    let binary = ink_mask(&corner);

    let split = (corner_h as f32 * config.rank_split_frac) as u32;
    if split == 0 || split >= corner_h {
        return None;
    }

    let rank = image::imageops::crop_imm(&binary, 0, 0, corner_w, split).to_image();
    let suit = image::imageops::crop_imm(&binary, 0, split, corner_w, corner_h - split).to_image();

    Some((rank, suit))
}
