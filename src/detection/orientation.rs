use image::{GrayImage, RgbImage};
use image::imageops::{rotate90, rotate180, rotate270};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};

use crate::config::PipelineConfig;

/// Binarize a card so dark ink becomes foreground (255): grayscale,
/// Otsu global threshold, inverted.
pub fn ink_mask(card: &RgbImage) -> GrayImage {
    let gray = image::imageops::grayscale(card);
    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::BinaryInverted)
}

/// Ink-pixel counts of the four corner crops, in evaluation order
/// {top-left, top-right, bottom-left, bottom-right}.
pub fn corner_scores(ink: &GrayImage, config: &PipelineConfig) -> [u32; 4] {
    let (w, h) = ink.dimensions();
    let corner_h = (h as f32 * config.corner_height_frac) as u32;
    let corner_w = (w as f32 * config.corner_width_frac) as u32;

    let origins = [
        (0, 0),
        (w - corner_w, 0),
        (0, h - corner_h),
        (w - corner_w, h - corner_h),
    ];

    let mut scores = [0u32; 4];
    for (i, &(x0, y0)) in origins.iter().enumerate() {
        let mut count = 0;
        for y in y0..y0 + corner_h {
            for x in x0..x0 + corner_w {
                if ink.get_pixel(x, y).0[0] > 0 {
                    count += 1;
                }
            }
        }
        scores[i] = count;
    }
    scores
}

/// Rotate a canonical card in 90-degree steps so the corner holding the
/// rank/suit glyph (the one with the most ink) ends up top-left.
///
/// Ties go to the first corner reaching the maximum in evaluation order,
/// so an all-blank card is returned unrotated.
pub fn orient_card(card: RgbImage, config: &PipelineConfig) -> RgbImage {
    let ink = ink_mask(&card);
    let scores = corner_scores(&ink, config);

    let mut densest = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[densest] {
            densest = i;
        }
    }

    match densest {
        0 => card,
        1 => rotate270(&card),
        2 => rotate180(&card),
        _ => rotate90(&card),
    }
}
