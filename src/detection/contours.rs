use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

use crate::config::PipelineConfig;
use crate::models::Contour;

/// Extract external contours from a binary mask and keep the ones whose
/// enclosed area fits the configured card range. Ordering is unspecified;
/// callers wanting the largest candidate sort by descending area.
pub fn find_card_contours(mask: &GrayImage, config: &PipelineConfig) -> Vec<Contour> {
    let raw = find_contours::<i32>(mask);

    let outer = raw
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| Contour::from_points(c.points))
        .collect();

    filter_by_area(outer, config.min_contour_area, config.max_contour_area)
}

/// Strict bounds on both ends: areas exactly at a threshold are rejected.
pub fn filter_by_area(contours: Vec<Contour>, min_area: f64, max_area: f64) -> Vec<Contour> {
    contours
        .into_iter()
        .filter(|c| c.area > min_area && c.area < max_area)
        .collect()
}
