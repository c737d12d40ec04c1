use image::RgbImage;
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use imageproc::geometry::{approximate_polygon_dp, arc_length, min_area_rect};

use crate::config::PipelineConfig;
use crate::models::Contour;

/// Order four quadrilateral corners as
/// {top-left, top-right, bottom-right, bottom-left}.
///
/// Top-left minimizes x+y, bottom-right maximizes x+y, top-right
/// minimizes y-x, bottom-left maximizes y-x. This is the single
/// canonicalization rule used everywhere corners are ordered.
pub fn order_corners(points: [(f32, f32); 4]) -> [(f32, f32); 4] {
    let sum = |p: &(f32, f32)| p.0 + p.1;
    let diff = |p: &(f32, f32)| p.1 - p.0;

    let top_left = *argmin_by(&points, sum);
    let bottom_right = *argmax_by(&points, sum);
    let top_right = *argmin_by(&points, diff);
    let bottom_left = *argmax_by(&points, diff);

    [top_left, top_right, bottom_right, bottom_left]
}

fn argmin_by<'a>(points: &'a [(f32, f32); 4], key: impl Fn(&(f32, f32)) -> f32) -> &'a (f32, f32) {
    let mut best = &points[0];
    for p in &points[1..] {
        if key(p) < key(best) {
            best = p;
        }
    }
    best
}

fn argmax_by<'a>(points: &'a [(f32, f32); 4], key: impl Fn(&(f32, f32)) -> f32) -> &'a (f32, f32) {
    let mut best = &points[0];
    for p in &points[1..] {
        if key(p) > key(best) {
            best = p;
        }
    }
    best
}

/// Corner candidates for a contour: Douglas-Peucker simplification with
/// epsilon at 2% of the closed perimeter when it yields a clean
/// quadrilateral, otherwise the minimum-area enclosing rectangle.
pub fn card_corners(contour: &Contour) -> Option<[(f32, f32); 4]> {
    if contour.points.is_empty() {
        return None;
    }

    let perimeter = arc_length(&contour.points, true);
    let approx = approximate_polygon_dp(&contour.points, 0.02 * perimeter, true);

    let quad: [(f32, f32); 4] = if approx.len() == 4 {
        [
            (approx[0].x as f32, approx[0].y as f32),
            (approx[1].x as f32, approx[1].y as f32),
            (approx[2].x as f32, approx[2].y as f32),
            (approx[3].x as f32, approx[3].y as f32),
        ]
    } else {
        let rect = min_area_rect(&contour.points);
        [
            (rect[0].x as f32, rect[0].y as f32),
            (rect[1].x as f32, rect[1].y as f32),
            (rect[2].x as f32, rect[2].y as f32),
            (rect[3].x as f32, rect[3].y as f32),
        ]
    };

    Some(order_corners(quad))
}

/// Warp the region bounded by a contour onto the canonical card rectangle.
///
/// Returns `None` when the corner set is degenerate (colinear or
/// near-zero area), in which case the candidate is skipped for this
/// frame rather than failing the pipeline.
pub fn extract_card(frame: &RgbImage, contour: &Contour, config: &PipelineConfig) -> Option<RgbImage> {
    let corners = card_corners(contour)?;

    let w = config.card_width;
    let h = config.card_height;
    if w == 0 || h == 0 {
        return None;
    }

    let destination = [
        (0.0, 0.0),
        ((w - 1) as f32, 0.0),
        ((w - 1) as f32, (h - 1) as f32),
        (0.0, (h - 1) as f32),
    ];

    // A singular corner set has no projective map onto the rectangle.
    let projection = Projection::from_control_points(corners, destination)?;

    let mut card = RgbImage::new(w, h);
    warp_into(
        frame,
        &projection,
        Interpolation::Bilinear,
        image::Rgb([0, 0, 0]),
        &mut card,
    );

    Some(card)
}
