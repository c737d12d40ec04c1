use imageproc::point::Point;
use serde::Serialize;

/// Axis-aligned bounding box in cropped-frame coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Closed outer boundary of a foreground region, plus its enclosed area.
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub area: f64,
}

impl Contour {
    pub fn from_points(points: Vec<Point<i32>>) -> Self {
        let area = shoelace_area(&points);
        Self { points, area }
    }

    /// Axis-aligned bounds of the boundary points.
    pub fn bounding_box(&self) -> BoundingBox {
        if self.points.is_empty() {
            return BoundingBox { x: 0, y: 0, width: 0, height: 0 };
        }

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;

        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        BoundingBox {
            x: min_x.max(0) as u32,
            y: min_y.max(0) as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        }
    }
}

/// Enclosed polygon area via the shoelace formula.
pub fn shoelace_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area: i64 = 0;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }

    (twice_area.abs() as f64) / 2.0
}

/// Best template label for one symbol image, with its correlation score.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub label: String,
    pub score: f32,
}

/// One classified card in a frame.
#[derive(Debug, Clone, Serialize)]
pub struct CardDetection {
    pub bbox: BoundingBox,
    pub rank: String,
    pub rank_score: f32,
    pub suit: String,
    pub suit_score: f32,
}
