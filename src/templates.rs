use std::path::Path;

use image::GrayImage;
use image::imageops::FilterType;

use crate::models::MatchResult;

/// Sentinel label returned when no template library is available.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A named reference glyph image.
#[derive(Debug, Clone)]
pub struct Template {
    pub label: String,
    pub image: GrayImage,
}

/// Read-only library of reference glyphs, loaded once at startup.
/// Labels come from file stems, so `A.png` classifies as "A".
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn insert(&mut self, label: impl Into<String>, image: GrayImage) {
        self.templates.push(Template { label: label.into(), image });
    }

    /// Load every decodable image in a directory as a grayscale template.
    /// Unreadable entries are skipped with a diagnostic; a missing
    /// directory yields an empty library so the pipeline stays operable
    /// while a template set is being bootstrapped.
    pub fn load_dir(dir: &Path, verbose: bool) -> Self {
        let mut library = Self::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Template directory {:?} not readable: {}", dir, e);
                return library;
            }
        };

        let mut paths: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            if !path.is_file() {
                continue;
            }
            let Some(label) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match image::open(&path) {
                Ok(img) => {
                    if verbose {
                        println!("  Loaded template: {} <- {:?}", label, path);
                    }
                    library.insert(label, img.to_luma8());
                }
                Err(e) => {
                    eprintln!("  Skipping unreadable template {:?}: {}", path, e);
                }
            }
        }

        if library.is_empty() {
            eprintln!("No templates loaded from {:?}", dir);
        }
        library
    }

    /// Best-scoring label for a symbol image.
    ///
    /// The query is resized to each template's dimensions and compared by
    /// normalized cross-correlation; the first template reaching the
    /// maximum wins. An empty library returns ("unknown", -1.0), which is
    /// lower than any valid correlation score.
    pub fn best_match(&self, query: &GrayImage) -> MatchResult {
        let mut best = MatchResult {
            label: UNKNOWN_LABEL.to_string(),
            score: -1.0,
        };

        if query.width() == 0 || query.height() == 0 {
            return best;
        }

        for template in &self.templates {
            let (tw, th) = template.image.dimensions();
            if tw == 0 || th == 0 {
                continue;
            }
            let resized = image::imageops::resize(query, tw, th, FilterType::Triangle);
            let score = ncc_score(&resized, &template.image);
            if score > best.score {
                best.score = score;
                best.label = template.label.clone();
            }
        }

        best
    }
}

/// Zero-mean normalized cross-correlation between two equally sized
/// images, in [-1, 1]. Zero-variance inputs score 0.0.
pub fn ncc_score(a: &GrayImage, b: &GrayImage) -> f32 {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let n = (a.width() * a.height()) as f64;
    if n == 0.0 {
        return 0.0;
    }

    let mean_a = a.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;
    let mean_b = b.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;

    let mut cross = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        let da = pa.0[0] as f64 - mean_a;
        let db = pb.0[0] as f64 - mean_b;
        cross += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }

    (cross / denom) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([(x * 7 + y * 13) as u8]))
    }

    #[test]
    fn identical_images_correlate_perfectly() {
        let img = gradient(20, 30);
        assert!((ncc_score(&img, &img) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inverted_images_anticorrelate() {
        let img = gradient(20, 30);
        let inverted = GrayImage::from_fn(20, 30, |x, y| Luma([255 - img.get_pixel(x, y).0[0]]));
        assert!((ncc_score(&img, &inverted) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn flat_image_scores_zero() {
        let flat = GrayImage::from_pixel(10, 10, Luma([128]));
        let img = gradient(10, 10);
        assert_eq!(ncc_score(&flat, &img), 0.0);
    }
}
