pub mod contours;
pub mod orientation;
pub mod preprocessing;
pub mod rectify;
pub mod symbols;

use std::path::PathBuf;

use anyhow::Result;
use image::RgbImage;

use crate::config::PipelineConfig;
use crate::models::{CardDetection, Contour, MatchResult};
use crate::templates::TemplateLibrary;

/// Where to dump intermediate images for inspection.
#[derive(Clone, Debug)]
pub struct DebugConfig {
    pub output_dir: PathBuf,
}

/// Frame-at-a-time card detection pipeline.
///
/// Stateless across frames apart from the two template libraries, which
/// are loaded once and never mutated afterwards.
pub struct CardPipeline {
    config: PipelineConfig,
    ranks: TemplateLibrary,
    suits: TemplateLibrary,
    verbose: bool,
    debug: Option<DebugConfig>,
}

impl CardPipeline {
    pub fn new(config: PipelineConfig, ranks: TemplateLibrary, suits: TemplateLibrary) -> Self {
        Self {
            config,
            ranks,
            suits,
            verbose: false,
            debug: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable intermediate-image dumps. The directory must be empty or
    /// non-existent.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }
        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one frame: every accepted contour becomes at most one
    /// classified card record. Candidates with degenerate geometry are
    /// skipped without failing the frame.
    pub fn detect(&self, frame: &RgbImage) -> Result<Vec<CardDetection>> {
        let cropped = preprocessing::crop_letterbox(frame, &self.config);
        if cropped.width() == 0 || cropped.height() == 0 {
            return Ok(Vec::new());
        }

        let mask = preprocessing::segment_background(&cropped, &self.config);
        if let Some(debug) = &self.debug {
            mask.save(debug.output_dir.join("mask.png"))?;
        }

        let candidates = contours::find_card_contours(&mask, &self.config);
        if self.verbose {
            println!("Found {} card-sized contours", candidates.len());
        }

        let mut detections = Vec::new();
        for (i, contour) in candidates.iter().enumerate() {
            match self.process_candidate(&cropped, contour, i)? {
                Some(detection) => {
                    if self.verbose {
                        println!(
                            "  Card {}: {} ({:.3}) / {} ({:.3}) at ({}, {})",
                            i + 1,
                            detection.rank,
                            detection.rank_score,
                            detection.suit,
                            detection.suit_score,
                            detection.bbox.x,
                            detection.bbox.y,
                        );
                    }
                    detections.push(detection);
                }
                None => {
                    if self.verbose {
                        println!("  Card {}: skipped (degenerate geometry)", i + 1);
                    }
                }
            }
        }

        Ok(detections)
    }

    /// Convenience for the capture workflow that only tracks the most
    /// prominent card: process candidates largest-first and return the
    /// first that yields a usable record.
    pub fn detect_largest(&self, frame: &RgbImage) -> Result<Option<CardDetection>> {
        let cropped = preprocessing::crop_letterbox(frame, &self.config);
        if cropped.width() == 0 || cropped.height() == 0 {
            return Ok(None);
        }

        let mask = preprocessing::segment_background(&cropped, &self.config);
        let mut candidates = contours::find_card_contours(&mask, &self.config);
        candidates.sort_by(|a, b| b.area.total_cmp(&a.area));

        for (i, contour) in candidates.iter().enumerate() {
            if let Some(detection) = self.process_candidate(&cropped, contour, i)? {
                return Ok(Some(detection));
            }
        }
        Ok(None)
    }

    fn process_candidate(
        &self,
        cropped: &RgbImage,
        contour: &Contour,
        index: usize,
    ) -> Result<Option<CardDetection>> {
        let Some(card) = rectify::extract_card(cropped, contour, &self.config) else {
            return Ok(None);
        };

        let oriented = orientation::orient_card(card, &self.config);

        let Some((rank_roi, suit_roi)) = symbols::extract_symbols(&oriented, &self.config) else {
            return Ok(None);
        };

        if let Some(debug) = &self.debug {
            let dir = &debug.output_dir;
            oriented.save(dir.join(format!("card_{:02}.png", index + 1)))?;
            rank_roi.save(dir.join(format!("rank_{:02}.png", index + 1)))?;
            suit_roi.save(dir.join(format!("suit_{:02}.png", index + 1)))?;
        }

        let rank = self.classify(&rank_roi, &self.ranks);
        let suit = self.classify(&suit_roi, &self.suits);

        Ok(Some(CardDetection {
            bbox: contour.bounding_box(),
            rank: rank.label,
            rank_score: rank.score,
            suit: suit.label,
            suit_score: suit.score,
        }))
    }

    /// Caller-side confidence policy: real matches scoring below the
    /// floor are reported as unrecognized. The empty-library sentinel
    /// ("unknown", -1.0) passes through unchanged.
    fn classify(&self, roi: &image::GrayImage, library: &TemplateLibrary) -> MatchResult {
        let result = library.best_match(roi);
        if !library.is_empty() && result.score < self.config.confidence_floor {
            return MatchResult {
                label: "unrecognized".to_string(),
                score: result.score,
            };
        }
        result
    }
}
