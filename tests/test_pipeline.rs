use cardsight::{CardPipeline, PipelineConfig, TemplateLibrary, UNKNOWN_LABEL};
use image::{Rgb, RgbImage};

const GREEN: Rgb<u8> = Rgb([40, 200, 40]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Uniform green 640x480 frame, the background the segmenter is tuned for.
fn green_frame() -> RgbImage {
    RgbImage::from_pixel(640, 480, GREEN)
}

/// Paint a filled white rectangle in original-frame coordinates.
fn paint_rect(frame: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            frame.put_pixel(x, y, WHITE);
        }
    }
}

fn empty_pipeline() -> CardPipeline {
    CardPipeline::new(
        PipelineConfig::default(),
        TemplateLibrary::new(),
        TemplateLibrary::new(),
    )
}

#[test]
fn single_card_yields_one_record() -> anyhow::Result<()> {
    let mut frame = green_frame();
    // 250x200 card well inside the kept 96..384 row band; boundary
    // area is 249 * 199 = 49551, inside the accepted range.
    paint_rect(&mut frame, 200, 150, 250, 200);

    let detections = empty_pipeline().detect(&frame)?;

    assert_eq!(detections.len(), 1);
    let card = &detections[0];

    // Bounding box in cropped-frame coordinates (top 96 rows removed).
    assert!((card.bbox.x as i64 - 200).abs() <= 4, "x = {}", card.bbox.x);
    assert!((card.bbox.y as i64 - 54).abs() <= 4, "y = {}", card.bbox.y);
    assert!((card.bbox.width as i64 - 250).abs() <= 4, "w = {}", card.bbox.width);
    assert!((card.bbox.height as i64 - 200).abs() <= 4, "h = {}", card.bbox.height);

    // No templates loaded: the sentinel passes through unchanged.
    assert_eq!(card.rank, UNKNOWN_LABEL);
    assert_eq!(card.suit, UNKNOWN_LABEL);
    assert_eq!(card.rank_score, -1.0);
    assert_eq!(card.suit_score, -1.0);

    Ok(())
}

#[test]
fn noise_blob_is_filtered_out() -> anyhow::Result<()> {
    let mut frame = green_frame();
    paint_rect(&mut frame, 50, 150, 200, 150); // valid card
    paint_rect(&mut frame, 350, 160, 200, 150); // valid card
    paint_rect(&mut frame, 290, 200, 20, 20); // too small, area under 3000

    let detections = empty_pipeline().detect(&frame)?;

    assert_eq!(detections.len(), 2);
    Ok(())
}

#[test]
fn empty_frame_yields_no_records() -> anyhow::Result<()> {
    let detections = empty_pipeline().detect(&green_frame())?;
    assert!(detections.is_empty());
    Ok(())
}

#[test]
fn zero_height_frame_is_absorbed() -> anyhow::Result<()> {
    let frame = RgbImage::new(640, 0);
    let detections = empty_pipeline().detect(&frame)?;
    assert!(detections.is_empty());
    Ok(())
}

#[test]
fn detect_largest_picks_the_bigger_card() -> anyhow::Result<()> {
    let mut frame = green_frame();
    paint_rect(&mut frame, 40, 150, 120, 100); // smaller
    paint_rect(&mut frame, 300, 140, 260, 210); // larger

    let detection = empty_pipeline().detect_largest(&frame)?;

    let card = detection.expect("one card should survive");
    assert!((card.bbox.x as i64 - 300).abs() <= 4);
    assert!((card.bbox.width as i64 - 260).abs() <= 4);
    Ok(())
}

#[test]
fn low_scoring_match_reports_unrecognized() -> anyhow::Result<()> {
    use image::{GrayImage, Luma};

    // A rank library whose single template is unlike any white card
    // corner: correlation stays below the confidence floor.
    let noise = GrayImage::from_fn(40, 60, |x, y| Luma([((x * 31 + y * 17) % 251) as u8]));
    let mut ranks = TemplateLibrary::new();
    ranks.insert("A", noise);

    let pipeline = CardPipeline::new(
        PipelineConfig::default(),
        ranks,
        TemplateLibrary::new(),
    );

    let mut frame = green_frame();
    paint_rect(&mut frame, 200, 150, 250, 200);

    let detections = pipeline.detect(&frame)?;
    assert_eq!(detections.len(), 1);

    let card = &detections[0];
    assert_eq!(card.rank, "unrecognized");
    assert!(card.rank_score < 0.30);
    // Suit library is empty, so its sentinel is untouched.
    assert_eq!(card.suit, UNKNOWN_LABEL);
    assert_eq!(card.suit_score, -1.0);

    Ok(())
}
