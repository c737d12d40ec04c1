use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use cardsight::{CardDetection, CardPipeline, PipelineConfig, TemplateLibrary};

#[derive(Parser)]
#[command(name = "cardsight")]
#[command(about = "Detect and classify playing cards on a uniform background")]
struct Cli {
    /// Path to input frame image
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Directory of rank glyph templates (one image per label)
    #[arg(long, value_name = "DIR")]
    rank_templates: Option<PathBuf>,

    /// Directory of suit glyph templates (one image per label)
    #[arg(long, value_name = "DIR")]
    suit_templates: Option<PathBuf>,

    /// Minimum correlation for a match to be reported as recognized
    #[arg(long)]
    confidence_floor: Option<f32>,

    /// Only report the largest card candidate
    #[arg(long)]
    largest_only: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print detections as JSON
    #[arg(long)]
    json: bool,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }

    let frame = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?
        .to_rgb8();

    if args.verbose {
        println!("Image loaded: {}x{}\n", frame.width(), frame.height());
    }

    let ranks = match &args.rank_templates {
        Some(dir) => TemplateLibrary::load_dir(dir, args.verbose),
        None => TemplateLibrary::new(),
    };
    let suits = match &args.suit_templates {
        Some(dir) => TemplateLibrary::load_dir(dir, args.verbose),
        None => TemplateLibrary::new(),
    };

    if args.verbose {
        println!("Templates: {} ranks, {} suits\n", ranks.len(), suits.len());
    }

    let mut config = PipelineConfig::default();
    if let Some(floor) = args.confidence_floor {
        config.confidence_floor = floor;
    }

    let mut pipeline = CardPipeline::new(config, ranks, suits).with_verbose(args.verbose);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let detections: Vec<CardDetection> = if args.largest_only {
        pipeline.detect_largest(&frame)?.into_iter().collect()
    } else {
        pipeline.detect(&frame)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detections)?);
        return Ok(());
    }

    println!("\n=== Card Detection Results ===");
    println!("Total cards detected: {}", detections.len());

    if detections.is_empty() {
        println!("No cards detected.");
    } else {
        println!("\nDetected cards:");
        for card in &detections {
            println!(
                "  {} of {} at ({}, {}) {}x{} - rank: {:.2}, suit: {:.2}",
                card.rank,
                card.suit,
                card.bbox.x,
                card.bbox.y,
                card.bbox.width,
                card.bbox.height,
                card.rank_score,
                card.suit_score,
            );
        }
    }

    Ok(())
}
