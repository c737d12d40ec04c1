pub mod config;
pub mod detection;
pub mod models;
pub mod templates;

pub use config::PipelineConfig;
pub use detection::{CardPipeline, DebugConfig};
pub use models::{BoundingBox, CardDetection, Contour, MatchResult};
pub use templates::{Template, TemplateLibrary, UNKNOWN_LABEL};
