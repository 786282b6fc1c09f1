//! Image-analysis core for a mission-report Discord bot.
//!
//! Takes a results-screen screenshot, asks an external text detector for
//! annotations, samples pixel colors at the detected slot markers, and
//! derives an overall operation status plus an annotated debug image.
//! The Discord command layer lives outside this crate and consumes
//! [`ImageAnalyzer::analyze`], the counters, and [`MissionReport`].

pub mod models;
pub mod services;
pub mod utils;

pub use models::analysis::{AnalysisResult, MissionOutcome, OperationStatus, RgbSample};
pub use models::annotation::{AnchorPoint, Slot, TextAnnotation, Vertex};
pub use models::settings::{BotSettings, ClassifierConfig, TaskConfig};
pub use services::counter::{CounterError, ReportCounter};
pub use services::detector::{DetectionError, HttpTextDetector, TextDetector};
pub use services::pipeline::{AnalysisError, AnalyzeOptions, ImageAnalyzer};
pub use services::report::MissionReport;
pub use services::settings::{SettingsError, SettingsManager};
