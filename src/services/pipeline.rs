use crate::models::analysis::AnalysisResult;
use crate::models::settings::BotSettings;
use crate::services::aggregator::aggregate;
use crate::services::anchor::locate_anchors;
use crate::services::classifier::classify;
use crate::services::detector::{DetectionError, TextDetector};
use crate::services::difficulty::extract_difficulty;
use crate::services::renderer::{render_debug, save_debug_image};
use crate::services::sampler::sample_mean_rgb;
use crate::services::settings::SettingsManager;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Analysis failures surfaced to the command layer.
///
/// "No text found" is not here on purpose: that case returns a well-formed
/// result with empty slots. Render failures never surface either; they are
/// logged and the already-computed result stands.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("text detection failed: {0}")]
    Detection(#[from] DetectionError),
    #[error("could not decode submitted image: {0}")]
    InvalidImage(#[from] image::ImageError),
}

/// Per-submission options supplied by the command layer.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Downgrade difficulty rejections to warnings; never hides reasons.
    pub dev_mode: bool,
    /// Where to write the annotated debug image, if anywhere. The pipeline
    /// owns no storage policy beyond this caller-supplied destination.
    pub debug_image_path: Option<PathBuf>,
}

/// The image-analysis pipeline.
///
/// One call to [`analyze`](ImageAnalyzer::analyze) is one synchronous run:
/// detect text, locate anchors, sample and classify colors, extract the
/// difficulty, aggregate a verdict, and render the debug artifact on the
/// side. Settings are loaded fresh on every call so threshold edits apply
/// to the next submission without a restart.
pub struct ImageAnalyzer<D> {
    detector: D,
    settings: SettingsManager,
}

impl<D: TextDetector> ImageAnalyzer<D> {
    pub fn new(detector: D, settings: SettingsManager) -> Self {
        Self { detector, settings }
    }

    pub async fn analyze(
        &self,
        image_bytes: &[u8],
        options: &AnalyzeOptions,
    ) -> Result<AnalysisResult, AnalysisError> {
        let settings = self.load_settings();

        let image = image::load_from_memory(image_bytes)?.to_rgb8();
        let (width, height) = image.dimensions();

        let annotations = self.detector.detect(image_bytes).await?;
        if annotations.is_empty() {
            info!("no text detected in submitted image");
        }

        let anchors = locate_anchors(&annotations, width, height);

        let mut slot_outcomes = BTreeMap::new();
        for (slot, anchor) in &anchors {
            let sample = sample_mean_rgb(&image, anchor);
            let outcome = classify(sample, &settings.classifier);
            debug!(
                slot = slot.marker(),
                r = sample.r,
                g = sample.g,
                b = sample.b,
                outcome = outcome.as_str(),
                "classified mission slot"
            );
            slot_outcomes.insert(*slot, outcome);
        }

        let detected_text = annotations
            .iter()
            .map(|a| a.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let difficulty_level = extract_difficulty(&detected_text);

        let verdict = aggregate(
            &slot_outcomes,
            difficulty_level,
            settings.task.min_difficulty_level,
            options.dev_mode,
        );
        info!(
            status = ?verdict.status,
            difficulty = ?difficulty_level,
            slots = slot_outcomes.len(),
            "analysis complete"
        );

        if let Some(path) = &options.debug_image_path {
            match render_debug(&image, &annotations, &anchors, &slot_outcomes) {
                Some(canvas) => {
                    if let Err(e) = save_debug_image(&canvas, path) {
                        warn!(error = %e, "debug image write failed, keeping analysis result");
                    }
                }
                None => debug!("debug render skipped"),
            }
        }

        Ok(AnalysisResult {
            status: verdict.status,
            message: verdict.message,
            difficulty_level,
            slot_outcomes,
            fail_reasons: verdict.fail_reasons,
            annotations,
            anchors,
        })
    }

    /// Settings are read per request; a broken settings file downgrades to
    /// defaults rather than blocking every submission.
    fn load_settings(&self) -> BotSettings {
        match self.settings.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "falling back to default settings");
                BotSettings::default()
            }
        }
    }
}
