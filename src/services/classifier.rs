use crate::models::analysis::{MissionOutcome, RgbSample};
use crate::models::settings::ClassifierConfig;

/// Map a sampled color to a mission outcome.
///
/// Rule order matters: green dominance is checked before red, and anything
/// that is neither dominant reads as not-completed. Total function, no
/// failure mode.
pub fn classify(sample: RgbSample, config: &ClassifierConfig) -> MissionOutcome {
    let r = sample.r as f64;
    let g = sample.g as f64;
    let b = sample.b as f64;
    let ratio = config.channel_ratio;
    let floor = config.min_channel as f64;

    if g > r * ratio && g > b * ratio && g > floor {
        MissionOutcome::Green
    } else if r > g * ratio && r > b * ratio && r > floor {
        MissionOutcome::Red
    } else {
        MissionOutcome::NotCompleted
    }
}
