use crate::models::analysis::{MissionOutcome, OperationStatus};
use crate::models::annotation::Slot;
use std::collections::BTreeMap;

/// Aggregated verdict for one submission.
///
/// `fail_reasons` is always fully populated, even when dev mode downgrades
/// the rejection; the caller renders it as a warning in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub status: OperationStatus,
    pub message: String,
    pub fail_reasons: Vec<String>,
}

/// Combine per-slot outcomes and the difficulty rating into an overall
/// operation status.
///
/// Dev mode suppresses the difficulty-based rejections (missing or below
/// threshold) but never the red-mission failure, and never the reasons
/// themselves.
pub fn aggregate(
    slot_outcomes: &BTreeMap<Slot, MissionOutcome>,
    difficulty: Option<u32>,
    min_difficulty_level: u32,
    dev_mode: bool,
) -> Verdict {
    let mut fail_reasons = Vec::new();
    let mut suppressible = Vec::new();

    match difficulty {
        None => suppressible.push("difficulty level is missing".to_string()),
        Some(level) if level < min_difficulty_level => suppressible.push(format!(
            "difficulty level {level} is below the required {min_difficulty_level}"
        )),
        Some(_) => {}
    }

    let has_red = slot_outcomes
        .values()
        .any(|o| *o == MissionOutcome::Red);
    let has_pending = slot_outcomes
        .values()
        .any(|o| *o == MissionOutcome::NotCompleted);

    fail_reasons.extend(suppressible.iter().cloned());
    if has_red {
        fail_reasons.push("one or more missions failed (red detected)".to_string());
    }
    if slot_outcomes.is_empty() {
        fail_reasons.push("no mission markers detected".to_string());
    }

    // Red and marker-free submissions reject even in dev mode; only the
    // difficulty reasons are downgradable.
    let hard_failure =
        has_red || slot_outcomes.is_empty() || (!dev_mode && !suppressible.is_empty());

    let (status, mut message) = if hard_failure {
        (
            OperationStatus::Failed,
            format!("Operation Failed: {}", fail_reasons.join(", ")),
        )
    } else if has_pending {
        (
            OperationStatus::Partial,
            "Operation Not Fully Completed: Some missions are pending.".to_string(),
        )
    } else {
        (
            OperationStatus::Completed,
            "Operation Completed: All missions successful.".to_string(),
        )
    };

    if dev_mode && !hard_failure && !fail_reasons.is_empty() {
        message.push_str(&format!(
            " [dev mode] would normally fail: {}",
            fail_reasons.join(", ")
        ));
    }

    Verdict {
        status,
        message,
        fail_reasons,
    }
}
