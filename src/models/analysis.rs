use crate::models::annotation::{AnchorPoint, Slot, TextAnnotation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean RGB of the sampled neighborhood around an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Categorical outcome of one mission slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionOutcome {
    Green,
    Red,
    NotCompleted,
}

impl MissionOutcome {
    /// Human-readable form used in log lines and debug-image labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionOutcome::Green => "green",
            MissionOutcome::Red => "red",
            MissionOutcome::NotCompleted => "not completed",
        }
    }
}

/// Overall operation status derived from slot outcomes and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationStatus {
    Completed,
    Partial,
    Failed,
}

/// The one artifact the pipeline returns to the command layer.
///
/// Constructed once per submitted image and never mutated afterwards.
/// `fail_reasons` carries the structured would-fail list even when dev mode
/// suppressed the hard rejection, so the caller can render a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: OperationStatus,
    pub message: String,
    pub difficulty_level: Option<u32>,
    pub slot_outcomes: BTreeMap<Slot, MissionOutcome>,
    pub fail_reasons: Vec<String>,
    pub annotations: Vec<TextAnnotation>,
    pub anchors: BTreeMap<Slot, AnchorPoint>,
}

impl AnalysisResult {
    /// Number of slots that came back green.
    pub fn mission_count(&self) -> usize {
        self.slot_outcomes
            .values()
            .filter(|o| **o == MissionOutcome::Green)
            .count()
    }

    pub fn has_red(&self) -> bool {
        self.slot_outcomes
            .values()
            .any(|o| *o == MissionOutcome::Red)
    }

    pub fn has_not_completed(&self) -> bool {
        self.slot_outcomes
            .values()
            .any(|o| *o == MissionOutcome::NotCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&MissionOutcome::NotCompleted).unwrap(),
            "\"not-completed\""
        );
        assert_eq!(
            serde_json::to_string(&MissionOutcome::Green).unwrap(),
            "\"green\""
        );
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OperationStatus::Failed).unwrap(),
            "\"FAILED\""
        );
    }

    #[test]
    fn test_result_counters() {
        let mut slot_outcomes = BTreeMap::new();
        slot_outcomes.insert(Slot::First, MissionOutcome::Green);
        slot_outcomes.insert(Slot::Second, MissionOutcome::Red);
        slot_outcomes.insert(Slot::Third, MissionOutcome::NotCompleted);

        let result = AnalysisResult {
            status: OperationStatus::Failed,
            message: String::new(),
            difficulty_level: Some(7),
            slot_outcomes,
            fail_reasons: Vec::new(),
            annotations: Vec::new(),
            anchors: BTreeMap::new(),
        };

        assert_eq!(result.mission_count(), 1);
        assert!(result.has_red());
        assert!(result.has_not_completed());
    }
}
