use crate::models::analysis::AnalysisResult;
use crate::models::settings::BotSettings;
use serde::{Deserialize, Serialize};

const COLOR_FAILED: u32 = 0xff0000;
const COLOR_PARTIAL: u32 = 0xffa500;
const COLOR_COMPLETED: u32 = 0x04ff00;

/// Embed-ready mission report.
///
/// Everything the Discord layer needs to post a report, with no Discord
/// types: it fills an embed from these fields verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionReport {
    pub title: String,
    pub submitted_by: String,
    /// Unix timestamp of submission, for `<t:...>`-style rendering.
    pub submitted_at: i64,
    pub operation: String,
    pub planet: String,
    pub difficulty_line: String,
    /// Number of missions that came back green.
    pub mission_count: usize,
    pub participants: Vec<String>,
    pub status_line: String,
    /// 0xRRGGBB accent color for the embed.
    pub embed_color: u32,
}

impl MissionReport {
    pub fn build(
        report_number: u64,
        submitted_by: impl Into<String>,
        participants: Vec<String>,
        result: &AnalysisResult,
        settings: &BotSettings,
    ) -> Self {
        let submitted_by = submitted_by.into();

        let difficulty_line = match result.difficulty_level {
            Some(level) => format!("Difficulty: {level}"),
            None => "Difficulty: Not Detected".to_string(),
        };

        let below_threshold = result
            .difficulty_level
            .is_some_and(|level| level < settings.task.min_difficulty_level);

        let embed_color = if below_threshold || result.has_red() {
            COLOR_FAILED
        } else if result.has_not_completed() {
            COLOR_PARTIAL
        } else {
            COLOR_COMPLETED
        };

        Self {
            title: format!(
                "{} Report - Report #{report_number}",
                settings.task.default_operation
            ),
            submitted_by,
            submitted_at: chrono::Utc::now().timestamp(),
            operation: settings.task.default_operation.clone(),
            planet: settings.task.default_planet.clone(),
            difficulty_line,
            mission_count: result.mission_count(),
            participants,
            status_line: result.message.clone(),
            embed_color,
        }
    }
}
