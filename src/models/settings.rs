use serde::{Deserialize, Serialize};

/// Submission requirements and report defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskConfig {
    /// Minimum difficulty a submission must show to be accepted.
    pub min_difficulty_level: u32,
    pub default_operation: String,
    pub default_planet: String,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            min_difficulty_level: 7,
            default_operation: "Major Initiative".to_string(),
            default_planet: "Unknown".to_string(),
        }
    }
}

/// Color-classification thresholds.
///
/// Tuned for one game's results-screen theme; kept configurable so a theme
/// change does not require a code change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// A channel must exceed both others by this ratio to count as dominant.
    pub channel_ratio: f64,
    /// The dominant channel must also exceed this absolute value.
    pub min_channel: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            channel_ratio: 1.2,
            min_channel: 50,
        }
    }
}

/// Complete bot settings, read fresh for every analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BotSettings {
    pub task: TaskConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}
