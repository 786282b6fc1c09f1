use crate::models::settings::BotSettings;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to determine config directory")]
    NoConfigDir,
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads and persists bot settings.
///
/// The difficulty threshold is read live: callers load settings per analysis
/// rather than caching them across submissions.
pub struct SettingsManager {
    settings_dir: PathBuf,
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Create a manager rooted at the platform config directory.
    pub fn new() -> Result<Self, SettingsError> {
        let settings_dir = dirs::config_dir()
            .ok_or(SettingsError::NoConfigDir)?
            .join("mission-report");

        fs::create_dir_all(&settings_dir)?;
        Ok(Self::with_dir(settings_dir))
    }

    /// Create a manager rooted at an explicit directory.
    pub fn with_dir(settings_dir: PathBuf) -> Self {
        let settings_path = settings_dir.join("settings.json");
        Self {
            settings_dir,
            settings_path,
        }
    }

    /// Load settings from disk, falling back to defaults when the file
    /// does not exist yet.
    pub fn load(&self) -> Result<BotSettings, SettingsError> {
        if !self.exists() {
            return Ok(BotSettings::default());
        }

        let content = fs::read_to_string(&self.settings_path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &BotSettings) -> Result<(), SettingsError> {
        fs::create_dir_all(&self.settings_dir)?;
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn exists(&self) -> bool {
        self.settings_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_manager() -> SettingsManager {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);

        let dir = std::env::temp_dir().join(format!(
            "mission-report-settings-test-{}-{}",
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&dir);
        SettingsManager::with_dir(dir)
    }

    fn cleanup(manager: &SettingsManager) {
        let _ = fs::remove_dir_all(&manager.settings_dir);
    }

    #[test]
    fn test_load_defaults_when_missing() {
        let manager = test_manager();
        assert!(!manager.exists());

        let settings = manager.load().unwrap();
        assert_eq!(settings, BotSettings::default());

        cleanup(&manager);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let manager = test_manager();

        let mut settings = BotSettings::default();
        settings.task.min_difficulty_level = 9;
        settings.task.default_planet = "Hellmire".to_string();
        settings.classifier.min_channel = 60;

        manager.save(&settings).unwrap();
        assert!(manager.exists());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, settings);

        cleanup(&manager);
    }

    #[test]
    fn test_threshold_changes_are_picked_up_on_next_load() {
        let manager = test_manager();

        let mut settings = BotSettings::default();
        settings.task.min_difficulty_level = 5;
        manager.save(&settings).unwrap();
        assert_eq!(manager.load().unwrap().task.min_difficulty_level, 5);

        settings.task.min_difficulty_level = 8;
        manager.save(&settings).unwrap();
        assert_eq!(manager.load().unwrap().task.min_difficulty_level, 8);

        cleanup(&manager);
    }

    #[test]
    fn test_settings_path_shape() {
        let manager = test_manager();
        assert!(manager
            .settings_path()
            .to_str()
            .unwrap()
            .ends_with("settings.json"));
        cleanup(&manager);
    }
}
