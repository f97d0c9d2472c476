// Settings service
// Loads and saves timeline settings as TOML

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::models::settings::TimelineSettings;

const SETTINGS_FILE_NAME: &str = "timeline.toml";

/// Loads and saves timeline settings from a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config directory, if one can be found.
    pub fn from_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "SalonTimeline", "SalonTimeline")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults.
    pub fn get(&self) -> Result<TimelineSettings> {
        if !self.path.exists() {
            log::debug!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(TimelineSettings::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings = TimelineSettings::from_toml(&content)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    pub fn update(&self, settings: &TimelineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(&self.path, settings.to_toml())
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::info!("Saved timeline settings to {}", self.path.display());
        Ok(())
    }
}
