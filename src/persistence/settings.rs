use crate::domain::ChartOptions;
use crate::ticker::DEFAULT_TICK_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_true() -> bool {
    true
}

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// How often the running timer is sampled for display
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Chart view, granularity and metric shown at start-up
    #[serde(default)]
    pub chart: ChartOptions,

    /// Desktop notification when a session is finished
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            chart: ChartOptions::default(),
            notifications: true,
        }
    }
}

/// Load settings from settings.json
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        // If file doesn't exist, return default settings
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Malformed settings: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Granularity, Metric, ViewMode};
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tick_ms, 200);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"chart": {"view": "aggregate"}}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.tick_ms, 200);
        assert!(settings.notifications);
        assert_eq!(settings.chart.view, ViewMode::Aggregate);
        assert_eq!(settings.chart.granularity, Granularity::Hourly);
    }

    #[test]
    fn test_malformed_settings_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "tick_ms = 5").unwrap();

        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.tick_ms = 500;
        settings.notifications = false;
        settings.chart.metric = Metric::AverageDuration;

        save_settings(&path, &settings).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
