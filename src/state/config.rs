// Configuration management for persistent settings

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::settings::AppSettings;

#[cfg(debug_assertions)]
const APP_NAME: &str = "collstats-dev";

#[cfg(not(debug_assertions))]
const APP_NAME: &str = "collstats";

/// Manages the settings file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings_path: PathBuf,
}

impl ConfigManager {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Create a ConfigManager for the platform config directory
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { settings_path: config_dir.join(Self::SETTINGS_FILE) })
    }

    /// Create a ConfigManager reading and writing an explicit settings file
    pub fn with_settings_path(settings_path: impl Into<PathBuf>) -> Self {
        Self { settings_path: settings_path.into() }
    }

    /// Get the platform-specific config directory
    fn get_config_dir() -> Result<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME)).context("Could not determine config directory")
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load data from a JSON file
    fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let value: T = serde_json::from_str(&data)
            .with_context(|| format!("Failed to deserialize {}", path.display()))?;

        Ok(Some(value))
    }

    /// Save data to a JSON file (atomic via temp + rename).
    fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let json = serde_json::to_string_pretty(data)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;

        atomic_write(path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Load settings from disk, falling back to defaults when the file is absent
    pub fn load_settings(&self) -> Result<AppSettings> {
        let settings = Self::load_json(&self.settings_path)?;
        if settings.is_none() {
            log::debug!("No settings at {}, using defaults", self.settings_path.display());
        }
        Ok(settings.unwrap_or_default())
    }

    /// Save settings to disk
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        Self::save_json(&self.settings_path, settings)
    }
}

/// Write `data` to `path` atomically: write to a sibling temp file first, then
/// rename, so readers see either the old or the new content.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
