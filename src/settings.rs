//! Persistent retrieval preferences.
//!
//! Two numbers travel with every chat and search request: how many source
//! documents to retrieve and the minimum similarity a document needs to be
//! considered. They are stored as JSON at `<config_dir>/lexa/settings.json`.

use color_eyre::{eyre::WrapErr, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOP_K: u32 = 8;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

pub const MIN_TOP_K: u32 = 1;
pub const MAX_TOP_K: u32 = 50;

const SETTINGS_DIR: &str = "lexa";
const SETTINGS_FILE: &str = "settings.json";

/// Retrieval parameters sent with chat and search requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of source documents to retrieve (1..=50)
    pub top_k: u32,
    /// Minimum similarity of a retrieved document (0.0..=1.0)
    pub similarity_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl Settings {
    /// Clamp both values into their valid ranges.
    ///
    /// A NaN threshold falls back to the default.
    pub fn clamped(self) -> Self {
        let similarity_threshold = if self.similarity_threshold.is_nan() {
            DEFAULT_SIMILARITY_THRESHOLD
        } else {
            self.similarity_threshold.clamp(0.0, 1.0)
        };
        Self {
            top_k: self.top_k.clamp(MIN_TOP_K, MAX_TOP_K),
            similarity_threshold,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self.clamped()
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self.clamped()
    }
}

/// Reads and writes `Settings` at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform config directory.
    ///
    /// Returns `None` when the platform has no config directory.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::at(dir.join(SETTINGS_DIR).join(SETTINGS_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing, unreadable or corrupt file yields defaults.
    pub fn load(&self) -> Settings {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return Settings::default(),
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                tracing::warn!("Ignoring corrupt settings file {:?}: {}", self.path, e);
                Settings::default()
            }
        }
    }

    /// Persist settings, creating the parent directory if needed.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err(format!("Failed to create settings directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(&settings.clamped())
            .wrap_err("Failed to serialize settings")?;
        fs::write(&self.path, json)
            .wrap_err(format!("Failed to write settings to {:?}", self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.top_k, 8);
        assert!((settings.similarity_threshold - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamping() {
        let settings = Settings {
            top_k: 0,
            similarity_threshold: 1.5,
        }
        .clamped();
        assert_eq!(settings.top_k, 1);
        assert_eq!(settings.similarity_threshold, 1.0);

        assert_eq!(Settings::default().with_top_k(500).top_k, 50);
        assert_eq!(
            Settings::default()
                .with_similarity_threshold(-0.2)
                .similarity_threshold,
            0.0
        );
        assert_eq!(
            Settings::default()
                .with_similarity_threshold(f32::NAN)
                .similarity_threshold,
            DEFAULT_SIMILARITY_THRESHOLD
        );
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::at(dir.path().join("missing.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::at(dir.path().join("nested").join(SETTINGS_FILE));

        let settings = Settings::default().with_top_k(12).with_similarity_threshold(0.55);
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SettingsStore::at(&path).load(), Settings::default());
    }

    #[test]
    fn test_out_of_range_file_is_clamped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{"top_k": 99}"#).unwrap();

        let settings = SettingsStore::at(&path).load();
        assert_eq!(settings.top_k, 50);
        assert_eq!(settings.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
    }
}
