//! User preferences
//!
//! Loaded once at startup from an optional JSON file in the working
//! directory. Anything missing or malformed falls back to defaults; the
//! engine never writes the file back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active difficulty profile
    pub difficulty: Difficulty,
    /// Whether the host should play capture/flee sounds
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &'static str = "nigeru.json";

    /// Load settings from the default config file, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::CONFIG_FILE))
    }

    /// Load settings from a specific path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Normal);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/nigeru.json"));
        assert_eq!(settings.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"hard"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(settings.sound_enabled);
    }
}
