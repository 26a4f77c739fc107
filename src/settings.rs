//! Game settings and preferences
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, MAX_FRAME_GAP_MS};

/// Errors reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("play field must be positive, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },
    #[error("max frame gap must be a non-negative number of milliseconds, got {0}")]
    InvalidFrameGap(f64),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Play field width (pixels)
    pub field_width: f32,
    /// Play field height (pixels)
    pub field_height: f32,
    /// RNG seed for spawns and slices
    pub seed: u64,
    /// Frames longer than this are skipped instead of simulated
    pub max_frame_gap_ms: f64,

    // === Visual Effects ===
    /// Draw the pointer trail
    pub trail: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            seed: 0,
            max_frame_gap_ms: MAX_FRAME_GAP_MS,

            trail: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.field_width) || !valid(self.field_height) {
            return Err(SettingsError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if !self.max_frame_gap_ms.is_finite() || self.max_frame_gap_ms < 0.0 {
            return Err(SettingsError::InvalidFrameGap(self.max_frame_gap_ms));
        }
        Ok(())
    }

    /// Read settings from a JSON file
    pub fn try_load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "trail": false }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert!(!settings.trail);
        assert_eq!(settings.field_width, FIELD_WIDTH);
        assert_eq!(settings.max_frame_gap_ms, MAX_FRAME_GAP_MS);
    }

    #[test]
    fn test_rejects_empty_field() {
        let err = Settings::from_json(r#"{ "field_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidField { .. }));
    }

    #[test]
    fn test_rejects_negative_frame_gap() {
        let err = Settings::from_json(r#"{ "max_frame_gap_ms": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFrameGap(gap) if gap == -1.0));
        assert!(Settings::from_json(r#"{ "max_frame_gap_ms": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json("{ seed: "),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 7,
            field_width: 1024.0,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/pommes-ninja.json"));
        assert_eq!(settings, Settings::default());
    }
}
