//! Simulation settings and drop presets
//!
//! Stored as JSON next to the binary (or wherever `--config` points).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Axis, SimError};
use crate::sim::SimulationParameters;
use crate::sim::engine::check_range;

/// Quick-drop batch sizes offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPreset {
    One,
    Five,
    Ten,
    Fifty,
    Hundred,
    FiveHundred,
    Thousand,
    FiveThousand,
}

impl DropPreset {
    /// Every preset, smallest first
    pub const ALL: [DropPreset; 8] = [
        DropPreset::One,
        DropPreset::Five,
        DropPreset::Ten,
        DropPreset::Fifty,
        DropPreset::Hundred,
        DropPreset::FiveHundred,
        DropPreset::Thousand,
        DropPreset::FiveThousand,
    ];

    /// Number of sticks dropped by this preset
    pub fn count(&self) -> u32 {
        match self {
            DropPreset::One => 1,
            DropPreset::Five => 5,
            DropPreset::Ten => 10,
            DropPreset::Fifty => 50,
            DropPreset::Hundred => 100,
            DropPreset::FiveHundred => 500,
            DropPreset::Thousand => 1000,
            DropPreset::FiveThousand => 5000,
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            DropPreset::One => "+1",
            DropPreset::Five => "+5",
            DropPreset::Ten => "+10",
            DropPreset::Fifty => "+50",
            DropPreset::Hundred => "+100",
            DropPreset::FiveHundred => "+500",
            DropPreset::Thousand => "+1K",
            DropPreset::FiveThousand => "+5K",
        }
    }

    /// Accepts a button label ("+1K"), a bare count ("1000") or either
    /// without the leading plus, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        let lower = s.to_lowercase();
        let count: u32 = match lower.strip_suffix('k') {
            Some(thousands) => thousands.parse::<u32>().ok()?.checked_mul(1000)?,
            None => lower.parse().ok()?,
        };
        Self::ALL.into_iter().find(|p| p.count() == count)
    }
}

/// Errors raised while loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] SimError),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Distance between ruled lines
    pub line_spacing: f64,
    /// Length of each stick
    pub stick_length: f64,

    // === Drop area ===
    /// Bounds for stick centers along x
    pub x_range: (f64, f64),
    /// Bounds for stick centers along y
    pub y_range: (f64, f64),

    /// Fixed RNG seed; a fresh one is picked per run when absent
    pub seed: Option<u64>,

    /// Batches run when no explicit drops are requested
    pub presets: Vec<DropPreset>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
            stick_length: DEFAULT_STICK_LENGTH,
            x_range: DEFAULT_X_RANGE,
            y_range: DEFAULT_Y_RANGE,
            seed: None,
            presets: DropPreset::ALL.to_vec(),
        }
    }
}

impl Settings {
    /// Stick and line dimensions as validated simulation parameters
    pub fn parameters(&self) -> Result<SimulationParameters, SimError> {
        SimulationParameters::new(self.line_spacing, self.stick_length)
    }

    /// Check every value a simulation run would reject
    pub fn validate(&self) -> Result<(), SimError> {
        self.parameters()?;
        check_range(Axis::X, self.x_range)?;
        check_range(Axis::Y, self.y_range)?;
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
