//! Settings file: chart configuration, canvas geometry and runtime options.
//!
//! Stored as pretty JSON at `<config dir>/livechart/settings.json`. Missing or
//! unreadable files fall back to defaults; an unknown theme or chart type name
//! only resets that one field.

use crate::geometry::Geometry;
use crate::models::ChartConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chart: ChartConfig,
    pub canvas: Geometry,
    /// Fixed RNG seed for reproducible sample streams.
    pub seed: Option<u64>,
    /// Locale tag for stats formatting (`en`, `de`, ...).
    pub locale: String,
    /// TTF used for bitmap axis labels.
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            canvas: Geometry::default(),
            seed: None,
            locale: "en".to_string(),
            font_path: None,
        }
    }
}

/// Get or create the config directory (`~/.config/livechart/` on Linux).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("livechart");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Path to the settings file.
pub fn settings_path() -> Option<PathBuf> {
    Some(config_dir()?.join("settings.json"))
}

/// Read settings from `path`, failing on I/O, parse or validation errors.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&text)
        .with_context(|| format!("parsing settings {}", path.display()))?;
    settings.chart.validate()?;
    settings.canvas.validate()?;
    Ok(settings)
}

/// Write settings as pretty JSON.
pub fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    let text = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, text).with_context(|| format!("writing settings {}", path.display()))
}

/// Load settings from `path` (or the default location), returning defaults if the
/// file doesn't exist or is invalid. A missing default file is created.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path.map(Path::to_path_buf).or_else(settings_path) {
        Some(p) => p,
        None => return Settings::default(),
    };
    if !path.exists() {
        let settings = Settings::default();
        if let Err(e) = write_settings(&path, &settings) {
            log::debug!("could not write default settings: {e:#}");
        }
        return settings;
    }
    read_settings(&path).unwrap_or_else(|e| {
        log::warn!("{e:#}; using default settings");
        Settings::default()
    })
}
