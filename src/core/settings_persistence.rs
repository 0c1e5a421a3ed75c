//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file so preferences
//! survive across sessions.
//!
//! # File Location
//!
//! `settings.json` in the user's configuration directory, resolved with
//! `directories::ProjectDirs`. Falls back to the working directory when the
//! platform has no config directory.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings; the returned
//!   [`SettingsSource`] carries the warning for the caller to log
//! - Save failures are returned to the caller

use crate::core::error::CoreResult;
use crate::core::GameSettings;
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "boardside", "boardside") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Where a set of loaded settings came from
///
/// Loading usually happens before logging is up, so the outcome is returned
/// and reported with [`SettingsSource::log`] once a subscriber exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// Parsed from the file
    File(PathBuf),
    /// No file yet; defaults
    Missing(PathBuf),
    /// The file exists but could not be read; defaults
    Unreadable { path: PathBuf, reason: String },
    /// The file is not valid settings JSON; defaults
    Malformed { path: PathBuf, reason: String },
}

impl SettingsSource {
    /// True when defaults replaced a file that should have been used
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            SettingsSource::Unreadable { .. } | SettingsSource::Malformed { .. }
        )
    }

    /// Report the outcome: info for normal loads, warn for fallbacks
    pub fn log(&self) {
        if self.is_fallback() {
            warn!("[SETTINGS] {}", self);
        } else {
            info!("[SETTINGS] {}", self);
        }
    }
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::File(path) => write!(f, "Loaded settings from {:?}", path),
            SettingsSource::Missing(path) => {
                write!(f, "No settings file found at {:?}. Using defaults.", path)
            }
            SettingsSource::Unreadable { path, reason } => write!(
                f,
                "Failed to read settings file at {:?}: {}. Using defaults.",
                path, reason
            ),
            SettingsSource::Malformed { path, reason } => write!(
                f,
                "Failed to parse settings file at {:?}: {}. Using defaults.",
                path, reason
            ),
        }
    }
}

/// Settings plus where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: GameSettings,
    pub source: SettingsSource,
}

impl LoadedSettings {
    fn defaults(source: SettingsSource) -> Self {
        Self {
            settings: GameSettings::default(),
            source,
        }
    }
}

/// Load settings from the default location
pub fn load_settings() -> LoadedSettings {
    load_settings_from(&settings_path())
}

/// Load settings from a file, falling back to defaults
pub fn load_settings_from(settings_path: &Path) -> LoadedSettings {
    let path = settings_path.to_path_buf();
    if !settings_path.exists() {
        return LoadedSettings::defaults(SettingsSource::Missing(path));
    }

    let contents = match fs::read_to_string(settings_path) {
        Ok(contents) => contents,
        Err(e) => {
            return LoadedSettings::defaults(SettingsSource::Unreadable {
                path,
                reason: e.to_string(),
            })
        }
    };

    match serde_json::from_str::<GameSettings>(&contents) {
        Ok(settings) => LoadedSettings {
            settings: settings.sanitized(),
            source: SettingsSource::File(path),
        },
        Err(e) => LoadedSettings::defaults(SettingsSource::Malformed {
            path,
            reason: e.to_string(),
        }),
    }
}

/// Save settings to the default location
pub fn save_settings(settings: &GameSettings) -> CoreResult<PathBuf> {
    let path = settings_path();
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// Save settings to a file, creating its directory
pub fn save_settings_to(settings_path: &Path, settings: &GameSettings) -> CoreResult<()> {
    if let Some(parent) = settings_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(settings_path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", settings_path);
    Ok(())
}
