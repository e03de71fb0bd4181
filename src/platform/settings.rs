//! Persisted widget settings.
//!
//! Stores the last window position and volume in a small JSON file in the
//! user's home directory. Reading never fails hard: anything missing or
//! malformed behaves like a first run.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::audio::MAX_VOLUME;

/// Last known window position and volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSettings {
    /// Window left edge in screen points
    #[serde(default, deserialize_with = "lenient")]
    pub window_x: Option<i32>,

    /// Window top edge in screen points
    #[serde(default, deserialize_with = "lenient")]
    pub window_y: Option<i32>,

    /// Master volume (0-100)
    #[serde(default, deserialize_with = "lenient")]
    pub volume: Option<u8>,
}

impl PersistedSettings {
    /// Saved window position, only when both coordinates are present.
    pub fn window_position(&self) -> Option<(i32, i32)> {
        self.window_x.zip(self.window_y)
    }

    fn sanitized(mut self) -> Self {
        self.volume = self.volume.filter(|v| *v <= MAX_VOLUME);
        self
    }
}

/// Treat a key holding the wrong type as absent instead of rejecting the file.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Settings store error types.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No home directory to store settings in")]
    NoHomeDirectory,

    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-based settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    const FILE_NAME: &'static str = ".volume_control_settings.json";

    /// Store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store in the user's home directory, or a disabled store if there is none.
    pub fn at_default_location() -> Self {
        match Self::default_path() {
            Some(path) => Self::new(path),
            None => {
                warn!("no home directory, settings will not be persisted");
                Self { path: None }
            }
        }
    }

    fn default_path() -> Option<PathBuf> {
        let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
        std::env::var_os(var)
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(Self::FILE_NAME))
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load settings, treating a missing file as a first run.
    pub fn try_load(&self) -> Result<PersistedSettings, SettingsError> {
        let path = self.path.as_ref().ok_or(SettingsError::NoHomeDirectory)?;

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(PersistedSettings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };

        let settings: PersistedSettings = serde_json::from_str(&text)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults on any error.
    pub fn load(&self) -> PersistedSettings {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load settings, using defaults");
            PersistedSettings::default()
        })
    }

    /// Write settings, creating the parent directory if needed.
    pub fn try_save(&self, settings: &PersistedSettings) -> Result<(), SettingsError> {
        let path = self.path.as_ref().ok_or(SettingsError::NoHomeDirectory)?;
        let io_err = |source| SettingsError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(path, json).map_err(io_err)?;

        debug!(path = %path.display(), ?settings, "settings saved");
        Ok(())
    }

    /// Write settings, logging instead of returning any failure.
    pub fn save(&self, settings: &PersistedSettings) -> bool {
        match self.try_save(settings) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save settings");
                false
            }
        }
    }
}
