/// Application settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/filter-front/settings.json
/// - macOS: ~/Library/Application Support/filter-front/settings.json
/// - Windows: %APPDATA%\filter-front\settings.json
///
/// `FILTER_FRONT_SETTINGS` points at a different file. Every field is optional.
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "FILTER_FRONT_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// File the external program writes on success, relative to `working_dir`
    pub output_artifact: PathBuf,
    /// Directory the external program runs in (current directory when unset)
    pub working_dir: Option<PathBuf>,
    /// Inset in pixels between the display area and the preview bounding box
    pub preview_margin: u32,
    /// Kill the external program after this many seconds (no limit when unset)
    pub timeout_secs: Option<u64>,
    /// Parameter text the selection starts with
    pub default_parameter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_artifact: PathBuf::from("output.bmp"),
            working_dir: None,
            preview_margin: 20,
            timeout_secs: None,
            default_parameter: String::from("128"),
        }
    }
}

impl Settings {
    /// Load settings from the override or default location.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the settings file, honoring `FILTER_FRONT_SETTINGS`
    pub fn settings_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()?;
        path.push("filter-front");
        path.push("settings.json");
        Some(path)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Directory the external program runs in
    pub fn resolve_working_dir(&self) -> io::Result<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Where the output artifact is expected after a run in `working_dir`
    pub fn artifact_path(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.output_artifact)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
