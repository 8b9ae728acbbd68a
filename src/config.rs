//! Planner settings, persisted as JSON in the OS config directory.
//!
//! Every field carries a default, so a partial (or absent) file is valid.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::timeline::{Granularity, DEFAULT_DAY_WIDTH, MAX_DAY_WIDTH, MIN_DAY_WIDTH};

const SETTINGS_FILE: &str = "settings.json";

/// Errors raised while reading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rendering and navigation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Pixels per calendar day.
    pub day_width: f32,
    /// Height of one lane inside an owner's row.
    pub lane_height: f32,
    /// Extra vertical space per row.
    pub row_padding: f32,
    /// Initial paging unit.
    pub granularity: Granularity,
    /// Days added on each side when fitting the window to the tasks.
    pub fit_padding_days: i64,
    /// Overrides the build-mode default log level.
    pub log_level: Option<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            day_width: DEFAULT_DAY_WIDTH,
            lane_height: 30.0,
            row_padding: 8.0,
            granularity: Granularity::Week,
            fit_padding_days: 4,
            log_level: None,
        }
    }
}

impl PlannerSettings {
    /// Location of the settings file, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "TimelinePlanner")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(".").join(SETTINGS_FILE))
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let settings: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings.validated())
    }

    /// Clamp values into their usable ranges.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        self.day_width = if self.day_width.is_finite() {
            self.day_width.clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH)
        } else {
            defaults.day_width
        };
        if !(self.lane_height.is_finite() && self.lane_height > 0.0) {
            self.lane_height = defaults.lane_height;
        }
        if !(self.row_padding.is_finite() && self.row_padding >= 0.0) {
            self.row_padding = defaults.row_padding;
        }
        self.fit_padding_days = self.fit_padding_days.max(0);
        self
    }
}
