//! `opgraph` settings.
//!
//! Settings come from `opgraph.toml` and environment variables.
//!
//! # Priority (highest to lowest)
//!
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables (`OPGRAPH_*`, e.g. `OPGRAPH_DATA_DIR`)
//! 3. Settings file (`opgraph.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::graph::TraversalScope;
use crate::scheme::SchemeGrammar;

/// Default settings file name.
pub const SETTINGS_FILE: &str = "opgraph.toml";

/// Settings errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to parse settings.
    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    /// Invalid settings value.
    #[error("Invalid settings value for '{key}': {message}")]
    InvalidValue {
        /// Settings key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// How scheme tokens name operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarKind {
    /// 1-based indices into the plan's operation list (default).
    #[default]
    Indexed,
    /// Operation ids written out.
    Literal,
}

impl GrammarKind {
    /// Builds the scheme grammar for a plan's operation ids.
    #[must_use]
    pub fn grammar(self, ids: Vec<String>) -> SchemeGrammar {
        match self {
            Self::Indexed => SchemeGrammar::Indexed { ids },
            Self::Literal => SchemeGrammar::Literal,
        }
    }
}

/// Data section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory searched for plan files.
    pub dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Scheme section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeSettings {
    /// Token form accepted in schemes.
    pub grammar: GrammarKind,
}

/// Traversal section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Which nodes a run starts from.
    pub scope: TraversalScope,
}

/// Results section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSettings {
    /// Directory for result logs (empty = the plan's data directory).
    pub dir: PathBuf,
}

/// Main `opgraph` settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Data settings.
    pub data: DataSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Scheme settings.
    pub scheme: SchemeSettings,
    /// Traversal settings.
    pub traversal: TraversalSettings,
    /// Results settings.
    pub results: ResultsSettings,
}

impl Settings {
    /// Loads settings from `opgraph.toml` in the working directory.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_path(SETTINGS_FILE)
    }

    /// Loads settings from a specific file path. A missing file is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("OPGRAPH_").split("_"))
            .extract()
            .map_err(|e| SettingsError::ParseError(e.to_string()))
    }

    /// Creates settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, SettingsError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .map_err(|e| SettingsError::ParseError(e.to_string()))
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is invalid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.data.dir.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue {
                key: "data.dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(SettingsError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Returns the directory result logs go to for a plan stored in
    /// `plan_dir`.
    #[must_use]
    pub fn results_dir(&self, plan_dir: &Path) -> PathBuf {
        if self.results.dir.as_os_str().is_empty() {
            plan_dir.to_path_buf()
        } else {
            self.results.dir.clone()
        }
    }

    /// Serializes the settings to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::ParseError(e.to_string()))
    }
}
