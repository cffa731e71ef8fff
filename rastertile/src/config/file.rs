//! Overlay file handling for ~/.rastertile/overlay.ini.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::overlay::OverlayConfig;
use crate::provider::ProviderError;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The overlay file does not exist
    #[error("Overlay file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read or parse the file
    #[error("Failed to read overlay file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Values parse individually but do not form a usable overlay
    #[error("Invalid overlay: {0}")]
    InvalidOverlay(#[from] ProviderError),
}

impl OverlayConfig {
    /// Load the overlay from the default path (~/.rastertile/overlay.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load the overlay from a specific path.
    ///
    /// Unlike most settings files an overlay has no usable defaults (there is
    /// no URL), so a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Err(ConfigFileError::NotFound(path.to_path_buf()));
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse an overlay from INI text.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| ConfigFileError::ReadError(ini::Error::Parse(e)))?;
        super::parser::parse_ini(&ini)
    }
}

/// Get the path to the config directory (~/.rastertile).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the path to the overlay file (~/.rastertile/overlay.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}
