//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use rastertile::config::ConfigFileError;
use rastertile::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Overlay file could not be loaded
    Config(ConfigFileError),
    /// Overlay could not be turned into a provider, or a tile has no URL
    Provider(ProviderError),
    /// Longitude/latitude outside the overlay's tiling scheme
    Position { lon: f64, lat: f64, level: u32 },
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// The tile request completed without an image
    TileFailed(Vec<String>),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
    /// Failed to encode JSON output
    Json(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Config(ConfigFileError::NotFound(_)) => {
                eprintln!();
                eprintln!("Pass an overlay file with --config, or create the default one at:");
                eprintln!("  {}", rastertile::config::config_file_path().display());
            }
            CliError::Provider(ProviderError::MissingSubdomains { .. }) => {
                eprintln!();
                eprintln!("Add the subdomains to the [overlay] section, e.g.:");
                eprintln!("  subdomains = a,b,c");
            }
            CliError::Provider(ProviderError::MissingTileMatrixLabel { .. }) => {
                eprintln!();
                eprintln!("tile_matrix_labels needs one entry per level up to the requested one,");
                eprintln!("or remove it to use numeric tile matrix identifiers.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Provider(e) => write!(f, "{}", e),
            CliError::Position { lon, lat, level } => write!(
                f,
                "Position {}, {} is outside the overlay's tiling scheme at level {}",
                lon, lat, level
            ),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::TileFailed(errors) => {
                write!(f, "Tile could not be loaded: {}", errors.join("; "))
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Json(e) => write!(f, "Failed to encode JSON: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
