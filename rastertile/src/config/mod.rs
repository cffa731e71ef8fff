//! Overlay configuration
//!
//! Typed [`OverlayConfig`] built with `with_*` methods or loaded from an INI
//! file such as:
//!
//! ```ini
//! [overlay]
//! type = wmts
//! url = https://t{s}.tiles.example/img_c/wmts
//! projection = geographic
//! subdomains = 01234567
//!
//! [wmts]
//! layer = img
//! tile_matrix_set = c
//! ```

pub mod defaults;
mod file;
mod overlay;
mod parser;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use overlay::{OverlayConfig, SourceKind, WmtsOptions, WmtsParameters};
