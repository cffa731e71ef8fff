//! Default values for overlay configuration.

/// Default tile width in pixels.
pub const DEFAULT_TILE_WIDTH: u32 = 256;

/// Default tile height in pixels.
pub const DEFAULT_TILE_HEIGHT: u32 = 256;

/// Default minimum level of detail.
pub const DEFAULT_MINIMUM_LEVEL: u32 = 0;

/// Default maximum level of detail.
pub const DEFAULT_MAXIMUM_LEVEL: u32 = 25;

/// Default level bias.
pub const DEFAULT_LEVEL_BIAS: i32 = 0;

/// WMTS version used when none (or an empty one) is configured.
pub const DEFAULT_WMTS_VERSION: &str = "1.0.0";

/// WMTS style used when none (or an empty one) is configured.
pub const DEFAULT_WMTS_STYLE: &str = "default";

/// WMTS format used when none (or an empty one) is configured.
pub const DEFAULT_WMTS_FORMAT: &str = "tiles";

/// WMTS layer used when none is configured.
pub const DEFAULT_WMTS_LAYER: &str = "img";

/// WMTS tile matrix set used when none is configured.
pub const DEFAULT_WMTS_TILE_MATRIX_SET: &str = "c";

/// Overlay name used when the config file has none.
pub const DEFAULT_OVERLAY_NAME: &str = "overlay";

/// Default config directory name under the user's home directory.
pub const CONFIG_DIR_NAME: &str = ".rastertile";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "overlay.ini";
