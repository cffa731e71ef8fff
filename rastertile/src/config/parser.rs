//! INI parsing logic for converting `Ini` → `OverlayConfig`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::overlay::{OverlayConfig, SourceKind, WmtsOptions};
use crate::coord::{Ellipsoid, ProjectionKind, QuadtreeTilingScheme, Rectangle};
use crate::template::{Subdomains, ZeroPadding};

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Non-empty, trimmed value of `key`.
fn text<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match text(section, key) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| invalid(section_name, key, v, reason)),
        None => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn parse_floats(value: &str) -> Option<Vec<f64>> {
    value
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect()
}

fn parse_rectangle(section: &str, key: &str, value: &str) -> Result<Rectangle, ConfigFileError> {
    let reason = "expected 'min_x,min_y,max_x,max_y'";
    match parse_floats(value).as_deref() {
        Some(&[minimum_x, minimum_y, maximum_x, maximum_y]) => {
            if minimum_x > maximum_x || minimum_y > maximum_y {
                return Err(invalid(section, key, value, "minimum exceeds maximum"));
            }
            Ok(Rectangle::new(minimum_x, minimum_y, maximum_x, maximum_y))
        }
        _ => Err(invalid(section, key, value, reason)),
    }
}

fn parse_ellipsoid(value: &str) -> Result<Ellipsoid, ConfigFileError> {
    if value.eq_ignore_ascii_case("wgs84") {
        return Ok(Ellipsoid::WGS84);
    }
    match parse_floats(value).as_deref() {
        Some(&[a, b, c]) if a > 0.0 && b > 0.0 && c > 0.0 => Ok(Ellipsoid::new(a, b, c)),
        _ => Err(invalid(
            "overlay",
            "ellipsoid",
            value,
            "expected 'wgs84' or three positive radii 'a,b,c'",
        )),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an `Ini` object into an `OverlayConfig`.
///
/// Starts from `OverlayConfig::default()` and overlays any values found in
/// the INI. The result is validated before it is returned.
pub(super) fn parse_ini(ini: &Ini) -> Result<OverlayConfig, ConfigFileError> {
    let mut config = OverlayConfig::default();
    let mut ellipsoid = None;
    let mut projection_kind = None;

    // [overlay] section
    if let Some(section) = ini.section(Some("overlay")) {
        if let Some(v) = text(section, "name") {
            config.name = v.to_string();
        }
        if let Some(v) = text(section, "type") {
            config.source = v
                .parse::<SourceKind>()
                .map_err(|reason| invalid("overlay", "type", v, reason))?;
        }
        if let Some(v) = text(section, "url") {
            config.url = v.to_string();
        }
        if let Some(v) = text(section, "credit") {
            config.credit = Some(v.to_string());
        }
        if let Some(v) = text(section, "projection") {
            let kind = v
                .parse::<ProjectionKind>()
                .map_err(|e| invalid("overlay", "projection", v, e.to_string()))?;
            projection_kind = Some(kind);
        }
        if let Some(v) = text(section, "ellipsoid") {
            ellipsoid = Some(parse_ellipsoid(v)?);
        }
        if let Some(v) = text(section, "coverage_rectangle") {
            config.coverage_rectangle = Some(parse_rectangle("overlay", "coverage_rectangle", v)?);
        }
        if let Some(v) = parse_number(section, "overlay", "tile_width", "expected pixel count")? {
            config.tile_width = v;
        }
        if let Some(v) = parse_number(section, "overlay", "tile_height", "expected pixel count")? {
            config.tile_height = v;
        }
        if let Some(v) = parse_number(section, "overlay", "minimum_level", "expected level number")? {
            config.minimum_level = v;
        }
        if let Some(v) = parse_number(section, "overlay", "maximum_level", "expected level number")? {
            config.maximum_level = v;
        }
        if let Some(v) = parse_number(section, "overlay", "level_bias", "expected signed integer")? {
            config.level_bias = v;
        }
        if let Some(v) = text(section, "subdomains") {
            config.subdomains = Subdomains::parse(v);
        }
        if let Some(v) = text(section, "tile_matrix_labels") {
            config.tile_matrix_labels = parse_list(v);
        }
        if let Some(v) = text(section, "flip_y") {
            config.flip_y = parse_bool(v)
                .ok_or_else(|| invalid("overlay", "flip_y", v, "expected true or false"))?;
        }
    }

    if let Some(kind) = projection_kind {
        config.projection = Some(kind.with_ellipsoid(ellipsoid.unwrap_or_default()));
    } else {
        config.ellipsoid = ellipsoid;
    }

    // [tiling_scheme] section
    if let Some(section) = ini.section(Some("tiling_scheme")) {
        let value = text(section, "rectangle").ok_or_else(|| {
            invalid(
                "tiling_scheme",
                "rectangle",
                "",
                "a tiling scheme needs a rectangle",
            )
        })?;
        let rectangle = parse_rectangle("tiling_scheme", "rectangle", value)?;
        let root_tiles_x: u32 = parse_number(section, "tiling_scheme", "root_tiles_x", "expected tile count")?
            .unwrap_or(1);
        let root_tiles_y: u32 = parse_number(section, "tiling_scheme", "root_tiles_y", "expected tile count")?
            .unwrap_or(1);
        config.tiling_scheme = Some(QuadtreeTilingScheme::new(
            rectangle,
            root_tiles_x,
            root_tiles_y,
        ));
    }

    // [wmts] section
    if let Some(section) = ini.section(Some("wmts")) {
        let field = |key: &str| text(section, key).map(str::to_string);
        config.wmts = WmtsOptions {
            layer: field("layer"),
            style: field("style"),
            tile_matrix_set: field("tile_matrix_set"),
            format: field("format"),
            version: field("version"),
            token_name: field("token_name"),
            token_value: field("token_value"),
        };
    }

    // [zero_padding] section
    if let Some(section) = ini.section(Some("zero_padding")) {
        let mut padding = ZeroPadding::new();
        for (key, template) in section.iter() {
            let template = template.trim();
            if template.is_empty() {
                return Err(invalid("zero_padding", key, template, "pad template is empty"));
            }
            padding.insert(key.trim(), template);
        }
        config.zero_padding = padding;
    }

    // [headers] section
    if let Some(section) = ini.section(Some("headers")) {
        config.headers = section
            .iter()
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();
    }

    config.validate()?;

    Ok(config)
}
