//! Info command - describe how an overlay file will be served.

use std::path::PathBuf;

use rastertile::config::{OverlayConfig, SourceKind};
use rastertile::provider::{create_resolver, RequestStyle};

use super::common::load_config;
use crate::error::CliError;

/// Arguments for the info command.
pub struct InfoArgs {
    pub config: Option<PathBuf>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    // Surface construction errors here rather than on the first tile.
    create_resolver(&config)?;

    for line in describe(&config) {
        println!("{}", line);
    }
    Ok(())
}

/// Human-readable summary lines for an overlay.
fn describe(config: &OverlayConfig) -> Vec<String> {
    let context = config.projection_context();
    let scheme = context.tiling_scheme();

    let strategy = match config.source {
        SourceKind::UrlTemplate => "url_template".to_string(),
        SourceKind::Wmts => format!("wmts ({})", RequestStyle::detect(&config.url)),
    };

    let mut lines = vec![
        format!("Overlay:         {}", config.name),
        format!("Strategy:        {}", strategy),
        format!("URL:             {}", config.url),
        format!("Projection:      {}", context.projection().kind()),
        format!("Root columns:    {}", context.root_tiles_x()),
        format!(
            "Tiling scheme:   {} ({}x{} root tiles)",
            scheme.rectangle(),
            scheme.root_tiles_x(),
            scheme.root_tiles_y()
        ),
        format!("Coverage:        {}", context.coverage_rectangle()),
        format!(
            "Levels:          {}-{} (bias {})",
            config.minimum_level, config.maximum_level, config.level_bias
        ),
        format!("Tile size:       {}x{}", config.tile_width, config.tile_height),
    ];

    if !config.subdomains.is_empty() {
        lines.push(format!(
            "Subdomains:      {}",
            config.subdomains.as_slice().join(", ")
        ));
    }
    if !config.tile_matrix_labels.is_empty() {
        lines.push(format!(
            "Matrix labels:   {} ({} levels)",
            config.tile_matrix_labels.join(", "),
            config.tile_matrix_labels.len()
        ));
    }
    if config.source == SourceKind::Wmts {
        let p = config.wmts.normalized();
        lines.push(format!(
            "WMTS:            layer={} style={} set={} format={} version={}",
            p.layer, p.style, p.tile_matrix_set, p.format, p.version
        ));
        if let Some((name, _)) = p.token {
            lines.push(format!("Token parameter: {}", name));
        }
    }
    if config.flip_y {
        lines.push("Flip Y:          yes".to_string());
    }
    if !config.headers.is_empty() {
        let names: Vec<&str> = config.headers.iter().map(|(n, _)| n.as_str()).collect();
        lines.push(format!("Headers:         {}", names.join(", ")));
    }
    if let Some(credit) = &config.credit {
        lines.push(format!("Credit:          {}", credit));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastertile::template::Subdomains;

    #[test]
    fn test_describe_wmts() {
        let config = OverlayConfig::wmts("tianditu", "https://t{s}.example/img_c/wmts")
            .with_subdomains(Subdomains::parse("01"))
            .with_credit("Tianditu");
        let lines = describe(&config);

        assert!(lines.contains(&"Strategy:        wmts (kvp)".to_string()));
        assert!(lines.contains(&"Projection:      geographic".to_string()));
        assert!(lines.contains(&"Root columns:    2".to_string()));
        assert!(lines.contains(&"Subdomains:      0, 1".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.contains("layer=img style=default set=c format=tiles version=1.0.0")));
        assert_eq!(lines.last().unwrap(), "Credit:          Tianditu");
    }

    #[test]
    fn test_describe_template_hides_header_values() {
        let config = OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}")
            .with_header("Authorization", "Bearer secret");
        let lines = describe(&config);

        assert!(lines.contains(&"Strategy:        url_template".to_string()));
        assert!(lines.contains(&"Headers:         Authorization".to_string()));
        assert!(!lines.iter().any(|l| l.contains("secret")));
    }
}
