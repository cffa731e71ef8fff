//! Integration tests for overlay files.
//!
//! Loads INI overlay definitions from disk and resolves tile URLs through
//! the strategies they select.
//!
//! Run with: `cargo test --test overlay_file_integration`

use std::path::PathBuf;

use tempfile::TempDir;

use rastertile::config::{ConfigFileError, OverlayConfig, SourceKind};
use rastertile::coord::{ProjectionKind, TileCoord};
use rastertile::provider::{
    create_resolver, ProviderError, RequestStyle, TileUrlResolver, WmtsResolver,
};

fn write_overlay(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("overlay.ini");
    std::fs::write(&path, content).unwrap();
    path
}

const TIANDITU_STYLE: &str = "\
[overlay]
name = imagery
type = wmts
url = https://t{s}.tiles.example/img_c/wmts
credit = Imagery provider
projection = geographic
maximum_level = 18
subdomains = 01234567

[wmts]
layer = img
style = default
tile_matrix_set = c
format = tiles
token_name = tk
token_value = 0123456789abcdef

[headers]
Referer = https://viewer.example
";

#[test]
fn test_wmts_overlay_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_overlay(&dir, TIANDITU_STYLE);

    let config = OverlayConfig::load_from(&path).unwrap();
    assert_eq!(config.source, SourceKind::Wmts);
    assert_eq!(config.maximum_level, 18);
    assert_eq!(config.headers.len(), 1);

    let context = config.projection_context();
    assert_eq!(context.projection().kind(), ProjectionKind::Geographic);
    assert_eq!(context.root_tiles_x(), 2);

    let resolver = WmtsResolver::new(&config).unwrap();
    assert_eq!(resolver.request_style(), RequestStyle::Kvp);

    // Level 3 of the geographic scheme: 16 columns, 8 rows.
    let url = resolver
        .resolve_url(&TileCoord::new(3, 10, 5), &context)
        .unwrap();
    assert_eq!(
        url,
        "https://t2.tiles.example/img_c/wmts?service=wmts&request=gettile&version=1.0.0&layer=img&style=default&tilematrixset=c&format=tiles&tilematrix=3&tilerow=2&tilecol=10&tk=0123456789abcdef"
    );
}

#[test]
fn test_template_overlay_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_overlay(
        &dir,
        "[overlay]\n\
         name = tms\n\
         url = https://tiles.example/{z}/{x}/{reverseY}.png\n\
         projection = EPSG:3857\n\
         level_bias = 1\n\
         \n\
         [zero_padding]\n\
         x = 0000\n",
    );

    let config = OverlayConfig::load_from(&path).unwrap();
    let context = config.projection_context();
    assert_eq!(context.root_tiles_x(), 1);

    let resolver = create_resolver(&config).unwrap();
    let url = resolver.resolve_url(&TileCoord::new(2, 3, 0), &context).unwrap();
    assert_eq!(url, "https://tiles.example/3/0003/3.png");
}

#[test]
fn test_unsupported_projection_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_overlay(
        &dir,
        "[overlay]\nurl = https://t/{z}/{x}/{y}\nprojection = EPSG:2056\n",
    );

    match OverlayConfig::load_from(&path) {
        Err(ConfigFileError::InvalidValue { key, value, .. }) => {
            assert_eq!(key, "projection");
            assert_eq!(value, "EPSG:2056");
        }
        other => panic!("expected invalid projection, got {:?}", other.map(|c| c.name)),
    }
}

#[test]
fn test_conflicting_y_inversion_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_overlay(
        &dir,
        "[overlay]\nurl = https://t/{z}/{x}/{reverseY}\nflip_y = true\n",
    );

    assert!(matches!(
        OverlayConfig::load_from(&path),
        Err(ConfigFileError::InvalidOverlay(ProviderError::InvalidConfig(_)))
    ));
}
