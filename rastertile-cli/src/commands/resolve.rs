//! Resolve command - print the request URL for one tile.

use rastertile::provider::{check_level, create_resolver};

use super::common::{load_config, TileArgs};
use crate::error::CliError;

/// Run the resolve command.
pub fn run(args: TileArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let context = config.projection_context();
    let tile = args.tile(&context)?;
    check_level(&tile)?;

    let resolver = create_resolver(&config)?;
    let url = resolver.resolve_url(&tile, &context)?;

    tracing::debug!(tile = %tile, "Resolved tile");
    println!("{}", url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastertile::provider::ProviderError;
    use tempfile::TempDir;

    fn tile_args(dir: &TempDir, level: u32) -> TileArgs {
        let path = dir.path().join("overlay.ini");
        std::fs::write(&path, "[overlay]\nurl = https://t/{z}/{x}/{y}.png\n").unwrap();
        TileArgs {
            config: Some(path),
            level,
            x: Some(0),
            y: Some(0),
            lon: None,
            lat: None,
        }
    }

    #[test]
    fn test_resolve_supported_level() {
        let dir = TempDir::new().unwrap();
        assert!(run(tile_args(&dir, 2)).is_ok());
    }

    #[test]
    fn test_resolve_rejects_level_beyond_maximum() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            run(tile_args(&dir, 31)),
            Err(CliError::Provider(ProviderError::TileOutOfRange { .. }))
        ));
    }
}
