//! Subdomain sharding for the `{s}` placeholder.

use crate::coord::TileCoord;

/// Deterministic shard for a tile: `(level + x + y) mod count`.
///
/// Computed in 64 bits so large coordinates cannot overflow. `count` must be
/// non-zero.
#[inline]
pub fn shard_index(tile: &TileCoord, count: usize) -> usize {
    let sum = u64::from(tile.level) + u64::from(tile.x) + u64::from(tile.y);
    (sum % count as u64) as usize
}

/// Ordered list of subdomains that `{s}` rotates through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subdomains(Vec<String>);

impl Subdomains {
    pub fn new<I, S>(subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(subdomains.into_iter().map(Into::into).collect())
    }

    /// Parses `a,b,c`, or a bare `abc` meaning one subdomain per character.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.contains(',') {
            Self::new(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty()),
            )
        } else {
            Self::new(value.chars().filter(|c| !c.is_whitespace()).map(String::from))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Picks the subdomain for a tile, or `None` when the list is empty.
    pub fn select(&self, tile: &TileCoord) -> Option<&str> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0[shard_index(tile, self.0.len())].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_rotates() {
        let subdomains = Subdomains::new(["t0", "t1", "t2"]);
        assert_eq!(subdomains.select(&TileCoord::new(0, 0, 0)), Some("t0"));
        assert_eq!(subdomains.select(&TileCoord::new(1, 0, 0)), Some("t1"));
        assert_eq!(subdomains.select(&TileCoord::new(1, 1, 0)), Some("t2"));
        assert_eq!(subdomains.select(&TileCoord::new(1, 1, 1)), Some("t0"));
    }

    #[test]
    fn test_select_empty_is_none() {
        assert_eq!(Subdomains::default().select(&TileCoord::new(3, 1, 2)), None);
    }

    #[test]
    fn test_parse_comma_list() {
        assert_eq!(
            Subdomains::parse(" t0, t1 ,,t2 "),
            Subdomains::new(["t0", "t1", "t2"])
        );
    }

    #[test]
    fn test_parse_bare_characters() {
        assert_eq!(Subdomains::parse("abc"), Subdomains::new(["a", "b", "c"]));
        assert!(Subdomains::parse("").is_empty());
    }

    #[test]
    fn test_no_overflow_at_large_coordinates() {
        let tile = TileCoord::new(u32::MAX, u32::MAX, u32::MAX);
        assert!(shard_index(&tile, 7) < 7);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_shard_in_range_and_deterministic(
                level in 0u32..=30,
                x in any::<u32>(),
                y in any::<u32>(),
                count in 1usize..16
            ) {
                let tile = TileCoord::new(level, x, y);
                let index = shard_index(&tile, count);
                prop_assert!(index < count);
                prop_assert_eq!(index, shard_index(&tile, count));
                prop_assert_eq!(
                    index as u64,
                    (u64::from(level) + u64::from(x) + u64::from(y)) % count as u64
                );
            }
        }
    }
}
