//! URL template substitution.
//!
//! Templates contain `{identifier}` placeholders where an identifier is one or
//! more ASCII letters, digits or underscores. Each placeholder is handed to a
//! resolver callback and replaced by whatever it returns. Empty braces,
//! unterminated braces and braces around anything else are copied verbatim.
//! So is a placeholder with another brace directly against it (`{{z}}`,
//! `{z}}`): only the whole span is ever replaced, never the inner part.
//!
//! ```
//! use rastertile::template::substitute;
//!
//! let url = substitute("https://tile.example/{z}/{x}/{y}.png", |key| match key {
//!     "z" => "3".to_string(),
//!     "x" => "5".to_string(),
//!     "y" => "2".to_string(),
//!     other => other.to_string(),
//! });
//! assert_eq!(url, "https://tile.example/3/5/2.png");
//! ```

mod padding;
mod subdomain;

pub use padding::ZeroPadding;
pub use subdomain::{shard_index, Subdomains};

use std::convert::Infallible;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Placeholder pattern: `{` + identifier + `}`.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Placeholder spans and identifiers that are not touching another brace.
fn standalone_placeholders(template: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    let bytes = template.as_bytes();
    placeholder_pattern()
        .captures_iter(template)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let key = captures.get(1)?;
            Some((whole.range(), key.as_str()))
        })
        .filter(move |(span, _)| {
            let opened = span.start > 0 && bytes[span.start - 1] == b'{';
            let closed = bytes.get(span.end) == Some(&b'}');
            !opened && !closed
        })
}

/// Replaces every placeholder using a fallible resolver.
///
/// Placeholders are visited left to right and the first error aborts the
/// substitution. Replacement text is never scanned again.
pub fn try_substitute<F, E>(template: &str, mut resolve: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut output = String::with_capacity(template.len() + 16);
    let mut last = 0;

    for (span, key) in standalone_placeholders(template) {
        output.push_str(&template[last..span.start]);
        output.push_str(&resolve(key)?);
        last = span.end;
    }
    output.push_str(&template[last..]);

    Ok(output)
}

/// Replaces every placeholder using an infallible resolver.
pub fn substitute<F>(template: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> String,
{
    match try_substitute::<_, Infallible>(template, |key| Ok(resolve(key))) {
        Ok(output) => output,
        Err(never) => match never {},
    }
}

/// Lists the placeholder identifiers in a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    standalone_placeholders(template).map(|(_, key)| key).collect()
}

/// Returns true if the template contains `{key}`, compared ASCII case-insensitively.
pub fn has_placeholder(template: &str, key: &str) -> bool {
    placeholders(template)
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(key))
}
