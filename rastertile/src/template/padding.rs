//! Zero padding of numeric placeholder values.

use std::collections::HashMap;

/// Per-placeholder zero padding policy.
///
/// Each entry maps a placeholder name to a pad template such as `"0000"`.
/// Only the template's length matters: a rendered value with fewer digits is
/// left-padded with `'0'` up to that length, longer values are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZeroPadding {
    templates: HashMap<String, String>,
}

impl ZeroPadding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the pad template for a placeholder.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    pub fn template_for(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(key, template)| (key.as_str(), template.as_str()))
    }

    /// Renders `value` in decimal, padded according to the template for `key`.
    pub fn pad(&self, key: &str, value: u64) -> String {
        let rendered = value.to_string();
        match self.templates.get(key) {
            Some(template) if template.len() > rendered.len() => {
                format!("{:0>width$}", rendered, width = template.len())
            }
            _ => rendered,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ZeroPadding
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(key, template)| (key.into(), template.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_short_values() {
        let padding = ZeroPadding::new().with("x", "0000");
        assert_eq!(padding.pad("x", 7), "0007");
        assert_eq!(padding.pad("x", 123), "0123");
    }

    #[test]
    fn test_long_values_unchanged() {
        let padding = ZeroPadding::new().with("x", "00");
        assert_eq!(padding.pad("x", 12), "12");
        assert_eq!(padding.pad("x", 12345), "12345");
    }

    #[test]
    fn test_unconfigured_key_unpadded() {
        let padding = ZeroPadding::new().with("x", "0000");
        assert_eq!(padding.pad("y", 7), "7");
    }

    #[test]
    fn test_template_content_is_irrelevant() {
        let padding = ZeroPadding::new().with("z", "abc");
        assert_eq!(padding.pad("z", 4), "004");
    }

    #[test]
    fn test_from_iterator() {
        let padding: ZeroPadding = [("x", "000"), ("y", "00")].into_iter().collect();
        assert_eq!(padding.template_for("x"), Some("000"));
        assert_eq!(padding.pad("y", 3), "03");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_padded_length_and_value(width in 1usize..12, value in 0u64..1_000_000_000) {
                let padding = ZeroPadding::new().with("x", "0".repeat(width));
                let rendered = padding.pad("x", value);
                let digits = value.to_string().len();

                prop_assert_eq!(rendered.len(), width.max(digits));
                prop_assert_eq!(rendered.parse::<u64>().unwrap(), value);
            }
        }
    }
}
