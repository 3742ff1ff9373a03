use std::fmt;

/// Versioned bundle identifier: `[fragment/]language-hash.json`.
///
/// Doubles as the cache key and the relative download path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint for a language's bundle.
    pub fn new(fragment: Option<&str>, language: &str, hash: &str) -> Self {
        let value = match fragment {
            Some(fragment) if !fragment.is_empty() => {
                format!("{fragment}/{language}-{hash}.json")
            }
            _ => format!("{language}-{hash}.json"),
        };
        Self(value)
    }

    /// The fingerprint string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
