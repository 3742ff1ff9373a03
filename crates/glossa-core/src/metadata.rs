//! Supported-language reference data.
//!
//! The metadata table maps each supported language code to the content
//! fingerprint of its translation bundle. It is produced by the build that
//! publishes the bundles and loaded once at startup; everything here treats
//! it as read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GlossaError;

/// The default language. Must always be present in the metadata table;
/// resolution and fetching fall back to it.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Per-language reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageMeta {
    /// Content fingerprint of the language's translation bundle.
    pub hash: String,
    /// Display name in the language itself.
    #[serde(rename = "nativeName", skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    /// Whether the language is written right-to-left.
    #[serde(default, rename = "isRTL")]
    pub rtl: bool,
}

/// Map of supported language codes to their metadata.
///
/// Keys are kept sorted so case-insensitive scans always resolve the same
/// way regardless of source ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationMetadata {
    languages: BTreeMap<String, LanguageMeta>,
}

impl TranslationMetadata {
    /// Parse the metadata table from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, GlossaError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load the metadata table from a JSON file.
    pub fn load(path: &str) -> Result<Self, GlossaError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GlossaError::Config(format!("failed to read {path}: {e}")))?;
        Self::from_json_str(&content)
    }

    /// Look up a language code.
    pub fn get(&self, code: &str) -> Option<&LanguageMeta> {
        self.languages.get(code)
    }

    /// Whether `code` is a supported language.
    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// All supported language codes, in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Number of supported languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
