use glossa_core::metadata::{TranslationMetadata, DEFAULT_LANGUAGE};
use glossa_core::traits::{PreferenceSource, SettingsStore};
use tracing::warn;

use crate::locales::ReportedLocales;

/// Store key holding the persisted language selection.
pub const SELECTED_LANGUAGE_KEY: &str = "selectedLanguage";

/// Regional codes whose bare tags are ambiguous, mapped to the canonical
/// script variant. Keys are lowercase; lookups lowercase the input.
const LOCALE_ALIASES: &[(&str, &str)] = &[
    ("zh-cn", "zh-Hans"),
    ("zh-sg", "zh-Hans"),
    ("zh-my", "zh-Hans"),
    ("zh-tw", "zh-Hant"),
    ("zh-hk", "zh-Hant"),
    ("zh-mo", "zh-Hant"),
    ("zh", "zh-Hant"),
];

/// Match `code` against the supported-language table.
///
/// Tries an exact key match, then the alias table, then a case-insensitive
/// scan of all supported codes.
pub fn find_available_language(metadata: &TranslationMetadata, code: &str) -> Option<String> {
    if metadata.contains(code) {
        return Some(code.to_string());
    }
    let lower = code.to_ascii_lowercase();
    if let Some((_, alias)) = LOCALE_ALIASES.iter().find(|(key, _)| *key == lower) {
        return Some((*alias).to_string());
    }
    metadata
        .codes()
        .find(|candidate| candidate.to_ascii_lowercase() == lower)
        .map(str::to_string)
}

/// Result of reading the persisted language selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSelection {
    /// No selection stored, or no usable store.
    Missing,
    /// The stored entry is not a JSON-encoded string.
    Malformed,
    /// The stored language code.
    Selected(String),
}

/// Read and decode the persisted `selectedLanguage` entry.
///
/// The entry holds a JSON-encoded string. Store failures read as absent;
/// a malformed entry is reported as such so callers can skip it.
pub fn stored_selection(store: &dyn SettingsStore) -> StoredSelection {
    let raw = match store.read(SELECTED_LANGUAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StoredSelection::Missing,
        Err(e) => {
            warn!("settings store unavailable, ignoring stored selection: {e}");
            return StoredSelection::Missing;
        }
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::String(code)) => StoredSelection::Selected(code),
        Ok(serde_json::Value::Null) => StoredSelection::Missing,
        Ok(_) | Err(_) => {
            warn!("persisted language selection is malformed: {raw:?}");
            StoredSelection::Malformed
        }
    }
}

/// Resolve the server-stored user preference, if any.
///
/// Source failures degrade to "no preference" so local resolution can take
/// over.
pub async fn user_language(
    source: &dyn PreferenceSource,
    metadata: &TranslationMetadata,
) -> Option<String> {
    match source.user_language().await {
        Ok(Some(code)) => find_available_language(metadata, &code),
        Ok(None) => None,
        Err(e) => {
            warn!("preference source '{}' failed: {e}", source.name());
            None
        }
    }
}

/// Determine the display language from local signals alone.
///
/// Signal order: persisted selection, each reported locale, the primary
/// locale, the primary's base subtag, then the fixed fallback. The first
/// signal that resolves wins; this never fails.
pub fn local_language(
    store: &dyn SettingsStore,
    locales: &ReportedLocales,
    metadata: &TranslationMetadata,
) -> String {
    if let StoredSelection::Selected(code) = stored_selection(store) {
        if let Some(found) = find_available_language(metadata, &code) {
            return found;
        }
    }

    for locale in &locales.languages {
        if let Some(found) = find_available_language(metadata, locale) {
            return found;
        }
    }

    if let Some(primary) = locales.primary.as_deref() {
        if let Some(found) = find_available_language(metadata, primary) {
            return found;
        }
        // Region-qualified primary: retry the bare base subtag.
        if let Some((base, _)) = primary.split_once('-') {
            if let Some(found) = find_available_language(metadata, base) {
                return found;
            }
        }
    }

    DEFAULT_LANGUAGE.to_string()
}
