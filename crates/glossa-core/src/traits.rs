use crate::error::GlossaError;
use async_trait::async_trait;

/// Preference source trait.
///
/// The backend keeps a per-user language choice; the resolver only consumes
/// the optional code and treats the transport as opaque.
#[async_trait]
pub trait PreferenceSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// The user's saved language code, if one is stored.
    async fn user_language(&self) -> Result<Option<String>, GlossaError>;
}

/// Settings store trait.
///
/// Persisted key/value text entries that survive across sessions. Individual
/// entries may themselves hold JSON-encoded values; the store neither knows
/// nor cares. A store whose backing is unavailable reports keys as absent
/// rather than failing reads.
pub trait SettingsStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, GlossaError>;

    /// Persist `value` under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), GlossaError>;
}
