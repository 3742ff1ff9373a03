use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use glossa_core::error::GlossaError;
use glossa_core::shellexpand;
use glossa_core::traits::SettingsStore;
use tracing::debug;

/// Settings store backed by a single JSON object file.
///
/// Keys and values are plain strings. A missing file reads as empty and is
/// created on first write; an unreadable or structurally invalid file is a
/// store error.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given path. A leading `~/` is expanded.
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand(path)),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, GlossaError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("settings file {} not found, treating as empty", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(GlossaError::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            GlossaError::Store(format!(
                "{} is not a valid settings file: {e}",
                self.path.display()
            ))
        })
    }
}

impl SettingsStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, GlossaError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), GlossaError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    GlossaError::Store(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, content)
            .map_err(|e| GlossaError::Store(format!("failed to write {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("settings.json").to_str().unwrap())
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.read("selectedLanguage").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("selectedLanguage", "\"fr\"").unwrap();
        assert_eq!(
            store.read("selectedLanguage").unwrap().as_deref(),
            Some("\"fr\"")
        );
        assert_eq!(store.read("other").unwrap(), None);
    }

    #[test]
    fn test_write_preserves_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();
        store.write("a", "3").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.read("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/settings.json");
        let store = FileStore::new(path.to_str().unwrap());
        store.write("key", "value").unwrap();
        assert_eq!(store.read("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_corrupt_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(path.to_str().unwrap());
        let err = store.read("key").unwrap_err();
        assert!(matches!(err, GlossaError::Store(_)));
    }

    #[test]
    fn test_non_object_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let store = FileStore::new(path.to_str().unwrap());
        assert!(store.read("key").is_err());
    }
}
