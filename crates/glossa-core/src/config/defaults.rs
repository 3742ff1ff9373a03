//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "glossa".to_string()
}

pub fn default_data_dir() -> String {
    "~/.glossa".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_base_url() -> String {
    "http://localhost:8123".to_string()
}

pub fn default_metadata_path() -> String {
    "translations/metadata.json".to_string()
}

pub fn default_store_path() -> String {
    "~/.glossa/settings.json".to_string()
}
