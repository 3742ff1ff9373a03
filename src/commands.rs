//! CLI subcommand implementations.

use glossa_core::config::Config;
use glossa_core::error::GlossaError;
use glossa_core::metadata::TranslationMetadata;
use glossa_core::shellexpand;
use glossa_core::traits::{PreferenceSource, SettingsStore};
use glossa_fetch::{BundleFetcher, HttpPreferenceSource};
use glossa_locale::{ReportedLocales, SELECTED_LANGUAGE_KEY};
use glossa_store::FileStore;
use tracing::debug;


fn load_metadata(cfg: &Config) -> Result<TranslationMetadata, GlossaError> {
    TranslationMetadata::load(&shellexpand(&cfg.translations.metadata_path))
}

fn build_preference(cfg: &Config) -> Option<HttpPreferenceSource> {
    if !cfg.preference.enabled || cfg.preference.url.is_empty() {
        return None;
    }
    let token = if cfg.server.token.is_empty() {
        None
    } else {
        Some(cfg.server.token.clone())
    };
    Some(HttpPreferenceSource::from_config(&cfg.preference, token))
}

/// Effective display language: the server-stored preference wins, then the
/// local signals.
async fn effective_language(
    source: Option<&dyn PreferenceSource>,
    store: &dyn SettingsStore,
    locales: &ReportedLocales,
    metadata: &TranslationMetadata,
) -> String {
    if let Some(source) = source {
        if let Some(language) = glossa_locale::user_language(source, metadata).await {
            debug!("language '{language}' resolved from preference source");
            return language;
        }
    }
    glossa_locale::local_language(store, locales, metadata)
}

pub(crate) async fn resolve(cfg: &Config) -> anyhow::Result<()> {
    let metadata = load_metadata(cfg)?;
    let store = FileStore::new(&cfg.store.path);
    let source = build_preference(cfg);
    let language = effective_language(
        source.as_ref().map(|s| s as &dyn PreferenceSource),
        &store,
        &ReportedLocales::from_system(),
        &metadata,
    )
    .await;
    println!("{language}");
    Ok(())
}

pub(crate) async fn fetch(
    cfg: &Config,
    fragment: Option<&str>,
    language: Option<&str>,
) -> anyhow::Result<()> {
    let metadata = load_metadata(cfg)?;
    let language = match language {
        Some(language) => language.to_string(),
        None => {
            let store = FileStore::new(&cfg.store.path);
            let source = build_preference(cfg);
            effective_language(
                source.as_ref().map(|s| s as &dyn PreferenceSource),
                &store,
                &ReportedLocales::from_system(),
                &metadata,
            )
            .await
        }
    };
    debug!("fetching bundle for '{language}'");

    let fetcher = BundleFetcher::from_config(&cfg.server, metadata);
    let bundle = fetcher.fetch(fragment, &language).await?;
    println!("{}", serde_json::to_string_pretty(&bundle.data)?);
    Ok(())
}

pub(crate) fn set(cfg: &Config, language: &str) -> anyhow::Result<()> {
    let metadata = load_metadata(cfg)?;
    let Some(found) = glossa_locale::find_available_language(&metadata, language) else {
        anyhow::bail!(
            "unsupported language '{language}'. Run 'glossa status' to list supported codes."
        );
    };

    let store = FileStore::new(&cfg.store.path);
    store.write(SELECTED_LANGUAGE_KEY, &serde_json::to_string(&found)?)?;
    println!("Language set to {found}");
    Ok(())
}

pub(crate) async fn status(cfg: &Config) -> anyhow::Result<()> {
    println!("Glossa — Status Check\n");
    println!("Server: {}", cfg.server.base_url);
    println!(
        "Supervisor mode: {}",
        if cfg.server.supervisor { "on" } else { "off" }
    );
    println!(
        "Preference source: {}",
        if cfg.preference.enabled {
            cfg.preference.url.as_str()
        } else {
            "disabled"
        }
    );
    println!();

    match load_metadata(cfg) {
        Ok(metadata) => {
            let fetcher = BundleFetcher::from_config(&cfg.server, metadata);
            let metadata = fetcher.metadata();
            println!("Languages: {}", metadata.len());
            for code in metadata.codes() {
                let native = metadata
                    .get(code)
                    .and_then(|meta| meta.native_name.as_deref())
                    .unwrap_or("-");
                println!("  {code}: {native}");
            }
            println!();

            println!(
                "  server: {}",
                if fetcher.is_available().await {
                    "available"
                } else {
                    "not reachable"
                }
            );
        }
        Err(e) => println!("Languages: metadata not loaded ({e})"),
    }

    Ok(())
}
