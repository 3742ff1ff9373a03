//! Bundle fetcher with in-process memoization and request coalescing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use glossa_core::config::ServerConfig;
use glossa_core::error::GlossaError;
use glossa_core::metadata::{TranslationMetadata, DEFAULT_LANGUAGE};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::fingerprint::Fingerprint;

/// A fetched translation bundle: the language actually served and its data.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationBundle {
    pub language: String,
    pub data: Value,
}

/// One cache slot. The error side is a plain string so every coalesced
/// waiter can observe the same failure.
type Slot = Arc<OnceCell<Result<Arc<TranslationBundle>, String>>>;

/// Fetches fingerprinted translation bundles from the static file server.
///
/// Each fingerprint resolves at most once per fetcher instance; concurrent
/// requests for the same fingerprint share a single network call. Resolved
/// entries live as long as the fetcher; failed entries are evicted so a
/// later request retries.
pub struct BundleFetcher {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    supervisor: bool,
    metadata: TranslationMetadata,
    cache: Mutex<HashMap<String, Slot>>,
}

impl BundleFetcher {
    /// Create from config values and the loaded metadata table.
    pub fn from_config(server: &ServerConfig, metadata: TranslationMetadata) -> Self {
        let token = if server.token.is_empty() {
            None
        } else {
            Some(server.token.clone())
        };
        Self {
            client: reqwest::Client::new(),
            base_url: server.base_url.trim_end_matches('/').to_string(),
            token,
            supervisor: server.supervisor,
            metadata,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The metadata table this fetcher serves from.
    pub fn metadata(&self) -> &TranslationMetadata {
        &self.metadata
    }

    /// Fetch the bundle for `language`, optionally scoped to a `fragment`.
    ///
    /// Resolution is a two-step pipeline: the requested language is tried
    /// first, and on any failure the default language is tried exactly once.
    /// A failure for the default language itself propagates.
    pub async fn fetch(
        &self,
        fragment: Option<&str>,
        language: &str,
    ) -> Result<Arc<TranslationBundle>, GlossaError> {
        let (effective, hash) = self.effective_language(language)?;
        match self.fetch_cached(fragment, &effective, &hash).await {
            Ok(bundle) => Ok(bundle),
            Err(err) if effective != DEFAULT_LANGUAGE => {
                warn!(
                    "bundle fetch for '{effective}' failed, falling back to \
                     '{DEFAULT_LANGUAGE}': {err}"
                );
                let hash = self.default_hash()?;
                self.fetch_cached(fragment, DEFAULT_LANGUAGE, &hash).await
            }
            Err(err) => Err(err),
        }
    }

    /// Whether the server answers for the default-language bundle.
    pub async fn is_available(&self) -> bool {
        let Ok(hash) = self.default_hash() else {
            return false;
        };
        let fingerprint = Fingerprint::new(None, DEFAULT_LANGUAGE, &hash);
        let url = self.bundle_url(&fingerprint);
        match self.request(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("translation server not available: {e}");
                false
            }
        }
    }

    /// Map the requested language to a supported one.
    ///
    /// An unsupported language silently becomes the default; a missing
    /// default is a fatal configuration error.
    fn effective_language(&self, language: &str) -> Result<(String, String), GlossaError> {
        if let Some(meta) = self.metadata.get(language) {
            return Ok((language.to_string(), meta.hash.clone()));
        }
        if language != DEFAULT_LANGUAGE {
            warn!("language '{language}' missing from metadata, using '{DEFAULT_LANGUAGE}'");
            return Ok((DEFAULT_LANGUAGE.to_string(), self.default_hash()?));
        }
        Err(missing_default())
    }

    fn default_hash(&self) -> Result<String, GlossaError> {
        self.metadata
            .get(DEFAULT_LANGUAGE)
            .map(|meta| meta.hash.clone())
            .ok_or_else(missing_default)
    }

    /// Resolve one fingerprint through the cache.
    ///
    /// The slot is created under the map lock before any suspension point,
    /// so concurrent callers always join the same in-flight fetch. A slot
    /// that resolved to an error is removed, permitting a later retry.
    async fn fetch_cached(
        &self,
        fragment: Option<&str>,
        language: &str,
        hash: &str,
    ) -> Result<Arc<TranslationBundle>, GlossaError> {
        let fingerprint = Fingerprint::new(fragment, language, hash);
        let slot = {
            let mut cache = self
                .cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(fingerprint.as_str().to_string()).or_default())
        };

        let result = slot
            .get_or_init(|| self.fetch_bundle(&fingerprint, language))
            .await;

        match result {
            Ok(bundle) => Ok(Arc::clone(bundle)),
            Err(msg) => {
                let mut cache = self
                    .cache
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                // Only evict our own failed slot; a fresh one may already
                // be retrying.
                if let Some(current) = cache.get(fingerprint.as_str()) {
                    if Arc::ptr_eq(current, &slot) {
                        cache.remove(fingerprint.as_str());
                    }
                }
                Err(GlossaError::Fetch(msg.clone()))
            }
        }
    }

    /// Issue the network request for one fingerprint.
    async fn fetch_bundle(
        &self,
        fingerprint: &Fingerprint,
        language: &str,
    ) -> Result<Arc<TranslationBundle>, String> {
        let url = self.bundle_url(fingerprint);
        debug!("GET {url}");

        let resp = self
            .request(&url)
            .send()
            .await
            .map_err(|e| format!("request for {fingerprint} failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("{url} returned {}", resp.status()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| format!("failed to parse bundle {fingerprint}: {e}"))?;

        Ok(Arc::new(TranslationBundle {
            language: language.to_string(),
            data,
        }))
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Build the download URL for a fingerprint.
    ///
    /// Supervisor mode serves bundles through the supervisor ingress and
    /// strips the literal `supervisor/` fragment prefix.
    fn bundle_url(&self, fingerprint: &Fingerprint) -> String {
        if self.supervisor {
            let path = fingerprint
                .as_str()
                .strip_prefix("supervisor/")
                .unwrap_or(fingerprint.as_str());
            format!("{}/api/hassio/app/static/translations/{path}", self.base_url)
        } else {
            format!("{}/static/translations/{}", self.base_url, fingerprint)
        }
    }
}

fn missing_default() -> GlossaError {
    GlossaError::Locale(format!(
        "default language '{DEFAULT_LANGUAGE}' is missing from translation metadata"
    ))
}
