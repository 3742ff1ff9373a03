//! # glossa-fetch
//!
//! Translation bundle fetching: fingerprinted bundle downloads with
//! in-process memoization and a single default-language fallback, plus the
//! HTTP preference source.

mod fetcher;
mod fingerprint;
mod preference;

pub use fetcher::{BundleFetcher, TranslationBundle};
pub use fingerprint::Fingerprint;
pub use preference::HttpPreferenceSource;
