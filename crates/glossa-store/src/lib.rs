//! # glossa-store
//!
//! Persisted settings store: the across-session key/value text storage the
//! resolver reads the language selection from.

mod file;

pub use file::FileStore;
