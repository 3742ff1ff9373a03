//! # glossa-locale
//!
//! Language resolution: matches preference signals (server-stored choice,
//! persisted local selection, client-reported locales) against the
//! supported-language metadata and always lands on a usable code.

mod locales;
mod resolver;


pub use locales::ReportedLocales;
pub use resolver::{
    find_available_language, local_language, stored_selection, user_language, StoredSelection,
    SELECTED_LANGUAGE_KEY,
};
