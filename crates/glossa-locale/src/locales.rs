/// The client environment's reported locale preferences.
#[derive(Debug, Clone, Default)]
pub struct ReportedLocales {
    /// Ordered preferred-locale list, most preferred first.
    pub languages: Vec<String>,
    /// The primary reported locale.
    pub primary: Option<String>,
}

impl ReportedLocales {
    /// Build from an ordered list; the first entry becomes the primary.
    pub fn new(languages: Vec<String>) -> Self {
        let primary = languages.first().cloned();
        Self { languages, primary }
    }

    /// Read the locale preferences the operating system reports.
    ///
    /// Underscore separators are normalized to hyphens (`en_US` → `en-US`).
    pub fn from_system() -> Self {
        let languages: Vec<String> = sys_locale::get_locales()
            .map(|l| l.replace('_', "-"))
            .collect();
        let primary = sys_locale::get_locale().map(|l| l.replace('_', "-"));
        Self { languages, primary }
    }
}
