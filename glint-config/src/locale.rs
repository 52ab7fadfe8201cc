//! Locale discovery.
//!
//! Only the language subtag matters to font selection, so providers hand
//! out a lower-case BCP 47 language such as `en`, `ja` or `zh`.

/// Supplies the user's current language.
pub trait LocaleProvider: Send + Sync {
    fn language(&self) -> String;
}

/// Reads the POSIX locale environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleProvider for SystemLocale {
    fn language(&self) -> String {
        let raw = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty());

        match raw {
            Some(value) => language_subtag(&value),
            None => {
                log::debug!("No locale environment set, assuming English");
                "en".to_string()
            }
        }
    }
}

/// A locale pinned to one language, e.g. from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl FixedLocale {
    pub fn new(tag: &str) -> Self {
        Self(language_subtag(tag))
    }
}

impl LocaleProvider for FixedLocale {
    fn language(&self) -> String {
        self.0.clone()
    }
}

/// Reduce a locale string such as `pt_BR.UTF-8@euro` or `zh-Hant-TW` to its
/// language subtag.
pub fn language_subtag(locale: &str) -> String {
    let tag = locale
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match tag.as_str() {
        "" | "c" | "posix" => "en".to_string(),
        _ => tag,
    }
}
