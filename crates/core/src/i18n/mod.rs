//! Locale registry and per-request locale resolution.
//!
//! The registry is built once at startup and is read-only afterwards. The
//! active locale is never stored globally: callers pass whatever the request
//! carries to [`LocaleRegistry::resolve`] and get a [`Locale`] back.
//!
//! Resolution order, first match wins:
//!
//! 1. explicit `lang` parameter on the request
//! 2. preference remembered by the client (the `lang` cookie)
//! 3. configured default locale
//! 4. [`FALLBACK_LOCALE`]

pub mod catalogs;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

pub use catalogs::REQUIRED_KEYS;

/// Locale used when nothing else matches.
pub const FALLBACK_LOCALE: &str = "en";

/// A registered locale code such as `en` or `it`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(&'static str);

impl Locale {
    pub const fn code(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Which resolution step produced the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Explicit,
    Preference,
    Default,
    Fallback,
}

/// Outcome of [`LocaleRegistry::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub locale: Locale,
    pub source: LocaleSource,
}

type Catalog = HashMap<&'static str, &'static str>;

/// Registered locales and their string tables.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    catalogs: BTreeMap<&'static str, Catalog>,
    default: Locale,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self {
            catalogs: BTreeMap::new(),
            default: Locale(FALLBACK_LOCALE),
        }
    }
}

impl LocaleRegistry {
    /// Registry with the built-in `en` and `it` catalogs, defaulting to `en`.
    pub fn with_builtin() -> Result<Self, CoreError> {
        let mut registry = Self::default();
        registry.register("en", catalogs::EN)?;
        registry.register("it", catalogs::IT)?;
        Ok(registry)
    }

    /// Register a catalog under `code`.
    ///
    /// Fails with [`CoreError::MissingTranslationKey`] naming the first
    /// [`REQUIRED_KEYS`] entry the catalog lacks. Keys outside the required
    /// set are accepted but logged.
    pub fn register(
        &mut self,
        code: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Result<Locale, CoreError> {
        if code.is_empty() || normalize_code(code) != code {
            return Err(CoreError::Validation(format!(
                "Locale code '{code}' must be a lowercase language tag"
            )));
        }

        let catalog: Catalog = entries.iter().copied().collect();

        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !catalog.contains_key(*key)) {
            return Err(CoreError::MissingTranslationKey {
                locale: code.to_string(),
                key: (*missing).to_string(),
            });
        }

        for key in catalog.keys().filter(|key| !REQUIRED_KEYS.contains(*key)) {
            tracing::warn!(locale = code, key = *key, "Catalog defines an unused translation key");
        }

        self.catalogs.insert(code, catalog);
        tracing::debug!(locale = code, "Registered locale");
        Ok(Locale(code))
    }

    /// Set the configured default locale.
    pub fn set_default(&mut self, code: &str) -> Result<Locale, CoreError> {
        let locale = self
            .lookup(code)
            .ok_or_else(|| CoreError::UnknownLocale(code.to_string()))?;
        self.default = locale;
        Ok(locale)
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// Find a registered locale. Matching ignores case, surrounding
    /// whitespace and region tags (`it-IT` → `it`).
    pub fn lookup(&self, code: &str) -> Option<Locale> {
        let normalized = normalize_code(code);
        self.catalogs
            .get_key_value(normalized.as_str())
            .map(|(code, _)| Locale(*code))
    }

    /// All registered locales in code order.
    pub fn locales(&self) -> Vec<Locale> {
        self.catalogs.keys().map(|code| Locale(*code)).collect()
    }

    /// Resolve the locale for one request.
    pub fn resolve(&self, explicit: Option<&str>, preference: Option<&str>) -> Resolution {
        if let Some(locale) = explicit.and_then(|code| self.lookup(code)) {
            return Resolution {
                locale,
                source: LocaleSource::Explicit,
            };
        }
        if let Some(locale) = preference.and_then(|code| self.lookup(code)) {
            return Resolution {
                locale,
                source: LocaleSource::Preference,
            };
        }
        if self.catalogs.contains_key(self.default.code()) {
            return Resolution {
                locale: self.default,
                source: LocaleSource::Default,
            };
        }
        Resolution {
            locale: Locale(FALLBACK_LOCALE),
            source: LocaleSource::Fallback,
        }
    }

    /// Look up one string.
    ///
    /// A miss is a programming error: registration already guarantees every
    /// required key exists.
    pub fn translate(&self, locale: Locale, key: &str) -> Result<&'static str, CoreError> {
        self.catalogs
            .get(locale.code())
            .and_then(|catalog| catalog.get(key).copied())
            .ok_or_else(|| CoreError::MissingTranslationKey {
                locale: locale.code().to_string(),
                key: key.to_string(),
            })
    }

    /// Full string table of a locale, sorted by key.
    pub fn strings(&self, locale: Locale) -> BTreeMap<&'static str, &'static str> {
        self.catalogs
            .get(locale.code())
            .map(|catalog| catalog.iter().map(|(k, v)| (*k, *v)).collect())
            .unwrap_or_default()
    }
}

fn normalize_code(code: &str) -> String {
    let lowered = code.trim().to_ascii_lowercase();
    lowered
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::with_builtin().unwrap()
    }

    #[test]
    fn builtin_catalogs_are_complete() {
        let registry = registry();
        for locale in registry.locales() {
            for key in REQUIRED_KEYS {
                assert!(
                    registry.translate(locale, key).is_ok(),
                    "{locale} is missing {key}"
                );
            }
        }
    }

    #[test]
    fn builtin_catalogs_have_no_stray_keys() {
        for (_, catalog) in [("en", catalogs::EN), ("it", catalogs::IT)] {
            assert_eq!(catalog.len(), REQUIRED_KEYS.len());
        }
    }

    #[test]
    fn explicit_parameter_wins_over_default() {
        let registry = registry();
        let resolution = registry.resolve(Some("it"), None);
        assert_eq!(resolution.locale.code(), "it");
        assert_eq!(resolution.source, LocaleSource::Explicit);
    }

    #[test]
    fn no_hints_resolve_to_configured_default() {
        let registry = registry();
        let resolution = registry.resolve(None, None);
        assert_eq!(resolution.locale.code(), "en");
        assert_eq!(resolution.source, LocaleSource::Default);
    }

    #[test]
    fn preference_is_used_when_no_explicit_parameter() {
        let registry = registry();
        let resolution = registry.resolve(None, Some("it"));
        assert_eq!(resolution.locale.code(), "it");
        assert_eq!(resolution.source, LocaleSource::Preference);
    }

    #[test]
    fn unregistered_explicit_falls_through_to_preference() {
        let registry = registry();
        assert_eq!(registry.resolve(Some("fr"), Some("it")).locale.code(), "it");
        assert_eq!(registry.resolve(Some("fr"), Some("de")).locale.code(), "en");
    }

    #[test]
    fn configured_default_is_used() {
        let mut registry = registry();
        registry.set_default("it").unwrap();
        assert_eq!(registry.resolve(None, None).locale.code(), "it");
        assert_eq!(registry.resolve(Some("en"), None).locale.code(), "en");
    }

    #[test]
    fn unknown_default_is_rejected() {
        let mut registry = registry();
        assert_matches!(registry.set_default("xx"), Err(CoreError::UnknownLocale(code)) if code == "xx");
        assert_eq!(registry.default_locale().code(), "en");
    }

    #[test]
    fn empty_registry_falls_back() {
        let registry = LocaleRegistry::default();
        let resolution = registry.resolve(Some("it"), Some("en"));
        assert_eq!(resolution.locale.code(), FALLBACK_LOCALE);
        assert_eq!(resolution.source, LocaleSource::Fallback);
    }

    #[test]
    fn codes_match_case_insensitively_and_ignore_region() {
        let registry = registry();
        assert_eq!(registry.lookup("IT").map(Locale::code), Some("it"));
        assert_eq!(registry.lookup(" it-IT ").map(Locale::code), Some("it"));
        assert_eq!(registry.lookup("en_GB").map(Locale::code), Some("en"));
        assert_eq!(registry.lookup(""), None);
    }

    #[test]
    fn incomplete_catalog_is_rejected_at_registration() {
        static PARTIAL: &[(&str, &str)] = &[("html_lang", "fr"), ("subtitle", "Bonjour")];
        let mut registry = registry();
        let err = registry.register("fr", PARTIAL).unwrap_err();
        assert_matches!(
            err,
            CoreError::MissingTranslationKey { locale, key } if locale == "fr" && key == "bridge_label"
        );
        assert!(registry.lookup("fr").is_none());
    }

    #[test]
    fn uppercase_code_is_rejected() {
        let mut registry = LocaleRegistry::default();
        assert_matches!(registry.register("EN", catalogs::EN), Err(CoreError::Validation(_)));
    }

    #[test]
    fn translate_returns_locale_strings() {
        let registry = registry();
        let it = registry.lookup("it").unwrap();
        let en = registry.lookup("en").unwrap();
        assert_eq!(registry.translate(it, "btn_unlock").unwrap(), "Sblocca");
        assert_eq!(registry.translate(en, "btn_unlock").unwrap(), "Unlock");
    }

    #[test]
    fn translate_missing_key_is_an_error() {
        let registry = registry();
        let en = registry.lookup("en").unwrap();
        assert_matches!(
            registry.translate(en, "no_such_key"),
            Err(CoreError::MissingTranslationKey { key, .. }) if key == "no_such_key"
        );
    }

    #[test]
    fn strings_returns_full_table() {
        let registry = registry();
        let it = registry.lookup("it").unwrap();
        let table = registry.strings(it);
        assert_eq!(table.len(), REQUIRED_KEYS.len());
        assert_eq!(table["date_locale"], "it-IT");
    }
}
