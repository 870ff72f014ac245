//! Locale message tables exposed to templates as `i18n`.

use std::collections::BTreeMap;

/// Messages per locale, with a default locale used as fallback.
#[derive(Debug, Clone, Default)]
pub struct Localization {
    default_locale: String,
    messages: BTreeMap<String, BTreeMap<String, String>>,
}

impl Localization {
    pub fn new(
        default_locale: impl Into<String>,
        messages: BTreeMap<String, BTreeMap<String, String>>,
    ) -> Self {
        Self {
            default_locale: default_locale.into(),
            messages,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locales that have a message table.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Translate `key` for `locale`, falling back to the default locale.
    pub fn translate(&self, key: &str, locale: &str) -> Option<&str> {
        self.messages
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(&self.default_locale)?.get(key))
            .map(String::as_str)
    }

    /// All messages visible for `locale`: the default table overlaid with the
    /// locale's own table.
    pub fn messages_for(&self, locale: &str) -> BTreeMap<String, String> {
        let mut merged = self.messages.get(&self.default_locale).cloned().unwrap_or_default();
        if locale != self.default_locale {
            if let Some(table) = self.messages.get(locale) {
                merged.extend(table.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }
}
