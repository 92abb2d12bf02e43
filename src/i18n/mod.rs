//! Internationalization module for runtime language switching.
//!
//! Languages are described by TOML language packs, held by a
//! [`LanguageState`] and resolved through [`LanguageState::get_string`].
//! Switching the active language notifies every live subscriber.

pub mod catalog;
pub mod loader;
pub mod state;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::storage::config::I18nSettings;

// Re-export types
pub use catalog::apply_font_size;
pub use loader::{
    LanguagePack, LanguagePackError, LanguagePackLoader, LocaleDetector, SystemLocaleDetector,
};
pub use state::{I18nError, LanguageState, Subscription};

/// Identifier of the language that is always available.
pub const DEFAULT_LANGUAGE_ID: &str = "en-US";

/// Display policy attached to a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Shrink overflowing text elements to fit their container
    #[serde(default)]
    pub auto_shrink_overflowing_text: bool,
}

/// A loaded language: identity, display policy and string table.
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    id: String,
    name: String,
    info: LanguageInfo,
    strings: HashMap<String, String>,
}

impl Language {
    /// Create an empty language.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            info: LanguageInfo::default(),
            strings: HashMap::new(),
        }
    }

    /// Set the auto-shrink policy.
    pub fn with_auto_shrink(mut self, enabled: bool) -> Self {
        self.info.auto_shrink_overflowing_text = enabled;
        self
    }

    /// Add a single string.
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Add many strings at once.
    pub fn with_strings<K, V>(mut self, strings: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.strings
            .extend(strings.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Language identifier (e.g. "en-US").
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Native display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display policy.
    pub fn info(&self) -> &LanguageInfo {
        &self.info
    }

    /// Whether overflowing text must be shrunk while this language is active.
    pub fn auto_shrink_overflowing_text(&self) -> bool {
        self.info.auto_shrink_overflowing_text
    }

    /// Look up a raw string by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(|s| s.as_str())
    }

    /// Number of strings in this language.
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Build the language state used at startup.
///
/// Built-in packs are always loaded; packs from `settings.packs_dir` are
/// layered on top (same id replaces the built-in). The active language is
/// the configured one if available, otherwise the best match for the
/// system locale, otherwise the fallback language.
pub fn init_language_state(
    settings: &I18nSettings,
    detector: &dyn LocaleDetector,
) -> Result<LanguageState, I18nError> {
    let mut loader = LanguagePackLoader::with_builtin_packs();

    if let Some(dir) = &settings.packs_dir {
        if let Err(e) = loader.load_from_dir(dir) {
            tracing::warn!("Failed to load language packs from {}: {}", dir.display(), e);
        }
    }

    let mut languages = loader.into_languages().into_iter();
    let first = languages
        .next()
        .ok_or_else(|| I18nError::LanguageNotFound(DEFAULT_LANGUAGE_ID.to_string()))?;
    let state = LanguageState::new(first);
    for language in languages {
        state.add_language(language);
    }

    if let Err(e) = state.set_fallback_language(&settings.fallback_language) {
        tracing::warn!("Invalid fallback language, keeping {}: {}", state.fallback_id(), e);
    }

    let available = state.available_ids();
    let selected = settings
        .language
        .as_deref()
        .and_then(|requested| {
            let matched = detector.best_match(requested, &available);
            if matched.is_none() {
                tracing::warn!("Configured language {} is not available", requested);
            }
            matched
        })
        .or_else(|| {
            detector
                .system_locale()
                .and_then(|locale| detector.best_match(&locale, &available))
        })
        .unwrap_or_else(|| state.fallback_id());

    state.set_language(&selected)?;
    tracing::info!("Active language: {}", state.current_language().id());
    Ok(state)
}
