//! Language pack loader.
//!
//! A language pack is a TOML document:
//!
//! ```toml
//! id = "es"
//! name = "Español"
//! auto_shrink_overflowing_text = false
//!
//! [strings]
//! greeting = "Hola"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use super::{Language, LanguageInfo};

const BUILTIN_PACKS: &[(&str, &str)] = &[
    ("en-US.toml", include_str!("locales/en-US.toml")),
    ("es.toml", include_str!("locales/es.toml")),
    ("de.toml", include_str!("locales/de.toml")),
];

/// On-disk representation of a language.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguagePack {
    /// Language identifier (BCP 47)
    pub id: String,
    /// Native display name
    pub name: String,
    /// Display policy
    #[serde(flatten)]
    pub info: LanguageInfo,
    /// Key -> localized string
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

impl LanguagePack {
    /// Parse a pack from TOML text.
    pub fn parse(content: &str) -> Result<Self, LanguagePackError> {
        let pack: LanguagePack =
            toml::from_str(content).map_err(|e| LanguagePackError::ParseError(e.to_string()))?;

        pack.id
            .parse::<LanguageIdentifier>()
            .map_err(|_| LanguagePackError::InvalidIdentifier(pack.id.clone()))?;

        Ok(pack)
    }
}

impl From<LanguagePack> for Language {
    fn from(pack: LanguagePack) -> Self {
        Language::new(pack.id, pack.name)
            .with_auto_shrink(pack.info.auto_shrink_overflowing_text)
            .with_strings(pack.strings)
    }
}

/// Collects languages from language packs, in load order.
///
/// Loading a pack whose id is already present replaces the earlier one
/// in place.
pub struct LanguagePackLoader {
    languages: Vec<Language>,
}

impl LanguagePackLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
        }
    }

    /// Create a loader holding the packs compiled into the crate.
    pub fn with_builtin_packs() -> Self {
        let mut loader = Self::new();
        for (name, content) in BUILTIN_PACKS {
            if let Err(e) = loader.load_str(content) {
                tracing::warn!("Skipping built-in language pack {}: {}", name, e);
            }
        }
        loader
    }

    /// Load every `.toml` pack from a directory.
    ///
    /// Invalid packs are skipped with a warning; only directory access
    /// errors abort the load.
    pub fn load_from_dir(&mut self, dir: &Path) -> Result<usize, LanguagePackError> {
        if !dir.is_dir() {
            return Err(LanguagePackError::DirectoryNotFound(
                dir.display().to_string(),
            ));
        }

        let mut paths = Vec::new();
        for entry in
            std::fs::read_dir(dir).map_err(|e| LanguagePackError::IoError(e.to_string()))?
        {
            let entry = entry.map_err(|e| LanguagePackError::IoError(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!("Skipping language pack {}: {}", path.display(), e),
            }
        }

        tracing::debug!("Loaded {} language packs from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Load a single pack file.
    pub fn load_file(&mut self, path: &Path) -> Result<(), LanguagePackError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LanguagePackError::IoError(e.to_string()))?;

        self.load_str(&content)
    }

    /// Load a pack from TOML text.
    pub fn load_str(&mut self, content: &str) -> Result<(), LanguagePackError> {
        let language = Language::from(LanguagePack::parse(content)?);

        match self.languages.iter_mut().find(|l| l.id() == language.id()) {
            Some(existing) => *existing = language,
            None => self.languages.push(language),
        }
        Ok(())
    }

    /// Get a loaded language by id.
    pub fn get(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.id() == id)
    }

    /// Get the number of loaded languages.
    pub fn count(&self) -> usize {
        self.languages.len()
    }

    /// Consume the loader, yielding languages in load order.
    pub fn into_languages(self) -> Vec<Language> {
        self.languages
    }
}

impl Default for LanguagePackLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading language packs.
#[derive(Debug, thiserror::Error)]
pub enum LanguagePackError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid language identifier: {0}")]
    InvalidIdentifier(String),
}

/// Detect and match locales against the available languages.
pub trait LocaleDetector {
    /// Get the system locale.
    fn system_locale(&self) -> Option<String>;

    /// Get the best matching available language id for `requested`.
    ///
    /// Tries an exact match, then a range match where missing subtags act
    /// as wildcards ("en" matches "en-US"), then a primary-language match
    /// ("es-MX" matches "es-ES").
    fn best_match(&self, requested: &str, available: &[String]) -> Option<String> {
        let requested: LanguageIdentifier = requested.replace('_', "-").parse().ok()?;
        let candidates: Vec<(&String, LanguageIdentifier)> = available
            .iter()
            .filter_map(|id| id.parse().ok().map(|langid| (id, langid)))
            .collect();

        candidates
            .iter()
            .find(|(_, langid)| *langid == requested)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|(_, langid)| requested.matches(langid, true, true))
            })
            .or_else(|| {
                candidates
                    .iter()
                    .find(|(_, langid)| langid.language == requested.language)
            })
            .map(|(id, _)| (*id).clone())
    }
}

/// Default locale detector using sys-locale.
#[derive(Default)]
pub struct SystemLocaleDetector;

impl LocaleDetector for SystemLocaleDetector {
    fn system_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}
