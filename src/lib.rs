//! lang-adjust - Live localization refresh for UI widgets
//!
//! Keeps on-screen text in sync with the active language: when the language
//! changes, every registered text element re-renders its string and
//! re-applies the language's auto-shrink policy, without being recreated.

pub mod adjustables;
pub mod i18n;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use adjustables::{
    build_key_resolver, AdjustableRegistry, AdjusterHub, DropdownAdjuster, FitState,
    LangAdjustable, Resolver, TextAdjuster,
};
pub use i18n::{Language, LanguageState};
pub use storage::config::AppConfig;
