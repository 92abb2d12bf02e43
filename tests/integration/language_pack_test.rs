//! Loading language packs and configuration from disk.

use lang_adjust::i18n::{init_language_state, LocaleDetector};
use lang_adjust::storage::config::{load_config_from, save_config_to};
use lang_adjust::storage::{AppConfig, I18nSettings};
use lang_adjust::ui::Label;
use lang_adjust::AdjusterHub;
use tempfile::tempdir;

struct FixedLocale(&'static str);

impl LocaleDetector for FixedLocale {
    fn system_locale(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

const FRENCH: &str = r#"
id = "fr"
name = "Français"
auto_shrink_overflowing_text = true

[strings]
"app.greeting" = "Bonjour"
"#;

const CUSTOM_SPANISH: &str = r#"
id = "es"
name = "Español"

[strings]
"app.greeting" = "Buenas"
"#;

#[test]
fn test_packs_dir_adds_and_overrides_languages() {
    let dir = tempdir().expect("failed to create temp dir");
    std::fs::write(dir.path().join("fr.toml"), FRENCH).unwrap();
    std::fs::write(dir.path().join("es.toml"), CUSTOM_SPANISH).unwrap();

    let settings = I18nSettings {
        packs_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let state = init_language_state(&settings, &FixedLocale("fr-CA")).unwrap();

    assert_eq!(state.current_language().id(), "fr");
    assert!(state.current_language().auto_shrink_overflowing_text());
    assert_eq!(state.get_string("app.greeting", 12, None), "Bonjour");
    // Missing from the French pack, found in the built-in English one
    assert_eq!(state.get_string("quality.low", 12, None), "Low");

    state.set_language("es").unwrap();
    assert_eq!(state.get_string("app.greeting", 12, None), "Buenas");
    assert_eq!(state.available_ids(), vec!["en-US", "es", "de", "fr"]);
}

#[test]
fn test_missing_packs_dir_keeps_builtins() {
    let dir = tempdir().expect("failed to create temp dir");
    let settings = I18nSettings {
        packs_dir: Some(dir.path().join("missing")),
        ..Default::default()
    };

    let state = init_language_state(&settings, &FixedLocale("en-GB")).unwrap();

    assert_eq!(state.available_ids(), vec!["en-US", "es", "de"]);
    assert_eq!(state.current_language().id(), "en-US");
}

#[test]
fn test_saved_config_drives_startup_language() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("config.toml");
    let mut config = AppConfig::default();
    config.i18n.language = Some("es".to_string());
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let state = init_language_state(&loaded.i18n, &FixedLocale("de-DE")).unwrap();
    let hub = AdjusterHub::new(&state);
    let label = Label::new("", 16).into_shared();
    let _adjuster = hub.attach_text_adjuster(&label, Some(hub.build_key_resolver("app.greeting", None)));

    assert_eq!(label.borrow().text(), "Hola");
}
