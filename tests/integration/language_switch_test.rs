//! End-to-end language switching over the built-in language packs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lang_adjust::adjustables::{LangAdjustable, TextAdjuster};
use lang_adjust::i18n::{init_language_state, LocaleDetector};
use lang_adjust::storage::I18nSettings;
use lang_adjust::ui::{Dropdown, Label};
use lang_adjust::{AdjusterHub, Language, LanguageState};

struct NoSystemLocale;

impl LocaleDetector for NoSystemLocale {
    fn system_locale(&self) -> Option<String> {
        None
    }
}

fn builtin_state() -> LanguageState {
    init_language_state(&I18nSettings::default(), &NoSystemLocale).expect("built-in packs load")
}

/// Free-standing adjustable that tears down a widget adjuster when run.
struct Teardown {
    victim: RefCell<Option<Rc<TextAdjuster>>>,
    calls: Cell<usize>,
}

impl LangAdjustable for Teardown {
    fn adjust_to_language(&self, _language: &Language) {
        self.calls.set(self.calls.get() + 1);
        self.victim.borrow_mut().take();
    }
}

/// Free-standing adjustable that switches to another language when it sees
/// a given one.
struct Redirect {
    state: LanguageState,
    from: &'static str,
    to: &'static str,
}

impl LangAdjustable for Redirect {
    fn adjust_to_language(&self, language: &Language) {
        if language.id() == self.from {
            self.state.set_language(self.to).unwrap();
        }
    }
}

#[test]
fn test_widgets_follow_builtin_languages() {
    let state = builtin_state();
    assert_eq!(state.current_language().id(), "en-US");

    let hub = AdjusterHub::new(&state);
    let title = Label::new("", 24).with_fit(false, 40, 1).into_shared();
    let _title = hub.attach_text_adjuster(&title, Some(hub.build_key_resolver("app.greeting", None)));

    let keys = ["quality.low", "quality.medium", "quality.high"];
    let quality = Dropdown::new(keys).into_shared();
    let resolvers = keys.iter().map(|k| hub.build_key_resolver(*k, None)).collect();
    let _quality = hub.attach_dropdown_adjuster(&quality, resolvers);

    assert_eq!(title.borrow().text(), "Hello");
    assert_eq!(quality.borrow().option_label(0), Some("Low"));

    state.set_language("de").unwrap();
    assert_eq!(title.borrow().text(), "Hallo");
    assert!(title.borrow().best_fit());
    assert_eq!(title.borrow().max_fit_size(), 24);
    assert_eq!(title.borrow().min_fit_size(), 1);
    // German has no entry for "quality.high"; English fills in.
    assert_eq!(quality.borrow().option_label(2), Some("High"));

    state.set_language("es").unwrap();
    assert_eq!(title.borrow().text(), "Hola");
    assert!(!title.borrow().best_fit());
    assert_eq!(title.borrow().max_fit_size(), 40);
    assert_eq!(quality.borrow().option_label(1), Some("Media"));
}

#[test]
fn test_adjuster_destroyed_mid_broadcast() {
    let state = builtin_state();
    let hub = AdjusterHub::new(&state);

    let label = Label::new("", 20).into_shared();
    let adjuster = hub.attach_text_adjuster(&label, Some(hub.build_key_resolver("app.greeting", None)));
    let teardown = Rc::new(Teardown {
        victim: RefCell::new(Some(adjuster)),
        calls: Cell::new(0),
    });
    hub.register_free_standing(&teardown);

    // The registry subscribed before the adjuster, so it runs first.
    state.set_language("es").unwrap();

    assert_eq!(teardown.calls.get(), 1);
    assert_eq!(label.borrow().text(), "Hello");
    assert!(!hub.has_text_adjuster(&label));

    state.set_language("de").unwrap();
    assert_eq!(teardown.calls.get(), 2);
    assert_eq!(label.borrow().text(), "Hello");
}

#[test]
fn test_widget_dropped_while_adjuster_lives() {
    let state = builtin_state();
    let hub = AdjusterHub::new(&state);
    let label = Label::new("", 20).into_shared();
    let adjuster = hub.attach_text_adjuster(&label, None);

    drop(label);
    state.set_language("de").unwrap();

    assert!(adjuster.widget().is_none());
    assert!(!adjuster.is_shrunk());
}

#[test]
fn test_independent_states_do_not_interfere() {
    let first = builtin_state();
    let second = builtin_state();
    let hub = AdjusterHub::new(&first);
    let label = Label::new("", 20).into_shared();
    let _adjuster = hub.attach_text_adjuster(&label, Some(hub.build_key_resolver("app.greeting", None)));

    second.set_language("es").unwrap();

    assert_eq!(label.borrow().text(), "Hello");
}

#[test]
fn test_switch_from_inside_broadcast_wins() {
    let state = builtin_state();
    let hub = AdjusterHub::new(&state);
    let redirect = Rc::new(Redirect {
        state: state.clone(),
        from: "es",
        to: "de",
    });
    hub.register_free_standing(&redirect);

    let label = Label::new("", 24).with_fit(false, 40, 1).into_shared();
    let _adjuster = hub.attach_text_adjuster(&label, Some(hub.build_key_resolver("app.greeting", None)));

    state.set_language("es").unwrap();

    assert_eq!(state.current_language().id(), "de");
    assert_eq!(label.borrow().text(), "Hallo");
    assert!(label.borrow().best_fit());
    assert_eq!(label.borrow().max_fit_size(), 24);
}
