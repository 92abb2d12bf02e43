//! Language state holder and change notification.
//!
//! [`LanguageState`] owns the loaded languages and the active one. Anything
//! implementing [`LangAdjustable`] can subscribe; subscribers are stored as
//! `Weak` references and notified in subscription order whenever the active
//! language is set. Handles are cheap clones sharing the same state, and
//! independent instances never see each other's events.
//!
//! Notification works on a snapshot of the subscriber list, so subscribers
//! may subscribe, unsubscribe or drop themselves (or each other) from inside
//! a notification. A subscriber whose [`Subscription`] was released before
//! its turn in the snapshot is skipped. A language switch made from inside
//! a notification supersedes the one in progress: the nested switch notifies
//! everyone with the new language and the outer notification stops there.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::{catalog, Language};
use crate::adjustables::LangAdjustable;

/// Errors raised by the language state holder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
    #[error("Language not found: {0}")]
    LanguageNotFound(String),
}

struct Subscriber {
    id: u64,
    target: Weak<dyn LangAdjustable>,
}

struct StateInner {
    /// Loaded languages in load order
    languages: RefCell<Vec<Rc<Language>>>,
    current: RefCell<Rc<Language>>,
    fallback: RefCell<Rc<Language>>,
    subscribers: RefCell<Vec<Subscriber>>,
    next_subscriber_id: Cell<u64>,
    /// Bumped on every `set_language`
    generation: Cell<u64>,
}

impl StateInner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|s| s.id == id)
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|s| s.id != id);
    }
}

/// Holder of the active language, shared by cloning.
#[derive(Clone)]
pub struct LanguageState {
    inner: Rc<StateInner>,
}

impl std::fmt::Debug for LanguageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageState")
            .field("current", &self.inner.current.borrow().id())
            .field("fallback", &self.inner.fallback.borrow().id())
            .field("languages", &self.available_ids())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl LanguageState {
    /// Create a state whose only language is `initial`; it is both the
    /// active and the fallback language.
    pub fn new(initial: Language) -> Self {
        let initial = Rc::new(initial);
        Self {
            inner: Rc::new(StateInner {
                languages: RefCell::new(vec![Rc::clone(&initial)]),
                current: RefCell::new(Rc::clone(&initial)),
                fallback: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_subscriber_id: Cell::new(0),
                generation: Cell::new(0),
            }),
        }
    }

    /// Add a language, replacing any loaded language with the same id.
    ///
    /// Replacing the active language does not notify subscribers; call
    /// [`set_language`](Self::set_language) to refresh them.
    pub fn add_language(&self, language: Language) {
        let language = Rc::new(language);
        {
            let mut languages = self.inner.languages.borrow_mut();
            match languages.iter_mut().find(|l| l.id() == language.id()) {
                Some(existing) => *existing = Rc::clone(&language),
                None => languages.push(Rc::clone(&language)),
            }
        }

        for slot in [&self.inner.current, &self.inner.fallback] {
            let same_id = slot.borrow().id() == language.id();
            if same_id {
                *slot.borrow_mut() = Rc::clone(&language);
            }
        }
    }

    /// Get a loaded language by id.
    pub fn language(&self, id: &str) -> Option<Rc<Language>> {
        self.inner
            .languages
            .borrow()
            .iter()
            .find(|l| l.id() == id)
            .cloned()
    }

    /// Ids of all loaded languages, in load order.
    pub fn available_ids(&self) -> Vec<String> {
        self.inner
            .languages
            .borrow()
            .iter()
            .map(|l| l.id().to_string())
            .collect()
    }

    /// The active language.
    pub fn current_language(&self) -> Rc<Language> {
        Rc::clone(&self.inner.current.borrow())
    }

    /// Id of the fallback language.
    pub fn fallback_id(&self) -> String {
        self.inner.fallback.borrow().id().to_string()
    }

    /// Set the language consulted for keys missing from the active one.
    pub fn set_fallback_language(&self, id: &str) -> Result<(), I18nError> {
        let language = self
            .language(id)
            .ok_or_else(|| I18nError::LanguageNotFound(id.to_string()))?;
        *self.inner.fallback.borrow_mut() = language;
        Ok(())
    }

    /// Switch the active language and notify every live subscriber.
    ///
    /// Setting the already active language notifies as well. When called
    /// from a subscriber during a notification, the outer notification is
    /// abandoned once this one returns, so no subscriber is left holding the
    /// older language.
    pub fn set_language(&self, id: &str) -> Result<(), I18nError> {
        let language = self
            .language(id)
            .ok_or_else(|| I18nError::LanguageNotFound(id.to_string()))?;

        tracing::debug!("Switching language to {}", language.id());
        *self.inner.current.borrow_mut() = Rc::clone(&language);
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        self.notify(&language, generation);
        Ok(())
    }

    /// Subscribe to language changes.
    ///
    /// The target is held weakly; dropping or cancelling the returned guard
    /// unsubscribes it.
    pub fn subscribe(&self, target: Weak<dyn LangAdjustable>) -> Subscription {
        let id = self.inner.next_subscriber_id.get();
        self.inner.next_subscriber_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push(Subscriber { id, target });

        Subscription {
            state: Rc::downgrade(&self.inner),
            id,
            active: true,
        }
    }

    /// Number of subscribers whose target is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.target.strong_count() > 0)
            .count()
    }

    /// Resolve a localized string for the active language.
    ///
    /// See [`catalog::lookup`] for the fallback order and the meaning of
    /// `font_size_hint`.
    pub fn get_string(&self, key: &str, font_size_hint: i32, default: Option<&str>) -> String {
        let current = self.current_language();
        let fallback = self.inner.fallback.borrow();
        let fallback = (fallback.id() != current.id()).then_some(&**fallback);
        catalog::lookup(&current, fallback, key, font_size_hint, default)
    }

    /// Number of language switches so far. Changes whenever `set_language`
    /// is called, even for the already active language.
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    fn notify(&self, language: &Language, generation: u64) {
        // Collect first so no borrow is held while subscribers run.
        let snapshot: Vec<(u64, Weak<dyn LangAdjustable>)> = {
            let mut subscribers = self.inner.subscribers.borrow_mut();
            subscribers.retain(|s| s.target.strong_count() > 0);
            subscribers
                .iter()
                .map(|s| (s.id, Weak::clone(&s.target)))
                .collect()
        };

        tracing::trace!(
            "Notifying {} subscribers of language {}",
            snapshot.len(),
            language.id()
        );

        for (id, target) in snapshot {
            if self.inner.generation.get() != generation {
                tracing::trace!("Language {} superseded mid-notification", language.id());
                break;
            }
            if !self.inner.is_subscribed(id) {
                continue;
            }
            if let Some(target) = target.upgrade() {
                target.adjust_to_language(language);
            }
        }
    }
}

/// Guard for a language-change subscription.
///
/// Unsubscribes when cancelled or dropped, whichever comes first.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    state: Weak<StateInner>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(state) = self.state.upgrade() {
            state.unsubscribe(self.id);
        }
    }

    /// Whether this guard is still subscribed to a live state.
    pub fn is_active(&self) -> bool {
        self.active && self.state.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
