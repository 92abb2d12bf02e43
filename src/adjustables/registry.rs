//! Registry of free-standing adjustables.
//!
//! The registry holds its entries weakly, in insertion order, and forwards
//! every language change it receives to them. Each broadcast walks a
//! snapshot taken when the broadcast starts:
//! - entries registered during a broadcast are first visited by the next one
//! - entries unregistered (or dropped) during a broadcast are skipped if
//!   their turn has not come yet
//! - dropped entries are pruned before the snapshot is taken
//! - a language switch made by an entry ends the broadcast in progress; the
//!   nested broadcast has already brought every entry to the new language

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::LangAdjustable;
use crate::i18n::{Language, LanguageState, Subscription};

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryEntryId(u64);

struct Entry {
    id: RegistryEntryId,
    target: Weak<dyn LangAdjustable>,
}

struct RegistryInner {
    entries: RefCell<Vec<Entry>>,
    next_id: Cell<u64>,
    state: Option<LanguageState>,
    _subscription: Option<Subscription>,
}

impl RegistryInner {
    fn contains(&self, id: RegistryEntryId) -> bool {
        self.entries.borrow().iter().any(|e| e.id == id)
    }

    fn broadcast(&self, language: &Language) {
        let snapshot: Vec<(RegistryEntryId, Weak<dyn LangAdjustable>)> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(|e| e.target.strong_count() > 0);
            entries
                .iter()
                .map(|e| (e.id, Weak::clone(&e.target)))
                .collect()
        };

        tracing::debug!(
            "Broadcasting {} to {} free-standing adjustables",
            language.id(),
            snapshot.len()
        );

        let generation = self.state.as_ref().map(LanguageState::generation);
        for (id, target) in snapshot {
            if self.state.as_ref().map(LanguageState::generation) != generation {
                tracing::trace!("Broadcast of {} superseded", language.id());
                break;
            }
            if !self.contains(id) {
                tracing::trace!("Skipping adjustable {:?} removed mid-broadcast", id);
                continue;
            }
            match target.upgrade() {
                Some(target) => target.adjust_to_language(language),
                None => tracing::trace!("Skipping dropped adjustable {:?}", id),
            }
        }
    }
}

impl LangAdjustable for RegistryInner {
    fn adjust_to_language(&self, language: &Language) {
        self.broadcast(language);
    }
}

/// Insertion-ordered registry of free-standing adjustables.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct AdjustableRegistry {
    inner: Rc<RegistryInner>,
}

impl AdjustableRegistry {
    /// Create a registry that broadcasts every language change of `state`.
    pub fn new(state: &LanguageState) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<RegistryInner>| {
            let target: Weak<dyn LangAdjustable> = weak.clone();
            RegistryInner {
                entries: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                state: Some(state.clone()),
                _subscription: Some(state.subscribe(target)),
            }
        });
        Self { inner }
    }

    /// Create a registry that only broadcasts when asked to.
    pub fn detached() -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                entries: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                state: None,
                _subscription: None,
            }),
        }
    }

    /// Append an adjustable. No deduplication is performed; registering the
    /// same object twice makes it visited twice per broadcast.
    pub fn register<T: LangAdjustable + 'static>(&self, adjustable: &Rc<T>) -> RegistryEntryId {
        let target: Weak<dyn LangAdjustable> = Rc::downgrade(adjustable) as Weak<dyn LangAdjustable>;
        self.register_weak(target)
    }

    /// Append an adjustable given as a weak trait object.
    pub fn register_weak(&self, target: Weak<dyn LangAdjustable>) -> RegistryEntryId {
        let id = RegistryEntryId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.entries.borrow_mut().push(Entry { id, target });
        id
    }

    /// Remove a registration. Safe to call during a broadcast, including
    /// from the adjustable being visited.
    ///
    /// Returns `false` if the entry was not registered.
    pub fn unregister(&self, id: RegistryEntryId) -> bool {
        let mut entries = self.inner.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: RegistryEntryId) -> bool {
        self.inner.contains(id)
    }

    /// Number of registrations whose target is still alive.
    pub fn len(&self) -> usize {
        self.inner
            .entries
            .borrow()
            .iter()
            .filter(|e| e.target.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch `language` to every registered adjustable.
    pub fn broadcast(&self, language: &Language) {
        self.inner.broadcast(language);
    }
}

impl std::fmt::Debug for AdjustableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjustableRegistry")
            .field("entries", &self.inner.entries.borrow().len())
            .field("attached", &self.inner._subscription.is_some())
            .finish()
    }
}
