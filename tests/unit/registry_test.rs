//! Unit tests for the free-standing adjustable registry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lang_adjust::adjustables::{AdjustableRegistry, LangAdjustable, RegistryEntryId};
use lang_adjust::Language;

fn spanish() -> Language {
    Language::new("es", "Español")
}

/// Appends its name to a shared log on every adjust.
struct Named {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl LangAdjustable for Named {
    fn adjust_to_language(&self, _language: &Language) {
        self.log.borrow_mut().push(self.name);
    }
}

fn named(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<Named> {
    Rc::new(Named {
        name,
        log: Rc::clone(log),
    })
}

/// Unregisters itself the first time it is adjusted.
struct SelfRemoving {
    registry: AdjustableRegistry,
    id: Cell<Option<RegistryEntryId>>,
    calls: Cell<usize>,
}

impl LangAdjustable for SelfRemoving {
    fn adjust_to_language(&self, _language: &Language) {
        self.calls.set(self.calls.get() + 1);
        if let Some(id) = self.id.take() {
            assert!(self.registry.unregister(id));
        }
    }
}

/// Registers a new named entry on every adjust.
struct Spawner {
    registry: AdjustableRegistry,
    log: Rc<RefCell<Vec<&'static str>>>,
    spawned: RefCell<Vec<Rc<Named>>>,
}

impl LangAdjustable for Spawner {
    fn adjust_to_language(&self, _language: &Language) {
        let child = named("child", &self.log);
        self.registry.register(&child);
        self.spawned.borrow_mut().push(child);
    }
}

/// Unregisters or drops a sibling when adjusted.
struct SiblingKiller {
    registry: AdjustableRegistry,
    sibling_id: Cell<Option<RegistryEntryId>>,
    sibling: RefCell<Option<Rc<Named>>>,
}

impl LangAdjustable for SiblingKiller {
    fn adjust_to_language(&self, _language: &Language) {
        if let Some(id) = self.sibling_id.take() {
            self.registry.unregister(id);
        }
        self.sibling.borrow_mut().take();
    }
}

#[test]
fn test_broadcast_in_insertion_order() {
    let registry = AdjustableRegistry::detached();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = named("a", &log);
    let b = named("b", &log);
    let c = named("c", &log);
    registry.register(&b);
    registry.register(&a);
    registry.register(&c);

    registry.broadcast(&spanish());

    assert_eq!(*log.borrow(), vec!["b", "a", "c"]);
}

#[test]
fn test_registration_during_broadcast_waits_for_next() {
    let registry = AdjustableRegistry::detached();
    let log = Rc::new(RefCell::new(Vec::new()));
    let spawner = Rc::new(Spawner {
        registry: registry.clone(),
        log: Rc::clone(&log),
        spawned: RefCell::new(Vec::new()),
    });
    registry.register(&spawner);

    registry.broadcast(&spanish());
    assert!(log.borrow().is_empty());
    assert_eq!(registry.len(), 2);

    registry.broadcast(&spanish());
    assert_eq!(*log.borrow(), vec!["child"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_self_removal_during_broadcast() {
    let registry = AdjustableRegistry::detached();
    let log = Rc::new(RefCell::new(Vec::new()));
    let remover = Rc::new(SelfRemoving {
        registry: registry.clone(),
        id: Cell::new(None),
        calls: Cell::new(0),
    });
    let after = named("after", &log);
    remover.id.set(Some(registry.register(&remover)));
    registry.register(&after);

    registry.broadcast(&spanish());
    registry.broadcast(&spanish());

    assert_eq!(remover.calls.get(), 1);
    assert_eq!(*log.borrow(), vec!["after", "after"]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_sibling_unregistered_mid_broadcast_is_skipped() {
    let registry = AdjustableRegistry::detached();
    let log = Rc::new(RefCell::new(Vec::new()));
    let victim = named("victim", &log);
    let killer = Rc::new(SiblingKiller {
        registry: registry.clone(),
        sibling_id: Cell::new(None),
        sibling: RefCell::new(None),
    });
    registry.register(&killer);
    killer.sibling_id.set(Some(registry.register(&victim)));

    registry.broadcast(&spanish());

    assert!(log.borrow().is_empty());
}

#[test]
fn test_sibling_dropped_mid_broadcast_is_skipped() {
    let registry = AdjustableRegistry::detached();
    let log = Rc::new(RefCell::new(Vec::new()));
    let killer = Rc::new(SiblingKiller {
        registry: registry.clone(),
        sibling_id: Cell::new(None),
        sibling: RefCell::new(None),
    });
    registry.register(&killer);
    {
        let victim = named("victim", &log);
        registry.register(&victim);
        *killer.sibling.borrow_mut() = Some(victim);
    }

    registry.broadcast(&spanish());

    assert!(log.borrow().is_empty());
    assert_eq!(registry.len(), 1);
}
