//! Entry point for making widgets language-adjustable.
//!
//! [`AdjusterHub`] binds at most one adjuster to each widget, keyed by the
//! widget's identity, and owns the registry of free-standing adjustables.
//! The hub only tracks adjusters weakly: callers own the returned handles,
//! and dropping (or disposing) a handle detaches the adjuster.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{
    build_key_resolver, AdjustableRegistry, DropdownAdjuster, LangAdjustable, RegistryEntryId,
    Resolver, TextAdjuster,
};
use crate::i18n::LanguageState;
use crate::ui::widgets::{SharedDropdown, SharedText};

/// Identity of a shared widget (address of its allocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WidgetKey(usize);

impl WidgetKey {
    fn of<T: ?Sized>(widget: &Rc<T>) -> Self {
        Self(Rc::as_ptr(widget) as *const () as usize)
    }
}

/// Binds adjusters to widgets for one [`LanguageState`].
pub struct AdjusterHub {
    state: LanguageState,
    registry: AdjustableRegistry,
    texts: RefCell<HashMap<WidgetKey, Weak<TextAdjuster>>>,
    dropdowns: RefCell<HashMap<WidgetKey, Weak<DropdownAdjuster>>>,
}

impl AdjusterHub {
    pub fn new(state: &LanguageState) -> Self {
        Self {
            state: state.clone(),
            registry: AdjustableRegistry::new(state),
            texts: RefCell::new(HashMap::new()),
            dropdowns: RefCell::new(HashMap::new()),
        }
    }

    pub fn state(&self) -> &LanguageState {
        &self.state
    }

    /// Registry of free-standing adjustables.
    pub fn registry(&self) -> &AdjustableRegistry {
        &self.registry
    }

    /// Register a free-standing adjustable with the hub's registry.
    pub fn register_free_standing<T: LangAdjustable + 'static>(
        &self,
        adjustable: &Rc<T>,
    ) -> RegistryEntryId {
        self.registry.register(adjustable)
    }

    /// Resolver looking `key` up in the hub's language state.
    pub fn build_key_resolver(&self, key: impl Into<String>, default: Option<&str>) -> Resolver {
        build_key_resolver(&self.state, key, default)
    }

    /// The live adjuster bound to a text widget, if any.
    pub fn text_adjuster(&self, widget: &SharedText) -> Option<Rc<TextAdjuster>> {
        let key = WidgetKey::of(widget);
        let found = self.texts.borrow().get(&key).and_then(Weak::upgrade);
        found.filter(|a| !a.is_disposed() && a.is_bound_to(widget))
    }

    /// The live adjuster bound to a dropdown widget, if any.
    pub fn dropdown_adjuster(&self, widget: &SharedDropdown) -> Option<Rc<DropdownAdjuster>> {
        let key = WidgetKey::of(widget);
        let found = self.dropdowns.borrow().get(&key).and_then(Weak::upgrade);
        found.filter(|a| !a.is_disposed() && a.is_bound_to(widget))
    }

    pub fn has_text_adjuster(&self, widget: &SharedText) -> bool {
        self.text_adjuster(widget).is_some()
    }

    pub fn has_dropdown_adjuster(&self, widget: &SharedDropdown) -> bool {
        self.dropdown_adjuster(widget).is_some()
    }

    /// Make a text widget follow the active language.
    ///
    /// If the widget already has a live adjuster, nothing changes and that
    /// adjuster is returned.
    pub fn attach_text_adjuster(
        &self,
        widget: &SharedText,
        resolver: Option<Resolver>,
    ) -> Rc<TextAdjuster> {
        self.attach_text_adjuster_with(widget, resolver, true)
    }

    /// Like [`attach_text_adjuster`](Self::attach_text_adjuster), choosing
    /// whether the widget may be auto-shrunk.
    pub fn attach_text_adjuster_with(
        &self,
        widget: &SharedText,
        resolver: Option<Resolver>,
        shrinkable: bool,
    ) -> Rc<TextAdjuster> {
        if let Some(existing) = self.text_adjuster(widget) {
            tracing::debug!("Text widget already has an adjuster");
            return existing;
        }

        let adjuster = TextAdjuster::attach(&self.state, widget, resolver, shrinkable);
        let mut texts = self.texts.borrow_mut();
        texts.retain(|_, a| a.strong_count() > 0);
        texts.insert(WidgetKey::of(widget), Rc::downgrade(&adjuster));
        adjuster
    }

    /// Make a dropdown follow the active language, with one resolver per
    /// option.
    ///
    /// Caption and item template widgets get text adjusters without a
    /// resolver, unless they already have one. If the dropdown already has a
    /// live adjuster, nothing changes and that adjuster is returned.
    pub fn attach_dropdown_adjuster(
        &self,
        widget: &SharedDropdown,
        resolvers: Vec<Resolver>,
    ) -> Rc<DropdownAdjuster> {
        if let Some(existing) = self.dropdown_adjuster(widget) {
            tracing::debug!("Dropdown widget already has an adjuster");
            return existing;
        }

        let adjuster = DropdownAdjuster::attach(&self.state, widget, resolvers, |text| {
            self.attach_text_adjuster(text, None)
        });
        let mut dropdowns = self.dropdowns.borrow_mut();
        dropdowns.retain(|_, a| a.strong_count() > 0);
        dropdowns.insert(WidgetKey::of(widget), Rc::downgrade(&adjuster));
        adjuster
    }
}

impl std::fmt::Debug for AdjusterHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjusterHub")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("texts", &self.texts.borrow().len())
            .field("dropdowns", &self.dropdowns.borrow().len())
            .finish()
    }
}
