//! Language adjuster for a dropdown widget.
//!
//! Option labels are re-rendered from one resolver per option. The caption
//! and item-template text widgets get their own resolver-less
//! [`TextAdjuster`]s so they follow the shrink policy; their text is owned
//! by the dropdown itself.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{LangAdjustable, Resolver, TextAdjuster, NO_FONT_SIZE};
use crate::i18n::{Language, LanguageState, Subscription};
use crate::ui::widgets::{DropdownWidget, SharedDropdown, SharedText};

/// Keeps one dropdown widget in sync with the active language.
pub struct DropdownAdjuster {
    widget: Weak<RefCell<dyn DropdownWidget>>,
    resolvers: Vec<Resolver>,
    item_text: Option<Rc<TextAdjuster>>,
    caption: Option<Rc<TextAdjuster>>,
    subscription: RefCell<Option<Subscription>>,
}

impl DropdownAdjuster {
    /// Bind an adjuster to `widget`, subscribe it to `state` and adjust it
    /// once for the active language.
    ///
    /// Nested text adjusters are created through `attach_nested`, item
    /// template first, before the dropdown's own first adjust pass.
    pub fn attach(
        state: &LanguageState,
        widget: &SharedDropdown,
        resolvers: Vec<Resolver>,
        mut attach_nested: impl FnMut(&SharedText) -> Rc<TextAdjuster>,
    ) -> Rc<Self> {
        let (item_widget, caption_widget) = {
            let dropdown = widget.borrow();
            (dropdown.item_text(), dropdown.caption_text())
        };

        let adjuster = Rc::new_cyclic(|weak: &Weak<Self>| {
            let target: Weak<dyn LangAdjustable> = weak.clone();
            let subscription = state.subscribe(target);
            Self {
                widget: Rc::downgrade(widget),
                resolvers,
                item_text: item_widget.as_ref().map(&mut attach_nested),
                caption: caption_widget.as_ref().map(&mut attach_nested),
                subscription: RefCell::new(Some(subscription)),
            }
        });
        adjuster.adjust_to_language(&state.current_language());
        adjuster
    }

    /// The bound widget, if it is still alive.
    pub fn widget(&self) -> Option<SharedDropdown> {
        self.widget.upgrade()
    }

    /// Whether this adjuster is bound to `widget`.
    pub fn is_bound_to(&self, widget: &SharedDropdown) -> bool {
        self.widget
            .upgrade()
            .is_some_and(|w| std::ptr::addr_eq(Rc::as_ptr(&w), Rc::as_ptr(widget)))
    }

    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    /// Adjuster of the caption text widget.
    pub fn caption_adjuster(&self) -> Option<&Rc<TextAdjuster>> {
        self.caption.as_ref()
    }

    /// Adjuster of the item template text widget.
    pub fn item_text_adjuster(&self) -> Option<&Rc<TextAdjuster>> {
        self.item_text.as_ref()
    }

    /// Stop receiving language changes. Nested adjusters keep their own
    /// subscriptions until they are disposed or dropped.
    ///
    /// Dropping the dropdown adjuster also drops the nested ones unless they
    /// are held elsewhere; a shrunk caption or item template then keeps its
    /// shrunk fit.
    pub fn dispose(&self) {
        if self.subscription.borrow_mut().take().is_some() {
            tracing::trace!("Dropdown adjuster disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.borrow().is_none()
    }
}

impl LangAdjustable for DropdownAdjuster {
    fn adjust_to_language(&self, language: &Language) {
        let Some(widget) = self.widget.upgrade() else {
            tracing::trace!("Dropdown widget gone, skipping {}", language.id());
            return;
        };

        let option_count = widget.borrow().option_count();
        if option_count != self.resolvers.len() {
            tracing::debug!(
                "Dropdown has {} options but {} resolvers, skipping {}",
                option_count,
                self.resolvers.len(),
                language.id()
            );
            return;
        }

        let labels: Vec<String> = self.resolvers.iter().map(|r| r(NO_FONT_SIZE)).collect();

        let mut dropdown = widget.borrow_mut();
        for (index, label) in labels.into_iter().enumerate() {
            dropdown.set_option_label(index, label);
        }
        dropdown.refresh_shown_value();
    }
}

impl Drop for DropdownAdjuster {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for DropdownAdjuster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownAdjuster")
            .field("alive", &(self.widget.strong_count() > 0))
            .field("resolvers", &self.resolvers.len())
            .field("item_text", &self.item_text)
            .field("caption", &self.caption)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
