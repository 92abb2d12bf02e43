//! Language adjuster for a single text widget.
//!
//! On every language change the adjuster re-renders the widget text from
//! its resolver and applies the language's auto-shrink policy. Shrinking
//! overrides the widget's best-fit settings, so the original settings are
//! captured the first time the adjuster shrinks the widget and restored
//! whenever a language without the policy becomes active.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{LangAdjustable, Resolver};
use crate::i18n::{Language, LanguageState, Subscription};
use crate::ui::widgets::{SharedText, TextWidget};

/// Smallest minimum size applied when shrinking.
const SHRINK_MIN_SIZE: i32 = 2;

/// Best-fit configuration of a text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitState {
    pub best_fit: bool,
    pub max_size: i32,
    pub min_size: i32,
}

impl FitState {
    /// Read the fit settings of a widget.
    pub fn capture(widget: &dyn TextWidget) -> Self {
        Self {
            best_fit: widget.best_fit(),
            max_size: widget.max_fit_size(),
            min_size: widget.min_fit_size(),
        }
    }

    /// Write these fit settings to a widget.
    pub fn apply(&self, widget: &mut dyn TextWidget) {
        widget.set_best_fit(self.best_fit);
        widget.set_max_fit_size(self.max_size);
        widget.set_min_fit_size(self.min_size);
    }
}

#[derive(Debug)]
struct ShrinkState {
    shrinkable: bool,
    shrunk: bool,
    /// Settings before the first shrink; captured at most once
    saved_fit: Option<FitState>,
}

/// Keeps one text widget in sync with the active language.
pub struct TextAdjuster {
    widget: Weak<RefCell<dyn TextWidget>>,
    resolver: Option<Resolver>,
    shrink: RefCell<ShrinkState>,
    subscription: RefCell<Option<Subscription>>,
}

impl TextAdjuster {
    /// Bind an adjuster to `widget`, subscribe it to `state` and adjust it
    /// once for the active language.
    ///
    /// Without a resolver only the shrink policy is applied. Prefer
    /// [`AdjusterHub::attach_text_adjuster`](super::AdjusterHub::attach_text_adjuster),
    /// which refuses to bind a second adjuster to the same widget.
    pub fn attach(
        state: &LanguageState,
        widget: &SharedText,
        resolver: Option<Resolver>,
        shrinkable: bool,
    ) -> Rc<Self> {
        let adjuster = Rc::new_cyclic(|weak: &Weak<Self>| {
            let target: Weak<dyn LangAdjustable> = weak.clone();
            Self {
                widget: Rc::downgrade(widget),
                resolver,
                shrink: RefCell::new(ShrinkState {
                    shrinkable,
                    shrunk: false,
                    saved_fit: None,
                }),
                subscription: RefCell::new(Some(state.subscribe(target))),
            }
        });
        adjuster.adjust_to_language(&state.current_language());
        adjuster
    }

    /// The bound widget, if it is still alive.
    pub fn widget(&self) -> Option<SharedText> {
        self.widget.upgrade()
    }

    /// Whether this adjuster is bound to `widget`.
    pub fn is_bound_to(&self, widget: &SharedText) -> bool {
        self.widget
            .upgrade()
            .is_some_and(|w| std::ptr::addr_eq(Rc::as_ptr(&w), Rc::as_ptr(widget)))
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Whether the adjuster currently overrides the widget's fit settings.
    pub fn is_shrunk(&self) -> bool {
        self.shrink.borrow().shrunk
    }

    pub fn is_shrinkable(&self) -> bool {
        self.shrink.borrow().shrinkable
    }

    /// Fit settings captured before the first shrink.
    pub fn saved_fit(&self) -> Option<FitState> {
        self.shrink.borrow().saved_fit
    }

    /// Allow or forbid shrinking.
    ///
    /// Forbidding it while shrunk restores the saved fit settings at once.
    pub fn set_shrinkable(&self, shrinkable: bool) {
        let mut shrink = self.shrink.borrow_mut();
        shrink.shrinkable = shrinkable;
        if !shrinkable && shrink.shrunk {
            if let Some(widget) = self.widget.upgrade() {
                Self::restore(&mut shrink, &mut *widget.borrow_mut());
            }
        }
    }

    /// Stop receiving language changes.
    ///
    /// The widget keeps its current fit settings, shrunk or not. Call
    /// `set_shrinkable(false)` first to hand the widget back with its saved
    /// fit. Dropping the adjuster disposes it the same way.
    pub fn dispose(&self) {
        if self.subscription.borrow_mut().take().is_some() {
            tracing::trace!("Text adjuster disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.borrow().is_none()
    }

    fn apply_shrink_policy(&self, widget: &mut dyn TextWidget, auto_shrink: bool) {
        let mut shrink = self.shrink.borrow_mut();

        if auto_shrink && !shrink.shrunk {
            if !shrink.shrinkable {
                return;
            }
            if shrink.saved_fit.is_none() {
                shrink.saved_fit = Some(FitState::capture(&*widget));
            }

            let font_size = widget.font_size();
            let min_size = SHRINK_MIN_SIZE.min(widget.min_fit_size());
            widget.set_max_fit_size(font_size);
            widget.set_min_fit_size(min_size);
            widget.set_best_fit(true);
            shrink.shrunk = true;

            tracing::trace!("Shrinking text: max {} min {}", font_size, min_size);
        } else if !auto_shrink && shrink.shrunk {
            Self::restore(&mut shrink, widget);
        }
    }

    fn restore(shrink: &mut ShrinkState, widget: &mut dyn TextWidget) {
        if let Some(saved) = shrink.saved_fit {
            saved.apply(widget);
        }
        shrink.shrunk = false;
        tracing::trace!("Restored text fit settings: {:?}", shrink.saved_fit);
    }
}

impl LangAdjustable for TextAdjuster {
    fn adjust_to_language(&self, language: &Language) {
        let Some(widget) = self.widget.upgrade() else {
            tracing::trace!("Text widget gone, skipping {}", language.id());
            return;
        };

        if let Some(resolver) = &self.resolver {
            let font_size = widget.borrow().font_size();
            let text = resolver(font_size);
            widget.borrow_mut().set_text(text);
        }

        self.apply_shrink_policy(
            &mut *widget.borrow_mut(),
            language.auto_shrink_overflowing_text(),
        );
    }
}

impl Drop for TextAdjuster {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TextAdjuster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAdjuster")
            .field("alive", &(self.widget.strong_count() > 0))
            .field("has_resolver", &self.resolver.is_some())
            .field("shrink", &*self.shrink.borrow())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
