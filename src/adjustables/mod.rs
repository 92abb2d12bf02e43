//! Language-adjustable objects.
//!
//! An adjustable is anything that must refresh itself when the active
//! language changes:
//! - Free-standing adjustables, registered in an [`AdjustableRegistry`]
//! - [`TextAdjuster`]s bound to a single text widget
//! - [`DropdownAdjuster`]s bound to a dropdown and its nested text widgets
//!
//! Widget-bound adjusters subscribe to the [`LanguageState`] themselves and
//! unsubscribe when disposed or dropped. [`AdjusterHub`] keeps at most one
//! adjuster per widget.

pub mod dropdown;
pub mod hub;
pub mod registry;
pub mod text;

use std::rc::Rc;

use crate::i18n::{Language, LanguageState};

// Re-export primary types
pub use dropdown::DropdownAdjuster;
pub use hub::AdjusterHub;
pub use registry::{AdjustableRegistry, RegistryEntryId};
pub use text::{FitState, TextAdjuster};

/// Font-size hint passed to resolvers when no single font size applies.
pub const NO_FONT_SIZE: i32 = -1;

/// Produces a localized string for a font-size hint.
pub type Resolver = Rc<dyn Fn(i32) -> String>;

/// Something that refreshes itself for a new language.
pub trait LangAdjustable {
    /// Apply `language` to this object.
    fn adjust_to_language(&self, language: &Language);
}

/// Build a resolver that looks `key` up in the active language of `state`.
///
/// Missing keys resolve to `default`, or to the key itself.
pub fn build_key_resolver(
    state: &LanguageState,
    key: impl Into<String>,
    default: Option<&str>,
) -> Resolver {
    let state = state.clone();
    let key = key.into();
    let default = default.map(str::to_string);
    Rc::new(move |font_size| state.get_string(&key, font_size, default.as_deref()))
}

/// Wrap a closure as a [`Resolver`].
pub fn resolver(f: impl Fn(i32) -> String + 'static) -> Resolver {
    Rc::new(f)
}
