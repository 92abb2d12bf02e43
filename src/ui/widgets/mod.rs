//! Widget surfaces consumed by the language adjusters.
//!
//! The host toolkit implements [`TextWidget`] and [`DropdownWidget`] for its
//! own widgets. [`Label`] and [`Dropdown`] are in-memory implementations
//! used by the demo binary and tests.

pub mod dropdown;
pub mod label;

use std::cell::RefCell;
use std::rc::Rc;

pub use dropdown::{Dropdown, DropdownOption};
pub use label::Label;

/// Shared handle to a text widget.
pub type SharedText = Rc<RefCell<dyn TextWidget>>;

/// Shared handle to a dropdown widget.
pub type SharedDropdown = Rc<RefCell<dyn DropdownWidget>>;

/// A widget displaying a single string with optional best-fit resizing.
pub trait TextWidget {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);

    /// Rendered font size
    fn font_size(&self) -> i32;

    /// Whether the text is resized to fit its container
    fn best_fit(&self) -> bool;
    fn set_best_fit(&mut self, enabled: bool);

    /// Largest size best-fit may use
    fn max_fit_size(&self) -> i32;
    fn set_max_fit_size(&mut self, size: i32);

    /// Smallest size best-fit may use
    fn min_fit_size(&self) -> i32;
    fn set_min_fit_size(&mut self, size: i32);
}

/// A widget offering a list of labelled options.
pub trait DropdownWidget {
    fn option_count(&self) -> usize;

    fn option_label(&self, index: usize) -> Option<&str>;

    /// Replace the label of an existing option. Out-of-range indices are
    /// ignored.
    fn set_option_label(&mut self, index: usize, label: String);

    /// Re-render the currently selected option.
    fn refresh_shown_value(&mut self);

    /// Text widget showing the selected option.
    fn caption_text(&self) -> Option<SharedText>;

    /// Template text widget used for each option in the open list.
    fn item_text(&self) -> Option<SharedText>;
}
