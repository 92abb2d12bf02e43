//! In-memory dropdown widget.

use std::cell::RefCell;
use std::rc::Rc;

use super::{DropdownWidget, SharedDropdown, SharedText};

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
}

/// A dropdown with an optional caption and item template.
///
/// Refreshing the shown value copies the selected option's label into
/// [`shown_value`](Self::shown_value) and the caption widget.
pub struct Dropdown {
    options: Vec<DropdownOption>,
    selected: usize,
    shown_value: String,
    refresh_count: usize,
    caption: Option<SharedText>,
    item_text: Option<SharedText>,
}

impl Dropdown {
    /// Create a dropdown with the first option selected.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<DropdownOption> = labels
            .into_iter()
            .map(|label| DropdownOption {
                label: label.into(),
            })
            .collect();
        let shown_value = options
            .first()
            .map(|o| o.label.clone())
            .unwrap_or_default();

        Self {
            options,
            selected: 0,
            shown_value,
            refresh_count: 0,
            caption: None,
            item_text: None,
        }
    }

    pub fn with_caption(mut self, caption: SharedText) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn with_item_text(mut self, item_text: SharedText) -> Self {
        self.item_text = Some(item_text);
        self
    }

    /// Wrap into a shared handle.
    pub fn into_shared(self) -> SharedDropdown {
        Rc::new(RefCell::new(self))
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn add_option(&mut self, label: impl Into<String>) {
        self.options.push(DropdownOption {
            label: label.into(),
        });
    }

    /// Select an option and refresh the shown value. Out-of-range indices
    /// are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = index;
            self.refresh_shown_value();
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Label shown for the selection as of the last refresh.
    pub fn shown_value(&self) -> &str {
        &self.shown_value
    }

    /// Number of times the shown value was refreshed.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }
}

impl DropdownWidget for Dropdown {
    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn option_label(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(|o| o.label.as_str())
    }

    fn set_option_label(&mut self, index: usize, label: String) {
        if let Some(option) = self.options.get_mut(index) {
            option.label = label;
        }
    }

    fn refresh_shown_value(&mut self) {
        self.shown_value = self
            .options
            .get(self.selected)
            .map(|o| o.label.clone())
            .unwrap_or_default();
        self.refresh_count += 1;

        if let Some(caption) = &self.caption {
            caption.borrow_mut().set_text(self.shown_value.clone());
        }
    }

    fn caption_text(&self) -> Option<SharedText> {
        self.caption.clone()
    }

    fn item_text(&self) -> Option<SharedText> {
        self.item_text.clone()
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("shown_value", &self.shown_value)
            .field("has_caption", &self.caption.is_some())
            .field("has_item_text", &self.item_text.is_some())
            .finish()
    }
}
