//! In-memory text widget.

use std::cell::RefCell;
use std::rc::Rc;

use super::{SharedText, TextWidget};

/// Default largest best-fit size.
pub const DEFAULT_MAX_FIT_SIZE: i32 = 40;

/// Default smallest best-fit size.
pub const DEFAULT_MIN_FIT_SIZE: i32 = 10;

/// A plain text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    font_size: i32,
    best_fit: bool,
    max_fit_size: i32,
    min_fit_size: i32,
}

impl Label {
    /// Create a label with best-fit disabled and default fit sizes.
    pub fn new(text: impl Into<String>, font_size: i32) -> Self {
        Self {
            text: text.into(),
            font_size,
            best_fit: false,
            max_fit_size: DEFAULT_MAX_FIT_SIZE,
            min_fit_size: DEFAULT_MIN_FIT_SIZE,
        }
    }

    /// Set the best-fit configuration.
    pub fn with_fit(mut self, best_fit: bool, max_fit_size: i32, min_fit_size: i32) -> Self {
        self.best_fit = best_fit;
        self.max_fit_size = max_fit_size;
        self.min_fit_size = min_fit_size;
        self
    }

    pub fn set_font_size(&mut self, font_size: i32) {
        self.font_size = font_size;
    }

    /// Wrap into a shared handle.
    pub fn into_shared(self) -> SharedText {
        Rc::new(RefCell::new(self))
    }
}

impl TextWidget for Label {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn font_size(&self) -> i32 {
        self.font_size
    }

    fn best_fit(&self) -> bool {
        self.best_fit
    }

    fn set_best_fit(&mut self, enabled: bool) {
        self.best_fit = enabled;
    }

    fn max_fit_size(&self) -> i32 {
        self.max_fit_size
    }

    fn set_max_fit_size(&mut self, size: i32) {
        self.max_fit_size = size;
    }

    fn min_fit_size(&self) -> i32 {
        self.min_fit_size
    }

    fn set_min_fit_size(&mut self, size: i32) {
        self.min_fit_size = size;
    }
}
