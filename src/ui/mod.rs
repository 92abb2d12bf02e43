//! UI module: the widget surfaces language adjusters operate on.

pub mod widgets;

pub use widgets::{Dropdown, DropdownWidget, Label, SharedDropdown, SharedText, TextWidget};
