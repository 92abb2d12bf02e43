//! Integration test modules.

mod language_pack_test;
mod language_switch_test;
