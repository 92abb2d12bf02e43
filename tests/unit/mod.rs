//! Unit test modules.

mod registry_test;
