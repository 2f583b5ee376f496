//! Unit tests for the viewer element.

mod assets_tests;
mod loader_tests;
mod options_tests;
mod snapshot_tests;
