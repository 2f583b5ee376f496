//! Integration tests for the viewer element.
//!
//! These tests drive the full lifecycle against the mock engine and
//! verify the interaction between loading, state sync, and teardown.

mod teardown_tests;
