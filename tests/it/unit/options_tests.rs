//! Tests for options loading and fallback behavior.

use std::path::PathBuf;

use pdfpane::ViewerOptions;
use pdfpane::constants::WORKER_SOURCE_PATH;
use pdfpane::types::DocumentSource;

#[test]
fn defaults_are_sensible() {
    let options = ViewerOptions::default();
    assert!(options.src.is_none());
    assert_eq!(options.page, 1);
    assert_eq!(options.worker_source, PathBuf::from(WORKER_SOURCE_PATH));
    assert!(options.enable_hw_acceleration);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");

    let options = ViewerOptions {
        src: Some(DocumentSource::Path {
            path: "manual.pdf".into(),
        }),
        page: 7,
        worker_source: "/opt/worker".into(),
        enable_hw_acceleration: false,
        asset_root: "/opt/assets".into(),
    };
    options.save(&path).unwrap();

    let loaded = ViewerOptions::load(&path);
    assert_eq!(loaded.page, 7);
    assert_eq!(loaded.worker_source, PathBuf::from("/opt/worker"));
    assert!(!loaded.enable_hw_acceleration);
    assert_eq!(
        loaded.src,
        Some(DocumentSource::Path {
            path: "manual.pdf".into()
        })
    );
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let options = ViewerOptions::load(&dir.path().join("does-not-exist.json"));
    assert_eq!(options.page, 1);
    assert!(options.src.is_none());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");
    std::fs::write(&path, "{ not json").unwrap();

    let options = ViewerOptions::load(&path);
    assert_eq!(options.page, 1);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");
    std::fs::write(&path, r#"{ "page": 3 }"#).unwrap();

    let options = ViewerOptions::load(&path);
    assert_eq!(options.page, 3);
    assert_eq!(options.worker_source, PathBuf::from(WORKER_SOURCE_PATH));
}
