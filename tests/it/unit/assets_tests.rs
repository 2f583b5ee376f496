//! Tests for guarded asset injection and release.

use std::path::Path;
use std::sync::Arc;

use pdfpane::assets::AssetLoader;
use pdfpane::constants::{FONT_FACES_ELEMENT_ID, LOCALE_LINK_TYPE};
use pdfpane::host::HostDocument;

fn fresh_document() -> Arc<HostDocument> {
    Arc::new(HostDocument::new())
}

#[test]
fn inject_adds_locale_link_and_font_faces() {
    let document = fresh_document();
    let mut loader = AssetLoader::new(document.clone());

    loader.inject(Path::new("/opt/viewer"));

    assert!(document.has_link_with_type(LOCALE_LINK_TYPE));
    assert!(document.has_element_with_id(FONT_FACES_ELEMENT_ID));
    assert_eq!(loader.injected_count(), 2);
}

#[test]
fn second_loader_skips_resources_already_in_head() {
    let document = fresh_document();
    let mut first = AssetLoader::new(document.clone());
    first.inject(Path::new("/opt/viewer"));

    let mut second = AssetLoader::new(document.clone());
    second.inject(Path::new("/opt/viewer"));

    assert_eq!(document.head_len(), 2);
    assert_eq!(second.injected_count(), 0);
}

#[test]
fn release_removes_only_own_nodes() {
    let document = fresh_document();
    let mut first = AssetLoader::new(document.clone());
    first.inject(Path::new("/opt/viewer"));

    let mut second = AssetLoader::new(document.clone());
    second.inject(Path::new("/opt/viewer"));
    second.release();

    // The first loader's nodes are untouched.
    assert!(document.has_link_with_type(LOCALE_LINK_TYPE));
    assert!(document.has_element_with_id(FONT_FACES_ELEMENT_ID));

    first.release();
    assert_eq!(document.head_len(), 0);
}

#[test]
fn release_twice_is_harmless() {
    let document = fresh_document();
    let mut loader = AssetLoader::new(document.clone());
    loader.inject(Path::new("/opt/viewer"));
    loader.release();
    loader.release();
    assert_eq!(document.head_len(), 0);
    assert_eq!(loader.injected_count(), 0);
}

#[test]
fn drop_releases_injected_nodes() {
    let document = fresh_document();
    {
        let mut loader = AssetLoader::new(document.clone());
        loader.inject(Path::new("/opt/viewer"));
        assert_eq!(document.head_len(), 2);
    }
    assert_eq!(document.head_len(), 0);
}
