//! Teardown ordering, completeness, and failure tolerance.

use std::sync::Arc;

use pdfpane::engine::ViewerApplication;
use pdfpane::host::{HostDocument, HostWindow};
use pdfpane::types::ViewerEvent;
use pdfpane::viewer::PdfViewerElement;

use crate::helpers::{
    MockEngineBuilder, assert_call_order, drain_events, mock_engine, mounted_viewer, new_element,
    options_with_source,
};

#[tokio::test]
async fn unmount_runs_the_steps_in_order() {
    let engine = mock_engine();
    let (mut element, _events) = mounted_viewer(&engine).await;

    let outcome = element.unmount();

    assert_call_order(
        engine.log(),
        &[
            "cleanup",
            "close",
            "unbind_window_events",
            "unbind_events",
            "clear_event_bus",
            "clear_surface",
        ],
    );
    assert_eq!(
        outcome.steps_run,
        vec![
            "cleanup",
            "close",
            "unbind_window_events",
            "unbind_events",
            "dispose_bus",
            "clear_refs",
            "clear_window_slots",
            "release_assets",
        ]
    );
    assert!(outcome.failures.is_empty());
    assert!(!element.is_mounted());
}

#[tokio::test]
async fn unmount_disposes_the_bus_and_clears_window_slots() {
    let engine = mock_engine();
    let window = Arc::new(HostWindow::new("example.test"));
    let document = Arc::new(HostDocument::new());
    let (mut element, _events) =
        PdfViewerElement::new(window.clone(), document.clone(), options_with_source());
    element.mount(&engine).await.expect("mount failed");

    let bus = engine.app().event_bus().expect("app had no bus");
    assert!(window.viewer_application().is_some());

    element.unmount();

    assert!(bus.is_disposed());
    assert!(window.viewer_application().is_none());
    assert!(window.engine_module().is_none());
    assert!(window.bootstrap().is_none());
    assert_eq!(document.head_len(), 0);
}

#[tokio::test]
async fn engine_events_after_unmount_never_reach_the_host() {
    let engine = mock_engine();
    let (mut element, events) = mounted_viewer(&engine).await;
    let app = engine.app();
    drain_events(&events);

    element.unmount();
    app.report_page(9);

    assert!(drain_events(&events).is_empty());
    assert_eq!(element.current_page(), 0);
}

#[tokio::test]
async fn failed_close_does_not_stop_the_remaining_steps() {
    let engine = MockEngineBuilder::new().fail_close().build();
    let (mut element, _events) = mounted_viewer(&engine).await;

    let outcome = element.unmount();

    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.steps_run.contains(&"unbind_events"));
    assert!(outcome.steps_run.contains(&"release_assets"));
    assert_call_order(engine.log(), &["cleanup", "close", "unbind_events"]);
    assert_eq!(element.host_document().head_len(), 0);
}

#[tokio::test]
async fn window_events_are_skipped_when_never_bound() {
    let engine = mock_engine();
    let (mut element, _events) = mounted_viewer(&engine).await;
    engine.app().unbind_window_events();
    let calls_before = engine.log().count("unbind_window_events");

    let outcome = element.unmount();

    assert_eq!(engine.log().count("unbind_window_events"), calls_before);
    assert!(!outcome.steps_run.contains(&"unbind_window_events"));
}

#[tokio::test]
async fn unmount_before_mount_is_safe() {
    let (mut element, _events) = new_element(options_with_source());

    let outcome = element.unmount();

    assert_eq!(outcome.steps_run, vec!["clear_window_slots", "release_assets"]);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn element_can_remount_after_unmount() {
    let first = mock_engine();
    let (mut element, events) = mounted_viewer(&first).await;
    element.unmount();
    drain_events(&events);

    let second = MockEngineBuilder::new().pages(8).build();
    element.mount(&second).await.expect("remount failed");

    assert!(element.is_mounted());
    assert_eq!(element.page_count(), 8);
    assert_eq!(second.app_count(), 1);
    assert!(
        drain_events(&events).contains(&ViewerEvent::DocumentOpened { page_count: 8 })
    );
    assert_eq!(element.host_document().head_len(), 2);
}

#[tokio::test]
async fn dropping_the_element_tears_down() {
    let engine = mock_engine();
    let (element, _events) = mounted_viewer(&engine).await;
    let bus = engine.app().event_bus().expect("app had no bus");

    drop(element);

    assert!(bus.is_disposed());
    assert!(engine.log().position("cleanup").is_some());
    assert!(engine.log().position("close").is_some());
}
