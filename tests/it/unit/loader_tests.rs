//! Tests for the engine acquisition sequence and its retry behavior.

use std::sync::Arc;

use pdfpane::ViewerOptions;
use pdfpane::error::ViewerError;
use pdfpane::host::HostWindow;
use pdfpane::loader::{EngineLoader, LoadState};

use crate::helpers::{BootstrapTiming, MockEngineBuilder, assert_call_order, mock_engine};

fn fresh_loader() -> EngineLoader {
    EngineLoader::new(Arc::new(HostWindow::new("example.test")))
}

#[tokio::test]
async fn load_runs_the_sequence_in_order() {
    let engine = mock_engine();
    let mut loader = fresh_loader();
    assert_eq!(loader.state(), LoadState::NotLoaded);

    let bootstrap = loader
        .load(&engine, &ViewerOptions::default())
        .await
        .expect("load failed");

    assert_eq!(loader.state(), LoadState::Ready);
    assert_call_order(
        engine.log(),
        &["load_module", "set_worker_source", "install_viewer"],
    );
    drop(bootstrap);
}

#[tokio::test]
async fn worker_source_comes_from_options() {
    let engine = mock_engine();
    let mut loader = fresh_loader();
    let options = ViewerOptions {
        worker_source: "/custom/worker".into(),
        ..ViewerOptions::default()
    };

    loader.load(&engine, &options).await.expect("load failed");

    assert!(
        engine
            .log()
            .calls()
            .contains(&"set_worker_source:/custom/worker".to_string())
    );
}

#[tokio::test]
async fn deferred_retry_runs_the_full_sequence_again() {
    let engine = MockEngineBuilder::new()
        .bootstrap_timing(BootstrapTiming::OnSecondAttempt)
        .build();
    let mut loader = fresh_loader();

    loader
        .load(&engine, &ViewerOptions::default())
        .await
        .expect("load failed");

    assert_eq!(loader.state(), LoadState::Ready);
    assert_eq!(engine.log().count("load_module"), 2);
    assert_eq!(engine.log().count("install_viewer"), 2);
}

#[tokio::test(start_paused = true)]
async fn bounded_wait_catches_a_late_bootstrap() {
    let engine = MockEngineBuilder::new()
        .bootstrap_timing(BootstrapTiming::Deferred)
        .build();
    let mut loader = fresh_loader();

    loader
        .load(&engine, &ViewerOptions::default())
        .await
        .expect("load failed");

    assert_eq!(loader.state(), LoadState::Ready);
}

#[tokio::test(start_paused = true)]
async fn missing_bootstrap_fails_after_the_bounded_wait() {
    let engine = MockEngineBuilder::new()
        .bootstrap_timing(BootstrapTiming::Never)
        .build();
    let mut loader = fresh_loader();

    let result = loader.load(&engine, &ViewerOptions::default()).await;

    assert!(matches!(result, Err(ViewerError::BootstrapUnavailable)));
    assert_eq!(loader.state(), LoadState::Failed);
}

#[tokio::test]
async fn module_failure_stops_the_sequence() {
    let engine = MockEngineBuilder::new().fail_module().build();
    let mut loader = fresh_loader();

    let result = loader.load(&engine, &ViewerOptions::default()).await;

    assert!(matches!(result, Err(ViewerError::ModuleLoad(_))));
    assert_eq!(loader.state(), LoadState::Failed);
    assert_eq!(engine.log().count("install_viewer"), 0);
}
