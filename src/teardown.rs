//! Ordered teardown of a mounted viewer.
//!
//! The step order matters: per-document cleanup happens while the
//! application is still fully wired, the document closes before
//! listeners go away, listeners go away before the references they
//! hang off are dropped, and injected resources leave last. Every
//! step is existence-guarded and failure-tolerant so a partially
//! constructed element still tears down as far as it got.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::assets::AssetLoader;
use crate::engine::ViewerApplication;
use crate::host::HostWindow;

/// What a teardown pass actually did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeardownOutcome {
    pub steps_run: Vec<&'static str>,
    pub failures: Vec<String>,
}

/// Run the full teardown sequence.
///
/// `app` is whatever the element holds at unmount time, possibly
/// nothing if the load never finished.
pub fn run(
    app: Option<Arc<dyn ViewerApplication>>,
    window: &HostWindow,
    assets: &mut AssetLoader,
) -> TeardownOutcome {
    let mut outcome = TeardownOutcome::default();

    if let Some(app) = app.as_deref() {
        app.cleanup();
        outcome.steps_run.push("cleanup");

        match app.close() {
            Ok(()) => outcome.steps_run.push("close"),
            Err(e) => {
                warn!("Document close failed during teardown: {}", e);
                outcome.failures.push(format!("close: {e}"));
            }
        }

        if app.has_bound_window_events() {
            app.unbind_window_events();
            outcome.steps_run.push("unbind_window_events");
        }

        app.unbind_events();
        outcome.steps_run.push("unbind_events");

        if let Some(bus) = app.event_bus() {
            bus.dispose();
            outcome.steps_run.push("dispose_bus");
        }
        app.clear_event_bus();

        app.clear_surface();
        outcome.steps_run.push("clear_refs");
    } else {
        debug!("Teardown with no application, skipping engine steps");
    }

    window.clear_viewer_application();
    window.clear_bootstrap();
    window.clear_engine_module();
    outcome.steps_run.push("clear_window_slots");

    assets.release();
    outcome.steps_run.push("release_assets");

    debug!("Teardown complete: {:?}", outcome.steps_run);
    outcome
}
