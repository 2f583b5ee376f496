//! The window-level slots the engine and viewer script populate.
//!
//! Instead of process globals, every slot lives on an injectable
//! handle owned by the element for its lifetime. Hosts embedding a
//! single viewer can use [`HostWindow::shared`].

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::engine::{BootstrapFn, EngineModule, ViewerApplication};

static SHARED_WINDOW: Lazy<Arc<HostWindow>> = Lazy::new(|| Arc::new(HostWindow::new("localhost")));

/// One host window: engine module slot, viewer application slot,
/// bootstrap function slot, and the page location.
pub struct HostWindow {
    /// Host part of the current page location, used for the
    /// same-document link test
    location_host: String,
    engine_module: Mutex<Option<Arc<dyn EngineModule>>>,
    viewer_application: Mutex<Option<Arc<dyn ViewerApplication>>>,
    bootstrap: Mutex<Option<BootstrapFn>>,
    bootstrap_installed: Notify,
}

impl HostWindow {
    pub fn new(location_host: impl Into<String>) -> Self {
        Self {
            location_host: location_host.into(),
            engine_module: Mutex::new(None),
            viewer_application: Mutex::new(None),
            bootstrap: Mutex::new(None),
            bootstrap_installed: Notify::new(),
        }
    }

    /// Process-wide default window for single-viewer hosts.
    pub fn shared() -> Arc<HostWindow> {
        SHARED_WINDOW.clone()
    }

    pub fn location_host(&self) -> &str {
        &self.location_host
    }

    // ------------------------------------------------------------------
    // Engine module slot
    // ------------------------------------------------------------------

    pub fn set_engine_module(&self, module: Arc<dyn EngineModule>) {
        *self.engine_module.lock() = Some(module);
    }

    pub fn engine_module(&self) -> Option<Arc<dyn EngineModule>> {
        self.engine_module.lock().clone()
    }

    pub fn clear_engine_module(&self) {
        *self.engine_module.lock() = None;
    }

    // ------------------------------------------------------------------
    // Viewer application slot
    // ------------------------------------------------------------------

    pub fn set_viewer_application(&self, app: Arc<dyn ViewerApplication>) {
        *self.viewer_application.lock() = Some(app);
    }

    pub fn viewer_application(&self) -> Option<Arc<dyn ViewerApplication>> {
        self.viewer_application.lock().clone()
    }

    pub fn clear_viewer_application(&self) {
        *self.viewer_application.lock() = None;
    }

    // ------------------------------------------------------------------
    // Bootstrap slot
    // ------------------------------------------------------------------

    /// Install the bootstrap function and wake anyone awaiting it.
    pub fn install_bootstrap(&self, bootstrap: BootstrapFn) {
        *self.bootstrap.lock() = Some(bootstrap);
        self.bootstrap_installed.notify_waiters();
    }

    pub fn bootstrap(&self) -> Option<BootstrapFn> {
        self.bootstrap.lock().clone()
    }

    pub fn clear_bootstrap(&self) {
        *self.bootstrap.lock() = None;
    }

    /// Resolve once the bootstrap function is installed.
    ///
    /// Checks the slot after registering for notification so an
    /// install racing this call cannot be missed.
    pub async fn wait_for_bootstrap(&self) -> BootstrapFn {
        loop {
            let notified = self.bootstrap_installed.notified();
            if let Some(bootstrap) = self.bootstrap() {
                return bootstrap;
            }
            notified.await;
        }
    }
}

impl std::fmt::Debug for HostWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostWindow")
            .field("location_host", &self.location_host)
            .field("engine_module", &self.engine_module.lock().is_some())
            .field(
                "viewer_application",
                &self.viewer_application.lock().is_some(),
            )
            .field("bootstrap", &self.bootstrap.lock().is_some())
            .finish()
    }
}
