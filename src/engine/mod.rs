//! Boundary between the element and the rendering engine.
//!
//! Everything the bridge needs from the engine sits behind these
//! traits, so tests drive the full lifecycle against mocks and hosts
//! can swap rendering backends. The pdfium-backed implementation
//! lives in [`pdfium`].

pub mod pdfium;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ViewerResult;
use crate::events::EventBus;
use crate::host::HostWindow;
use crate::types::DocumentSource;

/// The engine library module, acquired before anything else.
///
/// Its one lifecycle-relevant job is carrying the worker-source
/// location, which must be set before any document is opened.
pub trait EngineModule: Send + Sync {
    fn set_worker_source(&self, path: &Path);
    fn worker_source(&self) -> PathBuf;
}

/// The render surface inside a running viewer application.
pub trait RenderingSurface: Send + Sync {
    /// Ask the surface to adopt a preset or numeric scale value.
    /// The engine confirms asynchronously via a scale-change event.
    fn set_current_scale_value(&self, value: &str);
    fn current_scale_value(&self) -> Option<String>;
}

/// A running viewer application produced by the bootstrap function.
pub trait ViewerApplication: Send + Sync {
    /// Open a document, replacing any currently open one.
    /// Returns the page count on success.
    fn open(&self, source: &DocumentSource) -> ViewerResult<u16>;

    /// 1-based page the engine last settled on, 0 before any open
    fn page(&self) -> u16;

    /// Request a page change. The new page is confirmed via a
    /// page-change event, not by this call returning.
    fn set_page(&self, page: u16) -> ViewerResult<()>;

    fn page_count(&self) -> u16;

    /// Render one page to a bitmap of the given pixel width.
    fn render_page(&self, page: u16, width: u32) -> ViewerResult<image::DynamicImage>;

    /// Release per-document resources without closing the application
    fn cleanup(&self);

    /// Close the open document
    fn close(&self) -> ViewerResult<()>;

    /// Whether window-level listeners were ever bound
    fn has_bound_window_events(&self) -> bool;
    fn unbind_window_events(&self);

    /// Unbind the application's own internal listeners
    fn unbind_events(&self);

    fn event_bus(&self) -> Option<Arc<EventBus>>;
    fn clear_event_bus(&self);

    /// Embedded mode suppresses the engine's own chrome
    fn set_embedded(&self, embedded: bool);
    fn is_embedded(&self) -> bool;

    fn surface(&self) -> Option<Arc<dyn RenderingSurface>>;
    fn clear_surface(&self);
}

/// Configuration handed to the bootstrap function.
#[derive(Clone)]
pub struct BootstrapOptions {
    /// Id of the container the viewer renders into
    pub container_id: String,
    /// Worker-source location, already applied to the engine module
    pub worker_source: PathBuf,
    /// Document to open immediately, or none
    pub default_document: Option<DocumentSource>,
    /// Whether the engine may use hardware acceleration
    pub enable_hw_acceleration: bool,
    /// Bus the application must report page and scale changes on
    pub event_bus: Arc<EventBus>,
}

impl std::fmt::Debug for BootstrapOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapOptions")
            .field("container_id", &self.container_id)
            .field("worker_source", &self.worker_source)
            .field("default_document", &self.default_document)
            .field("enable_hw_acceleration", &self.enable_hw_acceleration)
            .finish()
    }
}

/// Function installed by the viewer script. Invoking it builds the
/// viewer application.
pub type BootstrapFn =
    Arc<dyn Fn(BootstrapOptions) -> Result<Arc<dyn ViewerApplication>, anyhow::Error> + Send + Sync>;

/// Source of the engine module and the viewer script.
///
/// `load_module` populates the window's engine-module slot;
/// `install_viewer` runs the viewer script, which installs the
/// bootstrap function into the window (possibly a beat later than
/// this call returns).
#[async_trait]
pub trait EngineProvider: Send + Sync {
    async fn load_module(&self, window: Arc<HostWindow>) -> ViewerResult<()>;
    async fn install_viewer(&self, window: Arc<HostWindow>) -> ViewerResult<()>;
}
