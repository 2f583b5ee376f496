//! Pdfium-backed engine implementation.
//!
//! Pdfium bindings are not thread-safe, so the library and the open
//! document live on a dedicated engine thread. The application handle
//! talks to it over a command channel and is itself `Send + Sync`.
//!
//! Library search order when the configured worker source does not
//! resolve:
//! 1. `lib/libpdfium.dylib` in the current working directory
//! 2. `lib/libpdfium.dylib` relative to the executable
//! 3. `Resources/lib/libpdfium.dylib` in a macOS bundle
//! 4. System library fallback

use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::constants::{
    DEFAULT_RENDER_WIDTH, ENGINE_STARTUP_TIMEOUT, EVENT_PAGE_CHANGE, EVENT_SCALE_CHANGE,
    MIN_RENDER_WIDTH, WORKER_SOURCE_PATH,
};
use crate::engine::{
    BootstrapFn, BootstrapOptions, EngineModule, EngineProvider, RenderingSurface,
    ViewerApplication,
};
use crate::error::{ViewerError, ViewerResult};
use crate::events::{EventBus, EventPayload};
use crate::host::HostWindow;
use crate::types::DocumentSource;

use async_trait::async_trait;
use parking_lot::Mutex;

// ============================================================================
// Engine Module
// ============================================================================

/// Module-level state of the pdfium engine: just the worker source.
pub struct PdfiumEngineModule {
    worker_source: Mutex<PathBuf>,
}

impl PdfiumEngineModule {
    pub fn new() -> Self {
        Self {
            worker_source: Mutex::new(PathBuf::from(WORKER_SOURCE_PATH)),
        }
    }
}

impl Default for PdfiumEngineModule {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineModule for PdfiumEngineModule {
    fn set_worker_source(&self, path: &Path) {
        *self.worker_source.lock() = path.to_path_buf();
    }

    fn worker_source(&self) -> PathBuf {
        self.worker_source.lock().clone()
    }
}

// ============================================================================
// Engine Thread
// ============================================================================

enum EngineCommand {
    Open {
        source: DocumentSource,
        reply: mpsc::Sender<ViewerResult<u16>>,
    },
    SetPage {
        page: u16,
    },
    SetScale {
        value: String,
    },
    RenderPage {
        page: u16,
        width: u32,
        reply: mpsc::Sender<ViewerResult<image::DynamicImage>>,
    },
    Close {
        reply: mpsc::Sender<ViewerResult<()>>,
    },
    Shutdown,
}

/// State the engine thread publishes for cheap synchronous reads.
struct EngineState {
    current_page: AtomicU16,
    page_count: AtomicU16,
}

impl EngineState {
    fn new() -> Self {
        Self {
            current_page: AtomicU16::new(0),
            page_count: AtomicU16::new(0),
        }
    }
}

fn resolve_library_paths(worker_source: &Path) -> Vec<PathBuf> {
    let mut paths = vec![worker_source.to_path_buf()];

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("lib/libpdfium.dylib"));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            paths.push(parent.join("lib/libpdfium.dylib"));

            if let Some(grandparent) = parent.parent() {
                paths.push(grandparent.join("Resources/lib/libpdfium.dylib"));
            }
        }
    }

    paths
}

fn bind_pdfium(worker_source: &Path) -> Result<Pdfium, String> {
    for path in resolve_library_paths(worker_source) {
        if path.exists() {
            if let Ok(bindings) = Pdfium::bind_to_library(&path) {
                debug!("Bound pdfium from {}", path.display());
                return Ok(Pdfium::new(bindings));
            }
        }
    }
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| format!("Failed to load pdfium: {:?}", e))
}

fn engine_thread_main(
    worker_source: PathBuf,
    startup_tx: mpsc::Sender<Result<(), String>>,
    command_rx: mpsc::Receiver<EngineCommand>,
    shutdown_flag: Arc<AtomicBool>,
    state: Arc<EngineState>,
    bus: Arc<EventBus>,
) {
    let pdfium = match bind_pdfium(&worker_source) {
        Ok(p) => {
            let _ = startup_tx.send(Ok(()));
            p
        }
        Err(e) => {
            error!("Engine thread failed to start: {}", e);
            let _ = startup_tx.send(Err(e));
            return;
        }
    };

    let mut document: Option<PdfDocument> = None;

    loop {
        if shutdown_flag.load(Ordering::Relaxed) {
            break;
        }

        let command = match command_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(c) => c,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        match command {
            EngineCommand::Open { source, reply } => {
                let result = open_document(&pdfium, &source);
                match result {
                    Ok(doc) => {
                        let page_count = doc.pages().len();
                        document = Some(doc);
                        state.page_count.store(page_count, Ordering::Release);
                        state.current_page.store(1, Ordering::Release);
                        let _ = reply.send(Ok(page_count));
                        bus.dispatch(
                            EVENT_PAGE_CHANGE,
                            &EventPayload::PageChange { page_number: 1 },
                        );
                    }
                    Err(e) => {
                        let _ = reply.send(Err(e));
                    }
                }
            }
            EngineCommand::SetPage { page } => {
                let page_count = state.page_count.load(Ordering::Acquire);
                if document.is_none() || page_count == 0 {
                    warn!("Page change requested with no document open");
                    continue;
                }
                let page = page.clamp(1, page_count);
                state.current_page.store(page, Ordering::Release);
                bus.dispatch(
                    EVENT_PAGE_CHANGE,
                    &EventPayload::PageChange { page_number: page },
                );
            }
            EngineCommand::SetScale { value } => {
                // Preset values carry no intrinsic factor; numeric
                // values report themselves.
                let scale = value.parse::<f32>().unwrap_or(1.0);
                bus.dispatch(
                    EVENT_SCALE_CHANGE,
                    &EventPayload::ScaleChange {
                        preset_value: Some(value),
                        scale,
                    },
                );
            }
            EngineCommand::RenderPage { page, width, reply } => {
                let result = match document.as_ref() {
                    Some(doc) => render_page(doc, page, width),
                    None => Err(ViewerError::NoDocument),
                };
                let _ = reply.send(result);
            }
            EngineCommand::Close { reply } => {
                document = None;
                state.page_count.store(0, Ordering::Release);
                state.current_page.store(0, Ordering::Release);
                let _ = reply.send(Ok(()));
            }
            EngineCommand::Shutdown => break,
        }
    }

    drop(document);
    debug!("Engine thread exited");
}

fn open_document<'a>(
    pdfium: &'a Pdfium,
    source: &DocumentSource,
) -> ViewerResult<PdfDocument<'a>> {
    match source {
        DocumentSource::Path { path } => pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ViewerError::Open(anyhow::anyhow!("{:?}", e))),
        DocumentSource::Bytes { data } => pdfium
            .load_pdf_from_byte_vec(data.clone(), None)
            .map_err(|e| ViewerError::Open(anyhow::anyhow!("{:?}", e))),
        DocumentSource::Url { url } => Err(ViewerError::Open(anyhow::anyhow!(
            "url sources are not supported by the pdfium backend: {url}"
        ))),
    }
}

fn render_page(
    document: &PdfDocument<'_>,
    page: u16,
    width: u32,
) -> ViewerResult<image::DynamicImage> {
    let page_count = document.pages().len();
    if page == 0 || page > page_count {
        return Err(ViewerError::Other(format!(
            "Page {} out of range 1..={}",
            page, page_count
        )));
    }
    let width = width.max(MIN_RENDER_WIDTH);
    let pdf_page = document
        .pages()
        .get(page - 1)
        .map_err(|e| ViewerError::Other(format!("Failed to get page {}: {:?}", page, e)))?;
    let config = PdfRenderConfig::new().set_target_width(width as i32);
    pdf_page
        .render_with_config(&config)
        .map(|bitmap| bitmap.as_image())
        .map_err(|e| ViewerError::Other(format!("Failed to render page {}: {:?}", page, e)))
}

// ============================================================================
// Rendering Surface
// ============================================================================

struct PdfiumSurface {
    command_tx: mpsc::Sender<EngineCommand>,
    scale_value: Mutex<Option<String>>,
}

impl RenderingSurface for PdfiumSurface {
    fn set_current_scale_value(&self, value: &str) {
        *self.scale_value.lock() = Some(value.to_string());
        if self
            .command_tx
            .send(EngineCommand::SetScale {
                value: value.to_string(),
            })
            .is_err()
        {
            warn!("Scale change dropped, engine thread is gone");
        }
    }

    fn current_scale_value(&self) -> Option<String> {
        self.scale_value.lock().clone()
    }
}

// ============================================================================
// Viewer Application
// ============================================================================

/// Application handle over the engine thread.
pub struct PdfiumViewerApplication {
    command_tx: mpsc::Sender<EngineCommand>,
    shutdown_flag: Arc<AtomicBool>,
    engine_thread: Mutex<Option<JoinHandle<()>>>,
    state: Arc<EngineState>,
    bus: Mutex<Option<Arc<EventBus>>>,
    surface: Mutex<Option<Arc<dyn RenderingSurface>>>,
    embedded: AtomicBool,
    bound_window_events: AtomicBool,
}

impl PdfiumViewerApplication {
    fn start(options: &BootstrapOptions) -> ViewerResult<Arc<Self>> {
        let (command_tx, command_rx) = mpsc::channel();
        let (startup_tx, startup_rx) = mpsc::channel();
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let state = Arc::new(EngineState::new());

        let worker_source = options.worker_source.clone();
        let thread_shutdown = shutdown_flag.clone();
        let thread_state = state.clone();
        let thread_bus = options.event_bus.clone();

        let engine_thread = thread::spawn(move || {
            engine_thread_main(
                worker_source,
                startup_tx,
                command_rx,
                thread_shutdown,
                thread_state,
                thread_bus,
            );
        });

        match startup_rx.recv_timeout(ENGINE_STARTUP_TIMEOUT) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(ViewerError::ModuleLoad(e)),
            Err(_) => return Err(ViewerError::Worker("engine startup timeout".into())),
        }

        let surface = Arc::new(PdfiumSurface {
            command_tx: command_tx.clone(),
            scale_value: Mutex::new(None),
        });

        Ok(Arc::new(Self {
            command_tx,
            shutdown_flag,
            engine_thread: Mutex::new(Some(engine_thread)),
            state,
            bus: Mutex::new(Some(options.event_bus.clone())),
            surface: Mutex::new(Some(surface)),
            embedded: AtomicBool::new(false),
            bound_window_events: AtomicBool::new(true),
        }))
    }

    fn send(&self, command: EngineCommand) -> ViewerResult<()> {
        self.command_tx
            .send(command)
            .map_err(|_| ViewerError::Worker("engine thread is gone".into()))
    }
}

impl ViewerApplication for PdfiumViewerApplication {
    fn open(&self, source: &DocumentSource) -> ViewerResult<u16> {
        debug!("Opening document {}", source.describe());
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(EngineCommand::Open {
            source: source.clone(),
            reply: reply_tx,
        })?;
        reply_rx
            .recv_timeout(ENGINE_STARTUP_TIMEOUT)
            .map_err(|_| ViewerError::Worker("open reply timeout".into()))?
    }

    fn page(&self) -> u16 {
        self.state.current_page.load(Ordering::Acquire)
    }

    fn set_page(&self, page: u16) -> ViewerResult<()> {
        if self.state.page_count.load(Ordering::Acquire) == 0 {
            return Err(ViewerError::NoDocument);
        }
        self.send(EngineCommand::SetPage { page })
    }

    fn page_count(&self) -> u16 {
        self.state.page_count.load(Ordering::Acquire)
    }

    fn render_page(&self, page: u16, width: u32) -> ViewerResult<image::DynamicImage> {
        let width = if width == 0 { DEFAULT_RENDER_WIDTH } else { width };
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(EngineCommand::RenderPage {
            page,
            width,
            reply: reply_tx,
        })?;
        reply_rx
            .recv_timeout(ENGINE_STARTUP_TIMEOUT)
            .map_err(|_| ViewerError::Worker("render reply timeout".into()))?
    }

    fn cleanup(&self) {
        debug!("Engine cleanup requested");
    }

    fn close(&self) -> ViewerResult<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(EngineCommand::Close { reply: reply_tx })?;
        reply_rx
            .recv_timeout(ENGINE_STARTUP_TIMEOUT)
            .map_err(|_| ViewerError::Worker("close reply timeout".into()))?
    }

    fn has_bound_window_events(&self) -> bool {
        self.bound_window_events.load(Ordering::Acquire)
    }

    fn unbind_window_events(&self) {
        self.bound_window_events.store(false, Ordering::Release);
    }

    fn unbind_events(&self) {
        // Internal listeners all ride the bus; nothing extra to drop.
    }

    fn event_bus(&self) -> Option<Arc<EventBus>> {
        self.bus.lock().clone()
    }

    fn clear_event_bus(&self) {
        *self.bus.lock() = None;
    }

    fn set_embedded(&self, embedded: bool) {
        self.embedded.store(embedded, Ordering::Release);
    }

    fn is_embedded(&self) -> bool {
        self.embedded.load(Ordering::Acquire)
    }

    fn surface(&self) -> Option<Arc<dyn RenderingSurface>> {
        self.surface.lock().clone()
    }

    fn clear_surface(&self) {
        *self.surface.lock() = None;
    }
}

impl Drop for PdfiumViewerApplication {
    fn drop(&mut self) {
        self.shutdown_flag.store(true, Ordering::Relaxed);
        let _ = self.command_tx.send(EngineCommand::Shutdown);
        if let Some(handle) = self.engine_thread.lock().take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// Engine Provider
// ============================================================================

/// Provider wiring the pdfium module and bootstrap into a host window.
pub struct PdfiumEngineProvider;

impl PdfiumEngineProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfiumEngineProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineProvider for PdfiumEngineProvider {
    async fn load_module(&self, window: Arc<HostWindow>) -> ViewerResult<()> {
        window.set_engine_module(Arc::new(PdfiumEngineModule::new()));
        Ok(())
    }

    async fn install_viewer(&self, window: Arc<HostWindow>) -> ViewerResult<()> {
        let bootstrap: BootstrapFn = Arc::new(|options: BootstrapOptions| {
            let app = PdfiumViewerApplication::start(&options)?;
            if let Some(source) = &options.default_document {
                app.open(source)?;
            }
            Ok(app as Arc<dyn ViewerApplication>)
        });
        window.install_bootstrap(bootstrap);
        Ok(())
    }
}
