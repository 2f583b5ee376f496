//! The viewer element: the bridge between a host and the engine.
//!
//! Owns the load sequence, the event wiring, the observed engine
//! state, and teardown. State flows both ways: host intents (open a
//! document, change page, toggle zoom) go down to the engine, and the
//! engine's settled state comes back up through bus events before it
//! is ever reflected to the host.

pub mod links;

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assets::AssetLoader;
use crate::constants::{EVENT_PAGE_CHANGE, EVENT_SCALE_CHANGE, EVENT_SURFACE_CLICK};
use crate::engine::{BootstrapOptions, EngineProvider, ViewerApplication};
use crate::error::{ViewerError, ViewerResult};
use crate::events::{EventBus, EventPayload, ListenerId};
use crate::host::{HostDocument, HostWindow};
use crate::loader::EngineLoader;
use crate::options::ViewerOptions;
use crate::teardown::{self, TeardownOutcome};
use crate::types::{DocumentSource, ScalePreset, ViewerEvent};
use crate::viewer::links::LinkDecision;

/// Engine state the element mirrors. Written only from bus handlers,
/// which may run on the engine thread.
struct ObservedState {
    current_page: AtomicU16,
    page_count: AtomicU16,
    scale_preset: Mutex<ScalePreset>,
    scale: Mutex<f32>,
}

impl ObservedState {
    fn new() -> Self {
        Self {
            current_page: AtomicU16::new(0),
            page_count: AtomicU16::new(0),
            scale_preset: Mutex::new(ScalePreset::Custom),
            scale: Mutex::new(1.0),
        }
    }
}

/// An embeddable document viewer.
///
/// Construct with [`PdfViewerElement::new`], then [`mount`] with an
/// engine provider. Outward notifications arrive on the receiver
/// returned at construction.
///
/// [`mount`]: PdfViewerElement::mount
pub struct PdfViewerElement {
    container_id: String,
    window: Arc<HostWindow>,
    host_document: Arc<HostDocument>,
    options: ViewerOptions,
    assets: AssetLoader,
    app: Option<Arc<dyn ViewerApplication>>,
    bus: Option<Arc<EventBus>>,
    registrations: Vec<(&'static str, ListenerId)>,
    observed: Arc<ObservedState>,
    events_tx: mpsc::Sender<ViewerEvent>,
}

impl PdfViewerElement {
    pub fn new(
        window: Arc<HostWindow>,
        host_document: Arc<HostDocument>,
        options: ViewerOptions,
    ) -> (Self, mpsc::Receiver<ViewerEvent>) {
        let (events_tx, events_rx) = mpsc::channel();
        let assets = AssetLoader::new(host_document.clone());
        let element = Self {
            container_id: format!("pdf-viewer-{}", Uuid::new_v4()),
            window,
            host_document,
            options,
            assets,
            app: None,
            bus: None,
            registrations: Vec::new(),
            observed: Arc::new(ObservedState::new()),
            events_tx,
        };
        (element, events_rx)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn host_document(&self) -> &Arc<HostDocument> {
        &self.host_document
    }

    /// Bring the element up: inject assets, acquire the engine, wire
    /// the event bus, bootstrap the application, and open the
    /// configured document if any.
    pub async fn mount(&mut self, provider: &dyn EngineProvider) -> ViewerResult<()> {
        if self.app.is_some() {
            return Err(ViewerError::Other("element is already mounted".into()));
        }

        self.assets.inject(&self.options.asset_root);

        let mut loader = EngineLoader::new(self.window.clone());
        let bootstrap = loader.load(provider, &self.options).await?;

        let bus = Arc::new(EventBus::new());
        self.wire_bus(&bus);

        let bootstrap_options = BootstrapOptions {
            container_id: self.container_id.clone(),
            worker_source: self.options.worker_source.clone(),
            default_document: self.options.src.clone(),
            enable_hw_acceleration: self.options.enable_hw_acceleration,
            event_bus: bus.clone(),
        };
        let app =
            (*bootstrap)(bootstrap_options).map_err(|e| ViewerError::Bootstrap(e.to_string()))?;

        app.set_embedded(true);
        self.window.set_viewer_application(app.clone());

        if self.options.src.is_some() {
            let page_count = app.page_count();
            self.observed.page_count.store(page_count, Ordering::Release);
            let _ = self.events_tx.send(ViewerEvent::DocumentOpened { page_count });
            if self.options.page > 1 {
                app.set_page(self.options.page)?;
            }
        }

        self.bus = Some(bus);
        self.app = Some(app);
        info!("Viewer mounted, container {}", self.container_id);
        Ok(())
    }

    fn wire_bus(&mut self, bus: &Arc<EventBus>) {
        // Stale ids from a failed earlier mount point at a bus that no
        // longer exists.
        self.registrations.clear();

        let observed = self.observed.clone();
        let events_tx = self.events_tx.clone();
        let page_listener = bus.on(EVENT_PAGE_CHANGE, move |payload| {
            if let EventPayload::PageChange { page_number } = payload {
                observed.current_page.store(*page_number, Ordering::Release);
                let _ = events_tx.send(ViewerEvent::PageChanged { page: *page_number });
            }
        });
        self.registrations.push((EVENT_PAGE_CHANGE, page_listener));

        let observed = self.observed.clone();
        let events_tx = self.events_tx.clone();
        let scale_listener = bus.on(EVENT_SCALE_CHANGE, move |payload| {
            if let EventPayload::ScaleChange { preset_value, scale } = payload {
                let preset = ScalePreset::from_value(preset_value.as_deref());
                *observed.scale_preset.lock() = preset;
                *observed.scale.lock() = *scale;
                let _ = events_tx.send(ViewerEvent::ScaleChanged {
                    preset,
                    scale: *scale,
                });
            }
        });
        self.registrations.push((EVENT_SCALE_CHANGE, scale_listener));

        let events_tx = self.events_tx.clone();
        let location_host = self.window.location_host().to_string();
        let click_listener = bus.on(EVENT_SURFACE_CLICK, move |payload| {
            if let EventPayload::SurfaceClick { path } = payload {
                match links::classify_click(path, &location_host) {
                    LinkDecision::SameDocument { destination } => {
                        // The engine scrolls to internal anchors itself.
                        debug!("Swallowed same-document link to {}", destination);
                    }
                    LinkDecision::External { destination } => {
                        let _ = events_tx.send(ViewerEvent::LinkActivated { destination });
                    }
                    LinkDecision::NotALink => {}
                }
            }
        });
        self.registrations.push((EVENT_SURFACE_CLICK, click_listener));
    }

    /// Open a document, replacing the current one.
    pub fn set_src(&mut self, source: DocumentSource) -> ViewerResult<u16> {
        let app = self.app.as_ref().ok_or(ViewerError::NoDocument)?;
        let page_count = app.open(&source)?;
        self.observed.page_count.store(page_count, Ordering::Release);
        self.options.src = Some(source);
        let _ = self.events_tx.send(ViewerEvent::DocumentOpened { page_count });
        Ok(page_count)
    }

    /// Request a page change. The mirrored page updates only once the
    /// engine reports it.
    pub fn set_page(&self, page: u16) -> ViewerResult<()> {
        let app = self.app.as_ref().ok_or(ViewerError::NoDocument)?;
        app.set_page(page)
    }

    /// Page the engine last reported, 0 before any document opened
    pub fn current_page(&self) -> u16 {
        self.observed.current_page.load(Ordering::Acquire)
    }

    pub fn page_count(&self) -> u16 {
        self.observed.page_count.load(Ordering::Acquire)
    }

    /// Scale preset the engine last reported
    pub fn scale_preset(&self) -> ScalePreset {
        *self.observed.scale_preset.lock()
    }

    pub fn scale(&self) -> f32 {
        *self.observed.scale.lock()
    }

    /// Flip between page-fit and page-width. The observed preset
    /// updates when the engine confirms with a scale-change event.
    pub fn toggle_scale_preset(&self) -> ViewerResult<()> {
        let app = self.app.as_ref().ok_or(ViewerError::NoDocument)?;
        let surface = app
            .surface()
            .ok_or_else(|| ViewerError::Other("viewer has no render surface".into()))?;
        let target = self.scale_preset().toggled();
        match target.as_value() {
            Some(value) => {
                surface.set_current_scale_value(value);
                Ok(())
            }
            None => Err(ViewerError::Other("toggle target has no preset value".into())),
        }
    }

    /// Render the current document's page to a bitmap.
    pub fn render_page(&self, page: u16, width: u32) -> ViewerResult<image::DynamicImage> {
        let app = self.app.as_ref().ok_or(ViewerError::NoDocument)?;
        app.render_page(page, width)
    }

    /// Whether the element currently holds a live application.
    pub fn is_mounted(&self) -> bool {
        self.app.is_some()
    }

    /// Tear the element down. Safe to call at any point in the
    /// lifecycle, including after a failed mount.
    pub fn unmount(&mut self) -> TeardownOutcome {
        // Remove this element's own listeners before the bus goes away.
        if let Some(bus) = &self.bus {
            for (event, id) in self.registrations.drain(..) {
                bus.off(event, id);
            }
        } else {
            self.registrations.clear();
        }

        let outcome = teardown::run(self.app.take(), &self.window, &mut self.assets);
        if !outcome.failures.is_empty() {
            warn!("Teardown finished with failures: {:?}", outcome.failures);
        }
        self.bus = None;
        self.observed.current_page.store(0, Ordering::Release);
        self.observed.page_count.store(0, Ordering::Release);
        *self.observed.scale_preset.lock() = ScalePreset::Custom;
        outcome
    }
}

impl Drop for PdfViewerElement {
    fn drop(&mut self) {
        if self.app.is_some() {
            self.unmount();
        }
    }
}
