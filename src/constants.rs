//! Constants shared across the viewer lifecycle.
//!
//! Resource identifiers and event names mirror what the rendering
//! engine's viewer script expects; timing values bound the waits the
//! loader and the engine worker perform.

// ============================================================================
// Injected Resources
// ============================================================================

/// `rel` attribute of the locale resource link
pub const LOCALE_LINK_REL: &str = "resource";

/// `type` attribute distinguishing the locale link from other links
pub const LOCALE_LINK_TYPE: &str = "application/l10n";

/// Default path of the locale properties bundle
pub const LOCALE_RESOURCE_PATH: &str = "pdf-assets/locale/locale.properties";

/// Element id of the injected font-face style block
pub const FONT_FACES_ELEMENT_ID: &str = "pdfViewerFontFaces";

/// Path of the regular-weight viewer font
pub const FONT_BOOK_PATH: &str = "pdf-assets/fonts/CircularStd-Book.woff";

/// Path of the medium-weight viewer font
pub const FONT_MEDIUM_PATH: &str = "pdf-assets/fonts/CircularStd-Medium.woff";

/// Default location of the engine worker module
pub const WORKER_SOURCE_PATH: &str = "pdf-assets/pdf-worker";

// ============================================================================
// Event Names
// ============================================================================

/// Emitted by the engine after it settles on a page
pub const EVENT_PAGE_CHANGE: &str = "pagechange";

/// Emitted by the engine after the display scale changes
pub const EVENT_SCALE_CHANGE: &str = "scalechange";

/// Raised by the render surface when the user clicks inside it
pub const EVENT_SURFACE_CLICK: &str = "click";

// ============================================================================
// Scale Presets
// ============================================================================

/// Preset value that fits the whole page in the surface
pub const SCALE_VALUE_PAGE_FIT: &str = "page-fit";

/// Preset value that fits the page width to the surface
pub const SCALE_VALUE_PAGE_WIDTH: &str = "page-width";

// ============================================================================
// Link Interception
// ============================================================================

/// Class carried by annotation-layer link containers
pub const LINK_ANNOTATION_CLASS: &str = "linkAnnotation";

// ============================================================================
// Timing
// ============================================================================

/// How long the loader waits for the viewer script to install its
/// bootstrap function after the deferred retry
pub const BOOTSTRAP_WAIT: std::time::Duration = std::time::Duration::from_secs(2);

/// How long engine-thread startup may take before it is reported dead
pub const ENGINE_STARTUP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

// ============================================================================
// Rendering
// ============================================================================

/// Smallest bitmap width the engine will render a page at
pub const MIN_RENDER_WIDTH: u32 = 800;

/// Bitmap width used when the caller does not specify one
pub const DEFAULT_RENDER_WIDTH: u32 = 2000;
