//! Embeddable PDF viewer element.
//!
//! Bridges a host application and a rendering engine: ordered engine
//! acquisition, document lifecycle, bidirectional page and scale
//! state, link interception, and leak-free teardown. The engine sits
//! behind traits in [`engine`]; a pdfium-backed implementation ships
//! in [`engine::pdfium`].

pub mod assets;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod loader;
pub mod options;
pub mod teardown;
pub mod toolbar;
pub mod types;
pub mod viewer;

pub use error::{ViewerError, ViewerResult};
pub use options::ViewerOptions;
pub use types::{DocumentSource, ScalePreset, ViewerEvent};
pub use viewer::PdfViewerElement;
