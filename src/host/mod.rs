//! Host environment the element is mounted into.
//!
//! The window holds the engine-global slots and the bootstrap
//! readiness signal; the document models the shared head the asset
//! loader injects into.

mod document;
mod window;

pub use document::{HeadNode, HeadNodeKind, HostDocument, NodeId};
pub use window::HostWindow;
