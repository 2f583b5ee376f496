//! Error types for viewer lifecycle operations
//!
//! Provides unified error handling for engine loading, document opening,
//! and the bridge's state synchronization paths.

use thiserror::Error;

/// Errors that can occur while loading or driving the embedded viewer
#[derive(Error, Debug)]
pub enum ViewerError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendering-engine module could not be acquired
    #[error("Engine module failed to load: {0}")]
    ModuleLoad(String),

    /// The viewer script never installed its bootstrap function,
    /// even after the one deferred retry and the bounded readiness wait
    #[error("Viewer bootstrap function never became available")]
    BootstrapUnavailable,

    /// The bootstrap function was invoked but failed to produce an application
    #[error("Viewer bootstrap failed: {0}")]
    Bootstrap(String),

    /// Document open failure, propagated opaquely from the engine
    #[error("Document open failed: {0}")]
    Open(#[source] anyhow::Error),

    /// The engine worker thread is gone or not responding
    #[error("Engine worker unavailable: {0}")]
    Worker(String),

    /// Operation requires an open document
    #[error("No document is open")]
    NoDocument,

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

impl From<String> for ViewerError {
    fn from(s: String) -> Self {
        ViewerError::Other(s)
    }
}

impl From<&str> for ViewerError {
    fn from(s: &str) -> Self {
        ViewerError::Other(s.to_string())
    }
}
