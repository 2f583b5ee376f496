//! Viewer configuration.
//!
//! Options are plain serde data so hosts can persist them as JSON.
//! `ViewerOptions::load` falls back to defaults when the file is
//! missing or unreadable, logging instead of failing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::WORKER_SOURCE_PATH;
use crate::types::DocumentSource;

/// Configuration for a viewer element.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Document to open as soon as the engine is ready
    pub src: Option<DocumentSource>,
    /// 1-based page to show after the initial open
    pub page: u16,
    /// Location of the engine worker module
    pub worker_source: PathBuf,
    /// Whether the engine may use hardware acceleration
    pub enable_hw_acceleration: bool,
    /// Root of the static viewer assets (locale bundle, fonts)
    pub asset_root: PathBuf,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            src: None,
            page: 1,
            worker_source: PathBuf::from(WORKER_SOURCE_PATH),
            enable_hw_acceleration: true,
            asset_root: PathBuf::new(),
        }
    }
}

impl ViewerOptions {
    /// Load options from a JSON file, falling back to defaults on any
    /// failure.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(options) => options,
                Err(e) => {
                    tracing::warn!("Failed to parse options file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::debug!("No options file at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save options as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
