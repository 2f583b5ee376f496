//! Core types for the viewer element.
//!
//! Defines the document sources the element can open, the scale presets
//! the toolbar toggles between, and the outward event stream a host
//! consumes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{SCALE_VALUE_PAGE_FIT, SCALE_VALUE_PAGE_WIDTH};

// ============================================================================
// Document Sources
// ============================================================================

/// Where a document comes from.
///
/// `Bytes` serializes as base64 so option files and snapshots stay
/// printable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentSource {
    /// A document on the local filesystem
    Path { path: PathBuf },
    /// A document already held in memory
    Bytes {
        #[serde(
            serialize_with = "serialize_base64",
            deserialize_with = "deserialize_base64"
        )]
        data: Vec<u8>,
    },
    /// A document addressed by URL, fetched by the engine
    Url { url: String },
}

impl DocumentSource {
    /// Short human-readable description for logs
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Path { path } => format!("path:{}", path.display()),
            DocumentSource::Bytes { data } => format!("bytes:{}b", data.len()),
            DocumentSource::Url { url } => format!("url:{url}"),
        }
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        DocumentSource::Path { path }
    }
}

fn serialize_base64<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn deserialize_base64<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    BASE64.decode(encoded).map_err(serde::de::Error::custom)
}

// ============================================================================
// Scale Presets
// ============================================================================

/// The two preset scale modes the toolbar toggles between.
///
/// The engine reports scale as a free-form value; anything that is not
/// one of the two presets maps to `Custom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePreset {
    /// Whole page visible inside the surface
    PageFit,
    /// Page width matched to the surface width
    PageWidth,
    /// Any other scale the engine settled on
    Custom,
}

impl ScalePreset {
    /// Wire value understood by the engine, `None` for `Custom`
    pub fn as_value(self) -> Option<&'static str> {
        match self {
            ScalePreset::PageFit => Some(SCALE_VALUE_PAGE_FIT),
            ScalePreset::PageWidth => Some(SCALE_VALUE_PAGE_WIDTH),
            ScalePreset::Custom => None,
        }
    }

    /// Classify a value reported by the engine
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(SCALE_VALUE_PAGE_FIT) => ScalePreset::PageFit,
            Some(SCALE_VALUE_PAGE_WIDTH) => ScalePreset::PageWidth,
            _ => ScalePreset::Custom,
        }
    }

    /// The preset the zoom toggle switches to from `self`
    pub fn toggled(self) -> Self {
        match self {
            ScalePreset::PageFit => ScalePreset::PageWidth,
            _ => ScalePreset::PageFit,
        }
    }
}

// ============================================================================
// Outward Events
// ============================================================================

/// Notifications the element forwards to its host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewerEvent {
    /// The engine settled on a page
    PageChanged { page: u16 },
    /// The engine settled on a scale
    ScaleChanged { preset: ScalePreset, scale: f32 },
    /// An annotation link leading outside the document was clicked
    LinkActivated { destination: String },
    /// The document finished opening
    DocumentOpened { page_count: u16 },
}
