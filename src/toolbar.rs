//! Derived toolbar state.
//!
//! The element carries no markup; hosts render their own toolbar from
//! this snapshot.

use crate::types::ScalePreset;
use crate::viewer::PdfViewerElement;

/// Which icon the zoom toggle shows, i.e. what pressing it switches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomToggleIcon {
    FitWidth,
    FitPage,
}

/// Snapshot of everything a toolbar displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarState {
    pub current_page: u16,
    pub page_count: u16,
    /// "current / total", or "-" with no document
    pub page_display: String,
    pub zoom_icon: ZoomToggleIcon,
}

impl ToolbarState {
    pub fn derive(current_page: u16, page_count: u16, preset: ScalePreset) -> Self {
        let page_display = if page_count == 0 {
            "-".to_string()
        } else {
            format!("{} / {}", current_page, page_count)
        };
        // Fitting the page already: the toggle offers width fitting.
        let zoom_icon = match preset {
            ScalePreset::PageFit => ZoomToggleIcon::FitWidth,
            _ => ZoomToggleIcon::FitPage,
        };
        Self {
            current_page,
            page_count,
            page_display,
            zoom_icon,
        }
    }

    pub fn for_viewer(viewer: &PdfViewerElement) -> Self {
        Self::derive(
            viewer.current_page(),
            viewer.page_count(),
            viewer.scale_preset(),
        )
    }
}
