//! Static viewer assets injected into the shared document head.
//!
//! The locale bundle link and the font-face style block are injected
//! once per document, guarded by head queries so a second element
//! sharing the head never duplicates them. Release removes only the
//! nodes this loader created.

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::constants::{
    FONT_BOOK_PATH, FONT_FACES_ELEMENT_ID, FONT_MEDIUM_PATH, LOCALE_LINK_REL, LOCALE_LINK_TYPE,
    LOCALE_RESOURCE_PATH,
};
use crate::host::{HeadNode, HeadNodeKind, HostDocument, NodeId};

/// Injects the viewer's static resources and remembers what it added.
pub struct AssetLoader {
    document: Arc<HostDocument>,
    injected: Vec<NodeId>,
}

impl AssetLoader {
    pub fn new(document: Arc<HostDocument>) -> Self {
        Self {
            document,
            injected: Vec::new(),
        }
    }

    /// Inject the locale link and font faces, skipping whatever is
    /// already present in the head.
    pub fn inject(&mut self, asset_root: &Path) {
        self.add_locale_link(asset_root);
        self.add_font_faces(asset_root);
    }

    fn add_locale_link(&mut self, asset_root: &Path) {
        if self.document.has_link_with_type(LOCALE_LINK_TYPE) {
            debug!("Locale link already present, skipping");
            return;
        }
        let href = asset_root.join(LOCALE_RESOURCE_PATH);
        let id = self.document.append_to_head(HeadNode {
            element_id: String::new(),
            kind: HeadNodeKind::Link {
                rel: LOCALE_LINK_REL.to_string(),
                content_type: LOCALE_LINK_TYPE.to_string(),
                href: href.to_string_lossy().into_owned(),
            },
        });
        self.injected.push(id);
    }

    fn add_font_faces(&mut self, asset_root: &Path) {
        if self.document.has_element_with_id(FONT_FACES_ELEMENT_ID) {
            debug!("Font faces already present, skipping");
            return;
        }
        let book = asset_root.join(FONT_BOOK_PATH);
        let medium = asset_root.join(FONT_MEDIUM_PATH);
        let css = format!(
            "@font-face {{\n    font-family: 'CircularStd-Book';\n    src: url('{}') format('woff');\n}}\n@font-face {{\n    font-family: 'CircularStd-Medium';\n    src: url('{}') format('woff');\n}}",
            book.to_string_lossy(),
            medium.to_string_lossy()
        );
        let id = self.document.append_to_head(HeadNode {
            element_id: FONT_FACES_ELEMENT_ID.to_string(),
            kind: HeadNodeKind::Style { css },
        });
        self.injected.push(id);
    }

    /// Remove every node this loader injected. Nodes another owner
    /// already removed are skipped silently.
    pub fn release(&mut self) {
        for id in self.injected.drain(..) {
            self.document.remove_from_head(id);
        }
    }

    /// Number of nodes this loader currently owns.
    pub fn injected_count(&self) -> usize {
        self.injected.len()
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.release();
    }
}
