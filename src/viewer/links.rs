//! Link interception inside the render surface.
//!
//! A click counts as a link click when the clicked node, or an
//! ancestor, is an anchor directly inside an annotation-layer link
//! container. Same-document links (destination containing the current
//! page's host followed by a fragment marker) are swallowed so the
//! engine's own scroll-to-anchor behavior runs; everything else is
//! reported outward for the host to handle.

use crate::constants::LINK_ANNOTATION_CLASS;
use crate::events::SurfaceNode;

/// What to do with a click the surface reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkDecision {
    /// Not a link click, nothing to do
    NotALink,
    /// A link into the currently open document, the engine scrolls
    /// to it on its own
    SameDocument { destination: String },
    /// A link leaving the document, reported to the host
    External { destination: String },
}

/// Classify a click from its node path (clicked target first, surface
/// root last).
pub fn classify_click(path: &[SurfaceNode], location_host: &str) -> LinkDecision {
    let Some(href) = find_annotation_anchor(path) else {
        return LinkDecision::NotALink;
    };

    let same_document_marker = format!("{location_host}/#");
    if href.contains(&same_document_marker) {
        LinkDecision::SameDocument {
            destination: href.to_string(),
        }
    } else {
        LinkDecision::External {
            destination: href.to_string(),
        }
    }
}

/// Walk from the target outwards looking for an anchor whose direct
/// parent is an annotation link container.
fn find_annotation_anchor(path: &[SurfaceNode]) -> Option<&str> {
    for (index, node) in path.iter().enumerate() {
        let Some(href) = node.href.as_deref() else {
            continue;
        };
        let parent_is_annotation = path
            .get(index + 1)
            .is_some_and(|parent| has_class(parent, LINK_ANNOTATION_CLASS));
        if parent_is_annotation {
            return Some(href);
        }
    }
    None
}

fn has_class(node: &SurfaceNode, class: &str) -> bool {
    node.class_name.split_whitespace().any(|c| c == class)
}
