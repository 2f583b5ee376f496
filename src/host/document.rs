//! Minimal model of the host document head.
//!
//! Just enough structure for guarded resource injection: append a
//! node, query by link type or element id, remove by handle.

use parking_lot::Mutex;

/// Handle to one appended head node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// What kind of node sits in the head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadNodeKind {
    /// A `<link>`-style resource reference
    Link {
        rel: String,
        content_type: String,
        href: String,
    },
    /// A `<style>`-style inline CSS block
    Style { css: String },
}

/// One node in the document head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadNode {
    /// `id` attribute, empty if none
    pub element_id: String,
    pub kind: HeadNodeKind,
}

/// The shared document head.
///
/// Multiple elements may inject into the same head, so queries are the
/// basis of "inject only if absent" guards.
pub struct HostDocument {
    head: Mutex<Vec<(NodeId, HeadNode)>>,
    next_id: Mutex<u64>,
}

impl HostDocument {
    pub fn new() -> Self {
        Self {
            head: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }

    /// Append a node to the head, returning its handle.
    pub fn append_to_head(&self, node: HeadNode) -> NodeId {
        let id = {
            let mut next = self.next_id.lock();
            let id = NodeId(*next);
            *next += 1;
            id
        };
        self.head.lock().push((id, node));
        id
    }

    /// Remove a previously appended node. Returns whether it was
    /// still present.
    pub fn remove_from_head(&self, id: NodeId) -> bool {
        let mut head = self.head.lock();
        let before = head.len();
        head.retain(|(node_id, _)| *node_id != id);
        head.len() != before
    }

    /// Does the head contain a link with the given `type` attribute?
    pub fn has_link_with_type(&self, content_type: &str) -> bool {
        self.head.lock().iter().any(|(_, node)| {
            matches!(&node.kind, HeadNodeKind::Link { content_type: t, .. } if t == content_type)
        })
    }

    /// Does the head contain a node with the given element id?
    pub fn has_element_with_id(&self, element_id: &str) -> bool {
        self.head
            .lock()
            .iter()
            .any(|(_, node)| node.element_id == element_id)
    }

    /// Number of nodes currently in the head.
    pub fn head_len(&self) -> usize {
        self.head.lock().len()
    }
}

impl Default for HostDocument {
    fn default() -> Self {
        Self::new()
    }
}
