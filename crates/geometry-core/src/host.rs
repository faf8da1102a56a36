use crate::types::{BoxGeometry, ComputedStyle, NodeId, NodeKind};

/// Read-only view of the document the engine measures.
///
/// The engine never mutates the host. Implementations answer queries about
/// unknown nodes with defaults (no parent, empty style, zero geometry), which
/// makes such nodes contribute the identity transform.
pub trait HostDocument {
    /// Whether `node` still exists in the document.
    fn contains(&self, node: NodeId) -> bool;

    /// Structural role of the node; `None` for unknown nodes.
    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    /// The parent node, of any kind (element, shadow root or document).
    fn parent_node(&self, node: NodeId) -> Option<NodeId>;

    /// The parent node when it is an element.
    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent_node(node)
            .filter(|&parent| matches!(self.kind(parent), Some(NodeKind::Element { .. })))
    }

    /// The host element of a shadow root. `None` for anything else.
    fn shadow_host(&self, node: NodeId) -> Option<NodeId> {
        match self.kind(node) {
            Some(NodeKind::ShadowRoot { host }) => host,
            _ => None,
        }
    }

    fn is_shadow_root(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::ShadowRoot { .. }))
    }

    /// Whether the node is the document's top-level element or its body.
    fn is_root_element(&self, node: NodeId) -> bool {
        match self.kind(node) {
            Some(NodeKind::Element { tag }) => {
                tag.eq_ignore_ascii_case("html") || tag.eq_ignore_ascii_case("body")
            }
            _ => false,
        }
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle;

    fn box_geometry(&self, node: NodeId) -> BoxGeometry;

    /// The positioning ancestor `box_geometry(node).offset` is relative to.
    fn offset_parent(&self, node: NodeId) -> Option<NodeId>;

    /// The platform's effective zoom scalar, when it exposes one.
    fn current_css_zoom(&self, _node: NodeId) -> Option<f64> {
        None
    }
}
