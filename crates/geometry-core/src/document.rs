//! # Document Module
//!
//! An in-memory document tree that implements [`HostDocument`].
//!
//! ## Responsibilities
//! - **Arena**: Nodes live in a slot vector; removed slots are recycled with a
//!   bumped generation so old [`NodeId`]s never resolve to new nodes.
//! - **Tree**: Parent/children links, plus shadow roots attached to hosts.
//! - **Geometry snapshot**: Each node carries its computed style strings,
//!   box metrics, positioning ancestor and optional effective zoom.

use crate::host::HostDocument;
use crate::types::{BoxGeometry, ComputedStyle, NodeId, NodeKind};

/// A node stored in the [`Document`] arena.
#[derive(Debug, Clone)]
pub struct DocumentNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Shadow root attached to this element, if any.
    pub shadow_root: Option<NodeId>,
    pub style: ComputedStyle,
    pub geometry: BoxGeometry,
    pub offset_parent: Option<NodeId>,
    pub current_css_zoom: Option<f64>,
}

impl DocumentNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            shadow_root: None,
            style: ComputedStyle::default(),
            geometry: BoxGeometry::default(),
            offset_parent: None,
            current_css_zoom: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<DocumentNode>,
}

/// Arena-backed document tree.
///
/// `Document::new()` creates the document node with an `html` element and a
/// `body` element beneath it.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    root: NodeId,
    document_element: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free_indices: Vec::new(),
            root: NodeId::new(0, 0),
            document_element: NodeId::new(0, 0),
            body: NodeId::new(0, 0),
        };
        doc.root = doc.insert(DocumentNode::new(NodeKind::Document));
        doc.document_element = doc.insert(DocumentNode::new(NodeKind::element("html")));
        doc.body = doc.insert(DocumentNode::new(NodeKind::element("body")));
        doc.append_child(doc.root, doc.document_element);
        doc.append_child(doc.document_element, doc.body);
        doc
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The top-level `html` element.
    pub fn document_element(&self) -> NodeId {
        self.document_element
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn insert(&mut self, node: DocumentNode) -> NodeId {
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(index, 0)
        }
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.insert(DocumentNode::new(NodeKind::element(tag)))
    }

    /// Creates an element and appends it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Attaches a shadow root to `host`, returning the existing one if present.
    pub fn attach_shadow(&mut self, host: NodeId) -> Option<NodeId> {
        let existing = self.get_node(host)?.shadow_root;
        if let Some(root) = existing {
            return Some(root);
        }
        let root = self.insert(DocumentNode::new(NodeKind::ShadowRoot { host: Some(host) }));
        if let Some(host_node) = self.get_node_mut(host) {
            host_node.shadow_root = Some(root);
        }
        Some(root)
    }

    /// Establishes a parent-child relationship, detaching `child` from any previous parent.
    ///
    /// Does nothing when `child` is `parent` or one of its ancestors
    /// (including across shadow hosts), so the tree never gains a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent)
            || !self.contains(child)
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        if let Some(old_parent) = self.get_node(child).and_then(|n| n.parent) {
            self.remove_child(old_parent, child);
        }
        if let Some(p_node) = self.get_node_mut(parent) {
            p_node.children.push(child);
        }
        if let Some(c_node) = self.get_node_mut(child) {
            c_node.parent = Some(parent);
        }
    }

    /// Whether `ancestor` is `node` or lies above it, following parent links
    /// and shadow root hosts.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.slots.len() {
                break;
            }
            current = match self.get_node(id) {
                Some(DocumentNode {
                    kind: NodeKind::ShadowRoot { host },
                    ..
                }) => *host,
                Some(n) => n.parent,
                None => None,
            };
        }
        false
    }

    /// Removes `child` from `parent`'s children and clears its parent link.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p_node) = self.get_node_mut(parent) {
            if let Some(pos) = p_node.children.iter().position(|&x| x == child) {
                p_node.children.remove(pos);
            }
        }
        if let Some(c_node) = self.get_node_mut(child) {
            if c_node.parent == Some(parent) {
                c_node.parent = None;
            }
        }
    }

    /// Recursively destroys a node, its children and its shadow tree,
    /// freeing their slots for reuse.
    pub fn remove_node(&mut self, id: NodeId) {
        let (parent, children, shadow_root, kind) = match self.get_node(id) {
            Some(node) => (
                node.parent,
                node.children.clone(),
                node.shadow_root,
                node.kind.clone(),
            ),
            None => return,
        };

        if let Some(pid) = parent {
            self.remove_child(pid, id);
        }
        if let NodeKind::ShadowRoot { host: Some(host) } = kind {
            if let Some(host_node) = self.get_node_mut(host) {
                host_node.shadow_root = None;
            }
        }
        for child in children {
            self.remove_node(child);
        }
        if let Some(root) = shadow_root {
            self.remove_node(root);
        }

        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_indices.push(id.index);
    }

    pub fn get_node(&self, id: NodeId) -> Option<&DocumentNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut DocumentNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) {
        if let Some(node) = self.get_node_mut(id) {
            node.style = style;
        }
    }

    pub fn set_geometry(&mut self, id: NodeId, geometry: BoxGeometry) {
        if let Some(node) = self.get_node_mut(id) {
            node.geometry = geometry;
        }
    }

    pub fn set_offset_parent(&mut self, id: NodeId, offset_parent: Option<NodeId>) {
        if let Some(node) = self.get_node_mut(id) {
            node.offset_parent = offset_parent;
        }
    }

    pub fn set_current_css_zoom(&mut self, id: NodeId, zoom: Option<f64>) {
        if let Some(node) = self.get_node_mut(id) {
            node.current_css_zoom = zoom;
        }
    }

    /// Number of live nodes, including the document node.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HostDocument for Document {
    fn contains(&self, node: NodeId) -> bool {
        self.get_node(node).is_some()
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.get_node(node).map(|n| n.kind.clone())
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.get_node(node).and_then(|n| n.parent)
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent_node(node)
            .filter(|&p| self.get_node(p).is_some_and(|n| n.kind.is_element()))
    }

    fn shadow_host(&self, node: NodeId) -> Option<NodeId> {
        match self.get_node(node).map(|n| &n.kind) {
            Some(NodeKind::ShadowRoot { host }) => host.filter(|&h| self.contains(h)),
            _ => None,
        }
    }

    fn is_shadow_root(&self, node: NodeId) -> bool {
        self.get_node(node).is_some_and(|n| n.kind.is_shadow_root())
    }

    fn is_root_element(&self, node: NodeId) -> bool {
        self.get_node(node)
            .and_then(|n| n.kind.tag())
            .is_some_and(|tag| tag.eq_ignore_ascii_case("html") || tag.eq_ignore_ascii_case("body"))
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        self.get_node(node).map(|n| n.style.clone()).unwrap_or_default()
    }

    fn box_geometry(&self, node: NodeId) -> BoxGeometry {
        self.get_node(node).map(|n| n.geometry).unwrap_or_default()
    }

    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        self.get_node(node)
            .and_then(|n| n.offset_parent)
            .filter(|&p| self.contains(p))
    }

    fn current_css_zoom(&self, node: NodeId) -> Option<f64> {
        self.get_node(node).and_then(|n| n.current_css_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new();
        assert_eq!(doc.parent_node(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.parent_node(doc.document_element()), Some(doc.root()));
        assert_eq!(doc.parent_element(doc.document_element()), None);
        assert!(doc.is_root_element(doc.body()));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_removed_slot_is_reused_with_new_generation() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append_element(body, "div");
        doc.remove_node(first);
        assert!(!doc.contains(first));

        let second = doc.append_element(body, "div");
        assert_eq!(second.index, first.index);
        assert_ne!(second.generation, first.generation);
        assert!(doc.get_node(first).is_none());
        assert!(doc.contains(second));
    }

    #[test]
    fn test_remove_node_drops_shadow_tree() {
        let mut doc = Document::new();
        let body = doc.body();
        let host = doc.append_element(body, "my-widget");
        let shadow = doc.attach_shadow(host).unwrap();
        let inner = doc.append_element(shadow, "span");

        doc.remove_node(host);
        assert!(!doc.contains(shadow));
        assert!(!doc.contains(inner));
        assert!(doc.get_node(body).unwrap().children.is_empty());
    }

    #[test]
    fn test_append_child_reparents() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "div");
        let b = doc.append_element(body, "div");
        let c = doc.append_element(a, "span");

        doc.append_child(b, c);
        assert!(doc.get_node(a).unwrap().children.is_empty());
        assert_eq!(doc.get_node(b).unwrap().children, vec![c]);
        assert_eq!(doc.parent_node(c), Some(b));
    }
}
