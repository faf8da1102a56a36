use crate::host::HostDocument;
use crate::matrix::AffineMatrix;
use crate::types::NodeId;
use std::collections::HashMap;

/// Side table of element-to-page matrices, keyed by node identity.
///
/// The cache holds ids, never nodes, so it has no say in a node's lifetime.
/// It also never observes the host: any change to an ancestor's style,
/// geometry or scroll leaves entries stale until the caller evicts them.
#[derive(Debug, Clone, Default)]
pub struct TransformCache {
    entries: HashMap<NodeId, AffineMatrix>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: NodeId) -> Option<AffineMatrix> {
        self.entries.get(&element).copied()
    }

    /// Stores a matrix, replacing any previous entry for the element.
    pub fn set(&mut self, element: NodeId, matrix: AffineMatrix) {
        self.entries.insert(element, matrix);
    }

    pub fn evict(&mut self, element: NodeId) -> Option<AffineMatrix> {
        self.entries.remove(&element)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops entries whose node no longer exists in `doc`.
    pub fn prune<D: HostDocument + ?Sized>(&mut self, doc: &D) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&id, _| doc.contains(id));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
