//! # Ancestor Chain Walker
//!
//! Lazily yields the nodes between an element and the document root,
//! element first. Shadow boundaries are crossed as a single edge: the walk
//! steps from the top of a shadow tree straight to its host element, and the
//! shadow root itself is never yielded.

use crate::config::DEFAULT_MAX_CHAIN_DEPTH;
use crate::host::HostDocument;
use crate::types::NodeId;
use std::iter::FusedIterator;
use tracing::warn;

/// Walks the ancestor chain of `element`, at most [`DEFAULT_MAX_CHAIN_DEPTH`] nodes.
pub fn walk<D: HostDocument + ?Sized>(doc: &D, element: NodeId) -> AncestorChain<'_, D> {
    AncestorChain::new(doc, element, DEFAULT_MAX_CHAIN_DEPTH)
}

/// One-shot iterator over an ancestor chain. Call [`walk`] again to re-walk.
pub struct AncestorChain<'a, D: HostDocument + ?Sized> {
    doc: &'a D,
    state: WalkState,
    yielded: usize,
    max_depth: usize,
}

enum WalkState {
    /// The next call yields the starting element.
    Start(NodeId),
    /// The last yielded node; the next call steps from it.
    At(NodeId),
    Done,
}

impl<'a, D: HostDocument + ?Sized> AncestorChain<'a, D> {
    pub fn new(doc: &'a D, element: NodeId, max_depth: usize) -> Self {
        Self {
            doc,
            state: WalkState::Start(element),
            yielded: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// One edge up from `current`, hopping over shadow roots.
    fn step(&self, current: NodeId) -> Option<NodeId> {
        if let Some(parent) = self.doc.parent_element(current) {
            return Some(parent);
        }
        if self.doc.is_shadow_root(current) {
            return self.doc.shadow_host(current);
        }
        let parent = self.doc.parent_node(current)?;
        if self.doc.is_shadow_root(parent) {
            return self.doc.shadow_host(parent);
        }
        Some(parent)
    }
}

impl<D: HostDocument + ?Sized> Iterator for AncestorChain<'_, D> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = match self.state {
            WalkState::Done => return None,
            WalkState::Start(element) => element,
            WalkState::At(current) => match self.step(current) {
                Some(next) => next,
                None => {
                    self.state = WalkState::Done;
                    return None;
                }
            },
        };

        if self.yielded >= self.max_depth {
            warn!(
                max_depth = self.max_depth,
                "ancestor chain truncated at depth limit"
            );
            self.state = WalkState::Done;
            return None;
        }

        self.yielded += 1;
        self.state = if self.doc.is_root_element(node) {
            WalkState::Done
        } else {
            WalkState::At(node)
        };
        Some(node)
    }
}

impl<D: HostDocument + ?Sized> FusedIterator for AncestorChain<'_, D> {}
