//! # Geometry Pipeline
//!
//! Converts a [`DocumentSnapshot`] into a live [`Document`] the transform
//! engine can query, keeping a lookup table from snapshot ids to arena ids.

use anyhow::{bail, Context, Result};
use geometry_core::{BoxGeometry, ComputedStyle, Document, NodeId};
use geometry_schema::{DocumentSnapshot, GeometryMap, NodeSnapshot, StyleMap};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// A document built from a snapshot.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    ids: HashMap<String, NodeId>,
}

impl LoadedDocument {
    /// Arena id of the node with the given snapshot id.
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Like [`LoadedDocument::node`], failing on unknown ids.
    pub fn require(&self, id: &str) -> Result<NodeId> {
        self.node(id)
            .with_context(|| format!("no element with id `{id}` in snapshot"))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Builds a [`Document`] from a snapshot.
///
/// The snapshot root must be the `html` element. A `body` child of the root
/// takes the place of the document's own body. Fails on duplicate ids and on
/// `offset_parent` references to ids that do not exist.
pub fn load_document(snapshot: &DocumentSnapshot) -> Result<LoadedDocument> {
    if snapshot.root.tag != "html" {
        bail!(
            "snapshot root must be an `html` element, found `{}`",
            snapshot.root.tag
        );
    }

    let mut builder = Builder {
        document: Document::new(),
        ids: HashMap::new(),
        offset_parents: Vec::new(),
        body_claimed: false,
    };

    let html = builder.document.document_element();
    builder.apply_node(html, &snapshot.root)?;
    builder.build_children(html, &snapshot.root)?;
    builder.resolve_offset_parents()?;

    info!(nodes = builder.ids.len(), "loaded document snapshot");
    Ok(LoadedDocument {
        document: builder.document,
        ids: builder.ids,
    })
}

/// Reads a JSON snapshot from disk and builds it.
pub fn load_document_from_path(path: impl AsRef<Path>) -> Result<LoadedDocument> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: DocumentSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    load_document(&snapshot)
}

struct Builder {
    document: Document,
    ids: HashMap<String, NodeId>,
    // (node, snapshot id of its offset parent), resolved once every id is known.
    offset_parents: Vec<(NodeId, String)>,
    body_claimed: bool,
}

impl Builder {
    fn build_children(&mut self, parent: NodeId, node_def: &NodeSnapshot) -> Result<()> {
        if let Some(shadow) = &node_def.shadow_root {
            let shadow_root = self
                .document
                .attach_shadow(parent)
                .with_context(|| format!("cannot attach shadow root to `{}`", node_def.id))?;
            for child_def in &shadow.children {
                self.build_node_recursive(shadow_root, child_def)?;
            }
        }
        for child_def in &node_def.children {
            self.build_node_recursive(parent, child_def)?;
        }
        Ok(())
    }

    fn build_node_recursive(&mut self, parent: NodeId, node_def: &NodeSnapshot) -> Result<NodeId> {
        let is_top_body = parent == self.document.document_element() && node_def.tag == "body";
        let id = if is_top_body && !self.body_claimed {
            self.body_claimed = true;
            self.document.body()
        } else {
            self.document.append_element(parent, node_def.tag.as_str())
        };

        self.apply_node(id, node_def)?;
        self.build_children(id, node_def)?;
        Ok(id)
    }

    fn apply_node(&mut self, id: NodeId, node_def: &NodeSnapshot) -> Result<()> {
        if self.ids.insert(node_def.id.clone(), id).is_some() {
            bail!("duplicate element id `{}` in snapshot", node_def.id);
        }
        self.document.set_style(id, computed_style(&node_def.style));
        self.document.set_geometry(id, box_geometry(&node_def.geometry));
        self.document.set_current_css_zoom(id, node_def.current_css_zoom);
        if let Some(parent_id) = &node_def.offset_parent {
            self.offset_parents.push((id, parent_id.clone()));
        }
        debug!(id = %node_def.id, node = %id, tag = %node_def.tag, "built node");
        Ok(())
    }

    fn resolve_offset_parents(&mut self) -> Result<()> {
        for (node, parent_id) in std::mem::take(&mut self.offset_parents) {
            let parent = self
                .ids
                .get(&parent_id)
                .copied()
                .with_context(|| format!("unknown offset_parent `{parent_id}`"))?;
            self.document.set_offset_parent(node, Some(parent));
        }
        Ok(())
    }
}

fn computed_style(map: &StyleMap) -> ComputedStyle {
    ComputedStyle {
        transform: map.transform.clone(),
        transform_origin: map.transform_origin.clone(),
        zoom: map.zoom.clone(),
    }
}

fn box_geometry(map: &GeometryMap) -> BoxGeometry {
    let mut geometry =
        BoxGeometry::at(map.offset_left, map.offset_top).with_size(map.client_width, map.client_height);
    geometry.scroll = (map.scroll_left, map.scroll_top).into();
    geometry.scrollable = map.scrollable;
    geometry
}
