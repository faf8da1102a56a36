//! # Transform Accumulator
//!
//! Builds the cumulative element-to-page matrix and converts points with it.
//!
//! ## Process
//! 1. **Cache**: Return the memoized matrix for the element if there is one.
//! 2. **Walk**: Collect the ancestor chain, element first.
//! 3. **Local transforms**: For each node build
//!    `position · zoom · scroll · (origin-corrected style transform)`.
//! 4. **Compose**: `matrix = local · matrix`, so the innermost node's
//!    transform touches an element-space point first and the outermost last.
//! 5. **Store**: Cache the result.

use crate::cache::TransformCache;
use crate::config::EngineConfig;
use crate::errors::GeometryError;
use crate::host::HostDocument;
use crate::matrix::AffineMatrix;
use crate::parser::{apply_origin, parse_origin, parse_transform};
use crate::types::{NodeId, Point2D};
use crate::walker::AncestorChain;
use crate::zoom::resolve_zoom_bounded;
use tracing::{instrument, trace};

/// Converts points between element-local and page coordinates.
#[derive(Debug, Clone, Default)]
pub struct TransformAccumulator {
    config: EngineConfig,
    cache: TransformCache,
}

impl TransformAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            cache: TransformCache::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }

    /// The cumulative matrix mapping element-local points to page points.
    #[instrument(level = "debug", skip(self, doc))]
    pub fn get_element_to_page_matrix<D: HostDocument + ?Sized>(
        &mut self,
        doc: &D,
        element: NodeId,
    ) -> AffineMatrix {
        if self.config.cache_enabled {
            if let Some(matrix) = self.cache.get(element) {
                trace!("cache hit");
                return matrix;
            }
        }

        let chain = AncestorChain::new(doc, element, self.config.max_chain_depth);
        let mut matrix = AffineMatrix::IDENTITY;
        for node in chain {
            let local = self.node_local_matrix(doc, node);
            matrix = local * matrix;
        }

        if self.config.cache_enabled {
            self.cache.set(element, matrix);
        }
        matrix
    }

    /// The transform a single node contributes to the chain.
    pub fn node_local_matrix<D: HostDocument + ?Sized>(&self, doc: &D, node: NodeId) -> AffineMatrix {
        let style = doc.computed_style(node);
        let geometry = doc.box_geometry(node);

        let scroll = geometry.effective_scroll();
        let scroll_matrix = AffineMatrix::translate(-scroll.x, -scroll.y);

        let origin = parse_origin(
            style
                .transform_origin
                .as_deref()
                .or(Some(self.config.default_transform_origin.as_str())),
            geometry.client_size.width,
            geometry.client_size.height,
        );
        let node_transform = apply_origin(&parse_transform(style.transform.as_deref()), origin);

        let mut offset = geometry.offset;
        if self.config.subtract_parent_scroll {
            if let Some(parent) = doc.offset_parent(node) {
                offset -= doc.box_geometry(parent).effective_scroll();
            }
        }
        let position_matrix = AffineMatrix::translate(offset.x, offset.y);

        let zoom_matrix = AffineMatrix::scale(resolve_zoom_bounded(
            doc,
            node,
            self.config.max_chain_depth,
        ));

        position_matrix * zoom_matrix * scroll_matrix * node_transform
    }

    /// Maps an element-local point to page coordinates.
    pub fn convert_point_from_node_to_page<D: HostDocument + ?Sized>(
        &mut self,
        doc: &D,
        element: NodeId,
        point: Point2D,
    ) -> Point2D {
        self.get_element_to_page_matrix(doc, element)
            .apply_to_point(point)
            .to_euclidean()
    }

    /// Maps a page point into the element's local coordinates.
    ///
    /// Fails with [`GeometryError::SingularMatrix`] when some ancestor
    /// collapses the plane (e.g. `scale(0)`).
    pub fn convert_point_from_page_to_node<D: HostDocument + ?Sized>(
        &mut self,
        doc: &D,
        element: NodeId,
        point: Point2D,
    ) -> Result<Point2D, GeometryError> {
        let inverse = self.get_element_to_page_matrix(doc, element).invert()?;
        Ok(inverse.apply_to_point(point).to_euclidean())
    }

    /// Forgets the cached matrix of one element.
    pub fn invalidate(&mut self, element: NodeId) {
        self.cache.evict(element);
    }

    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Drops cache entries for nodes that no longer exist in `doc`.
    pub fn prune<D: HostDocument + ?Sized>(&mut self, doc: &D) -> usize {
        self.cache.prune(doc)
    }
}
