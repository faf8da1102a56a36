//! # Geometry Core
//!
//! `geometry-core` relates an element in a styleable document tree to the
//! page's coordinate space. It accounts for everything a renderer applies
//! between the two: CSS affine transforms and their origins, scroll offsets,
//! layout offsets relative to positioning ancestors, and cascading zoom.
//!
//! ## Core Features
//!
//! *   **Accumulated transforms**: One matrix summarizing an element's whole ancestor chain.
//! *   **Shadow trees**: Chains continue from a shadow root to its host element.
//! *   **Point conversion**: Page → element-local and element-local → page.
//! *   **Caching**: Per-element memoization with explicit invalidation.
//! *   **Host abstraction**: Any document model can implement [`HostDocument`];
//!     [`Document`] is an in-memory implementation.
//!
//! ## Usage
//!
//! ```rust
//! use geometry_core::{BoxGeometry, ComputedStyle, Document, Point2D, TransformAccumulator};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let card = doc.append_element(body, "div");
//! doc.set_geometry(card, BoxGeometry::at(40.0, 30.0).with_size(200.0, 100.0));
//! doc.set_style(card, ComputedStyle::default().with_transform("matrix(1, 0, 0, 1, 10, 20)"));
//!
//! let mut engine = TransformAccumulator::new();
//! let page = engine.convert_point_from_node_to_page(&doc, card, Point2D::new(0.0, 0.0));
//! assert_eq!((page.x, page.y), (50.0, 50.0));
//!
//! let local = engine
//!     .convert_point_from_page_to_node(&doc, card, page)
//!     .expect("translation is invertible");
//! assert_eq!((local.x, local.y), (0.0, 0.0));
//! ```

/// 3×3 homogeneous matrices.
pub mod matrix;

/// Parsing of computed `transform` / `transform-origin` strings.
pub mod parser;

/// The read-only interface to the embedding document.
pub mod host;

/// Ancestor chain traversal across shadow boundaries.
pub mod walker;

/// Effective zoom resolution.
pub mod zoom;

/// The element-to-page matrix builder and point converter.
pub mod accumulator;

/// Per-element matrix memoization.
pub mod cache;

/// In-memory document tree.
pub mod document;

/// Shared data structures used across the engine.
pub mod types;

/// Engine settings and their environment overrides.
pub mod config;

/// Error types.
pub mod errors;

pub use accumulator::TransformAccumulator;
pub use cache::TransformCache;
pub use config::{EngineConfig, DEFAULT_MAX_CHAIN_DEPTH};
pub use document::{Document, DocumentNode};
pub use errors::GeometryError;
pub use host::HostDocument;
pub use matrix::AffineMatrix;
pub use types::{BoxGeometry, ComputedStyle, NodeId, NodeKind, Point2D};
pub use walker::{walk, AncestorChain};
pub use zoom::{resolve_zoom, resolve_zoom_bounded};
