//! # Types Module
//!
//! Shared data types used across the engine.
//!
//! ## Responsibilities
//! - **NodeId**: Generational identity of a node in a host document.
//! - **Point2D**: Homogeneous 2D point produced by matrix application.
//! - **Geometry snapshot**: The per-node style strings and box metrics the
//!   engine reads from the host.
//!
//! ## Key Types
//! - `NodeId`: Arena index plus generation; never owns the node.
//! - `ComputedStyle`: Host-reported `transform`, `transform-origin` and `zoom` strings.
//! - `BoxGeometry`: Layout offset, scroll offset and client size.

use serde::{Deserialize, Serialize};

/// A unique identifier for a node in a host document.
///
/// The generation is bumped every time an arena slot is reused, so an id that
/// outlives its node never matches the node that later takes its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

impl NodeId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// A 2D point with a homogeneous weight.
///
/// Points coming out of [`AffineMatrix::apply_to_point`](crate::matrix::AffineMatrix::apply_to_point)
/// keep the weight the matrix produced. When `w` is neither 0 nor 1 the
/// coordinates are not yet Euclidean and must go through [`Point2D::to_euclidean`]
/// before any further arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_weight")]
    pub w: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, w: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, w: 1.0 }
    }

    pub fn with_weight(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    /// Whether the point can be used as a plane point as-is.
    pub fn is_euclidean(&self) -> bool {
        self.w == 1.0 || self.w == 0.0
    }

    /// Divides by `w` unless the point is already Euclidean or lies at infinity.
    pub fn to_euclidean(self) -> Self {
        if self.is_euclidean() {
            self
        } else {
            Self::new(self.x / self.w, self.y / self.w)
        }
    }

    pub fn distance(&self, other: Point2D) -> f64 {
        let a = self.to_euclidean();
        let b = other.to_euclidean();
        (a.x - b.x).hypot(a.y - b.y)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<kurbo::Point> for Point2D {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point2D> for kurbo::Point {
    fn from(p: Point2D) -> Self {
        let p = p.to_euclidean();
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// The structural role of a node in the host tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The document node itself (parent of the top-level element).
    Document,
    /// A regular element, identified by its tag name.
    Element { tag: String },
    /// The root of a shadow tree. `host` is the element that owns it.
    ShadowRoot { host: Option<NodeId> },
}

impl NodeKind {
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element { tag: tag.into() }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element { .. })
    }

    pub fn is_shadow_root(&self) -> bool {
        matches!(self, Self::ShadowRoot { .. })
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag } => Some(tag),
            _ => None,
        }
    }
}

/// The computed-style strings the engine consumes.
///
/// Values are the host's serialized forms: `transform` is expected to be
/// `none`, `matrix(...)` or `matrix3d(...)`, `transform_origin` a list of
/// lengths (`"50px 25px"`), and `zoom` a number or `normal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default)]
    pub transform: Option<String>,
    #[serde(default)]
    pub transform_origin: Option<String>,
    #[serde(default)]
    pub zoom: Option<String>,
}

impl ComputedStyle {
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.transform_origin = Some(origin.into());
        self
    }

    pub fn with_zoom(mut self, zoom: impl Into<String>) -> Self {
        self.zoom = Some(zoom.into());
        self
    }
}

/// Rendered box metrics of a node, already computed by the host's layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    /// Layout offset relative to the nearest positioned ancestor.
    #[serde(default)]
    pub offset: kurbo::Vec2,
    /// Scroll position of the node's own content.
    #[serde(default)]
    pub scroll: kurbo::Vec2,
    /// Whether the node is a scroll container.
    #[serde(default)]
    pub scrollable: bool,
    /// Client width/height; percentage origins resolve against it.
    #[serde(default)]
    pub client_size: kurbo::Size,
}

impl BoxGeometry {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            offset: kurbo::Vec2::new(x, y),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.client_size = kurbo::Size::new(width, height);
        self
    }

    pub fn with_scroll(mut self, left: f64, top: f64) -> Self {
        self.scrollable = true;
        self.scroll = kurbo::Vec2::new(left, top);
        self
    }

    /// The scroll offset if this node scrolls, zero otherwise.
    pub fn effective_scroll(&self) -> kurbo::Vec2 {
        if self.scrollable {
            self.scroll
        } else {
            kurbo::Vec2::ZERO
        }
    }
}
