//! Serializable snapshot of a rendered document: the tree shape plus the
//! computed style strings and box metrics the geometry engine reads.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentSnapshot {
    /// The `html` element.
    pub root: NodeSnapshot,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeSnapshot {
    /// Unique within the snapshot; used to address elements from the outside.
    pub id: String,
    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default)]
    pub style: StyleMap,
    #[serde(default)]
    pub geometry: GeometryMap,

    /// Effective zoom reported by the platform, if it exposes one.
    #[serde(default)]
    pub current_css_zoom: Option<f64>,
    /// Id of the nearest positioned ancestor.
    #[serde(default)]
    pub offset_parent: Option<String>,

    #[serde(default)]
    pub shadow_root: Option<ShadowRootSnapshot>,
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}

fn default_tag() -> String {
    "div".to_string()
}

/// Computed style strings, exactly as the host reports them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    pub transform: Option<String>, // "matrix(1, 0, 0, 1, 10, 20)", "none"
    pub transform_origin: Option<String>, // "50% 50%", "10px 20px 0px"
    pub zoom: Option<String>, // "2", "150%", "normal"
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GeometryMap {
    pub offset_left: f64,
    pub offset_top: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
    /// Scroll offsets only count for scroll containers.
    pub scrollable: bool,
    pub client_width: f64,
    pub client_height: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ShadowRootSnapshot {
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}
