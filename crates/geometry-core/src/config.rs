use crate::parser::DEFAULT_TRANSFORM_ORIGIN;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default bound on ancestor chain length.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 4096;

/// Engine settings.
///
/// Every field has a default, so partial JSON configs deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Memoize element-to-page matrices per element.
    pub cache_enabled: bool,
    /// Upper bound on ancestor chain length; guards against cyclic hosts.
    pub max_chain_depth: usize,
    /// Origin used for nodes whose style reports no `transform-origin`.
    pub default_transform_origin: String,
    /// Subtract the positioning ancestor's scroll offset from a node's layout offset.
    pub subtract_parent_scroll: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            default_transform_origin: DEFAULT_TRANSFORM_ORIGIN.to_string(),
            subtract_parent_scroll: true,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with the environment.
    ///
    /// It reads `PAGE_GEOMETRY_CACHE` (`0`/`false` disables the cache) and
    /// `PAGE_GEOMETRY_MAX_CHAIN_DEPTH`. Malformed values are ignored.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    pub fn with_env(mut self) -> Self {
        if let Ok(value) = std::env::var("PAGE_GEOMETRY_CACHE") {
            match value.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.cache_enabled = false,
                "1" | "true" | "on" => self.cache_enabled = true,
                other => warn!(value = other, "ignoring PAGE_GEOMETRY_CACHE"),
            }
        }
        if let Ok(value) = std::env::var("PAGE_GEOMETRY_MAX_CHAIN_DEPTH") {
            match value.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => self.max_chain_depth = depth,
                _ => warn!(value = %value, "ignoring PAGE_GEOMETRY_MAX_CHAIN_DEPTH"),
            }
        }
        self
    }
}
