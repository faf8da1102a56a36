//! # Zoom Resolver
//!
//! Finds the effective zoom factor of a node. The nearest explicit value
//! wins: once a level declares a zoom the walk stops, and values from
//! further up are not multiplied in.

use crate::config::DEFAULT_MAX_CHAIN_DEPTH;
use crate::host::HostDocument;
use crate::parser::leading_number;
use crate::types::NodeId;
use tracing::debug;

/// Resolves the zoom of `node`, 1.0 when nothing up to the root declares one.
///
/// Each level checks the platform's effective zoom scalar first, then the
/// legacy `zoom` style (ignored when `normal` or unparsable). The walk follows
/// parent elements only, for at most [`DEFAULT_MAX_CHAIN_DEPTH`] levels.
pub fn resolve_zoom<D: HostDocument + ?Sized>(doc: &D, node: NodeId) -> f64 {
    resolve_zoom_bounded(doc, node, DEFAULT_MAX_CHAIN_DEPTH)
}

/// [`resolve_zoom`] looking at no more than `max_depth` levels.
pub fn resolve_zoom_bounded<D: HostDocument + ?Sized>(doc: &D, node: NodeId, max_depth: usize) -> f64 {
    let mut current = Some(node);
    let mut depth = 0;
    while let Some(id) = current {
        if depth == max_depth {
            break;
        }
        depth += 1;
        if let Some(zoom) = doc.current_css_zoom(id).filter(|z| z.is_finite()) {
            return zoom;
        }
        if let Some(zoom) = doc
            .computed_style(id)
            .zoom
            .as_deref()
            .and_then(parse_zoom)
        {
            return zoom;
        }
        current = doc.parent_element(id);
    }
    1.0
}

/// Parses a legacy `zoom` value: a number or a percentage.
fn parse_zoom(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("normal") {
        return None;
    }
    let starts_numeric = value
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !starts_numeric {
        debug!(value, "ignoring unparsable zoom");
        return None;
    }
    match value.strip_suffix('%') {
        Some(pct) => Some(leading_number(pct) / 100.0),
        None => Some(leading_number(value)),
    }
}
