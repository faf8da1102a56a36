//! Transform Accumulation Tests
//!
//! Tests for element ⇄ page conversion: positioning offsets, style transforms,
//! transform origins, scroll, zoom and singular matrices.

use geometry_core::{
    AffineMatrix, BoxGeometry, ComputedStyle, Document, EngineConfig, GeometryError, NodeId,
    Point2D, TransformAccumulator,
};

const EPS: f64 = 1e-9;

fn assert_point_near(actual: Point2D, expected: (f64, f64)) {
    assert!(
        (actual.x - expected.0).abs() < EPS && (actual.y - expected.1).abs() < EPS,
        "expected ({}, {}), got ({}, {})",
        expected.0,
        expected.1,
        actual.x,
        actual.y
    );
}

/// body > outer (10, 20) > inner (5, 5), no transforms anywhere.
fn nested_boxes() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let outer = doc.append_element(body, "div");
    doc.set_geometry(outer, BoxGeometry::at(10.0, 20.0).with_size(300.0, 200.0));
    let inner = doc.append_element(outer, "div");
    doc.set_geometry(inner, BoxGeometry::at(5.0, 5.0).with_size(100.0, 50.0));
    (doc, outer, inner)
}

/// Without transforms the matrix is only the accumulated position offsets.
#[test]
fn identity_chain_accumulates_offsets() {
    let (doc, _, inner) = nested_boxes();
    let mut engine = TransformAccumulator::new();

    let matrix = engine.get_element_to_page_matrix(&doc, inner);
    assert!(matrix.abs_diff_eq(&AffineMatrix::translate(15.0, 25.0), EPS));

    let page = engine.convert_point_from_node_to_page(&doc, inner, Point2D::ORIGIN);
    assert_point_near(page, (15.0, 25.0));
}

/// `matrix(1,0,0,1,10,20)` shifts the element's page position by (10, 20).
#[test]
fn single_translation() {
    let (mut doc, _, inner) = nested_boxes();
    doc.set_style(
        inner,
        ComputedStyle::default().with_transform("matrix(1, 0, 0, 1, 10, 20)"),
    );
    let mut engine = TransformAccumulator::new();

    let page = engine.convert_point_from_node_to_page(&doc, inner, Point2D::ORIGIN);
    assert_point_near(page, (25.0, 45.0));
}

/// A centered `scale(2)` keeps the box center fixed and moves the corner.
#[test]
fn origin_is_the_fixed_point_of_the_transform() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.append_element(body, "div");
    doc.set_geometry(el, BoxGeometry::default().with_size(100.0, 100.0));
    doc.set_style(
        el,
        ComputedStyle::default()
            .with_transform("matrix(2, 0, 0, 2, 0, 0)")
            .with_origin("50px 50px"),
    );
    let mut engine = TransformAccumulator::new();

    let center = engine.convert_point_from_node_to_page(&doc, el, Point2D::new(50.0, 50.0));
    assert_point_near(center, (50.0, 50.0));

    let corner = engine.convert_point_from_node_to_page(&doc, el, Point2D::ORIGIN);
    assert_point_near(corner, (-50.0, -50.0));
}

/// Without a reported origin the box midpoint is used.
#[test]
fn missing_origin_defaults_to_box_center() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.append_element(body, "div");
    doc.set_geometry(el, BoxGeometry::default().with_size(40.0, 20.0));
    doc.set_style(el, ComputedStyle::default().with_transform("matrix(2, 0, 0, 2, 0, 0)"));
    let mut engine = TransformAccumulator::new();

    let center = engine.convert_point_from_node_to_page(&doc, el, Point2D::new(20.0, 10.0));
    assert_point_near(center, (20.0, 10.0));
}

/// An ancestor's transform wraps everything inside it.
#[test]
fn ancestor_rotation_applies_after_inner_offsets() {
    let (mut doc, outer, inner) = nested_boxes();
    // Quarter turn about the outer box's top-left corner.
    doc.set_style(
        outer,
        ComputedStyle::default()
            .with_transform("matrix(0, 1, -1, 0, 0, 0)")
            .with_origin("0px 0px"),
    );
    let mut engine = TransformAccumulator::new();

    // inner (0,0) sits at (5,5) in outer space; rotated it becomes (-5,5);
    // outer's own offset then adds (10,20).
    let page = engine.convert_point_from_node_to_page(&doc, inner, Point2D::ORIGIN);
    assert_point_near(page, (5.0, 25.0));
}

/// page → node → page returns the starting point under a mixed chain.
#[test]
fn round_trip_through_rotation_scroll_and_zoom() {
    let (mut doc, outer, inner) = nested_boxes();
    let angle: f64 = 0.6;
    doc.set_style(
        outer,
        ComputedStyle::default()
            .with_transform(format!(
                "matrix({}, {}, {}, {}, 7, -3)",
                angle.cos(),
                angle.sin(),
                -angle.sin(),
                angle.cos()
            ))
            .with_zoom("1.5"),
    );
    doc.set_geometry(
        outer,
        BoxGeometry::at(10.0, 20.0)
            .with_size(300.0, 200.0)
            .with_scroll(0.0, 12.0),
    );
    doc.set_offset_parent(inner, Some(outer));
    doc.set_style(
        inner,
        ComputedStyle::default()
            .with_transform("matrix(1.2, 0.3, -0.4, 0.9, 2, 8)")
            .with_origin("25% 75%"),
    );
    let mut engine = TransformAccumulator::new();

    for &(x, y) in &[(0.0, 0.0), (123.4, -56.7), (-1000.0, 2500.5)] {
        let local = engine
            .convert_point_from_page_to_node(&doc, inner, Point2D::new(x, y))
            .expect("matrix is invertible");
        let back = engine.convert_point_from_node_to_page(&doc, inner, local);
        assert!(
            (back.x - x).abs() < 1e-6 && (back.y - y).abs() < 1e-6,
            "round trip of ({x}, {y}) gave ({}, {})",
            back.x,
            back.y
        );
    }
}

/// A zero-scale ancestor makes page → node conversion fail.
#[test]
fn singular_ancestor_is_reported() {
    let (mut doc, outer, inner) = nested_boxes();
    doc.set_style(
        outer,
        ComputedStyle::default().with_transform("matrix(0, 0, 0, 0, 0, 0)"),
    );
    let mut engine = TransformAccumulator::new();

    let result = engine.convert_point_from_page_to_node(&doc, inner, Point2D::new(1.0, 1.0));
    assert_eq!(result, Err(GeometryError::SingularMatrix));

    // The forward direction is still defined: everything collapses onto outer's origin.
    let page = engine.convert_point_from_node_to_page(&doc, inner, Point2D::new(3.0, 4.0));
    assert!(page.x.is_finite() && page.y.is_finite());
}

/// A scroll container shifts its content; the positioning-ancestor
/// correction shifts it again.
#[test]
fn scroll_container_offsets_content() {
    let mut doc = Document::new();
    let body = doc.body();
    let scroller = doc.append_element(body, "div");
    doc.set_geometry(
        scroller,
        BoxGeometry::default()
            .with_size(200.0, 200.0)
            .with_scroll(0.0, 30.0),
    );
    let item = doc.append_element(scroller, "div");
    doc.set_geometry(item, BoxGeometry::at(0.0, 100.0));
    doc.set_offset_parent(item, Some(scroller));

    let mut engine = TransformAccumulator::new();
    let page = engine.convert_point_from_node_to_page(&doc, item, Point2D::ORIGIN);
    assert_point_near(page, (0.0, 40.0));

    let mut engine = TransformAccumulator::with_config(EngineConfig {
        subtract_parent_scroll: false,
        ..EngineConfig::default()
    });
    let page = engine.convert_point_from_node_to_page(&doc, item, Point2D::ORIGIN);
    assert_point_near(page, (0.0, 70.0));
}

/// Scroll offsets of non-scrollable nodes are ignored.
#[test]
fn scroll_of_non_scrollable_node_is_ignored() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.append_element(body, "div");
    let mut geometry = BoxGeometry::at(3.0, 4.0);
    geometry.scroll = kurbo::Vec2::new(50.0, 50.0);
    doc.set_geometry(el, geometry);

    let mut engine = TransformAccumulator::new();
    let page = engine.convert_point_from_node_to_page(&doc, el, Point2D::ORIGIN);
    assert_point_near(page, (3.0, 4.0));
}

/// Zoom scales a node's content before it is positioned.
#[test]
fn zoom_scales_around_the_layout_offset() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.append_element(body, "div");
    doc.set_geometry(el, BoxGeometry::at(10.0, 10.0));
    doc.set_style(el, ComputedStyle::default().with_zoom("2"));

    let mut engine = TransformAccumulator::new();
    let page = engine.convert_point_from_node_to_page(&doc, el, Point2D::new(5.0, 5.0));
    assert_point_near(page, (20.0, 20.0));
}

/// Unknown transform functions degrade to "no transform".
#[test]
fn unsupported_transform_syntax_is_identity() {
    let (mut doc, outer, inner) = nested_boxes();
    doc.set_style(outer, ComputedStyle::default().with_transform("rotate(45deg)"));
    let mut engine = TransformAccumulator::new();

    let page = engine.convert_point_from_node_to_page(&doc, inner, Point2D::ORIGIN);
    assert_point_near(page, (15.0, 25.0));
}

/// `matrix3d` keeps its 2D part.
#[test]
fn matrix3d_translation_is_projected() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.append_element(body, "div");
    doc.set_style(
        el,
        ComputedStyle::default()
            .with_transform("matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 30, 40, 50, 1)"),
    );
    let mut engine = TransformAccumulator::new();

    let page = engine.convert_point_from_node_to_page(&doc, el, Point2D::ORIGIN);
    assert_point_near(page, (30.0, 40.0));
}

/// The per-node matrix is exposed for diagnostics.
#[test]
fn node_local_matrix_composes_position_zoom_scroll_and_transform() {
    let mut doc = Document::new();
    let body = doc.body();
    let el = doc.append_element(body, "div");
    doc.set_geometry(
        el,
        BoxGeometry::at(100.0, 0.0)
            .with_size(10.0, 10.0)
            .with_scroll(4.0, 0.0),
    );
    doc.set_style(
        el,
        ComputedStyle::default()
            .with_transform("matrix(1, 0, 0, 1, 1, 0)")
            .with_zoom("3"),
    );
    let engine = TransformAccumulator::new();

    let local = engine.node_local_matrix(&doc, el);
    // position(100) · zoom(3) · scroll(-4) · translate(1): x -> 100 + 3 * (x - 4 + 1)
    let expected = AffineMatrix::from_css(3.0, 0.0, 0.0, 3.0, 91.0, 0.0);
    assert!(
        local.abs_diff_eq(&expected, EPS),
        "unexpected local matrix {:?}",
        local.to_row_major()
    );
}
