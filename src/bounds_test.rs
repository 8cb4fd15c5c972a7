#![allow(clippy::float_cmp)]

use super::*;
use crate::shape::ShapeColor;

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

#[test]
fn from_points_none_for_empty() {
    assert!(BoundingBox::from_points(&[]).is_none());
}

#[test]
fn from_points_single_point_is_degenerate_box() {
    let bb = BoundingBox::from_points(&[v(0.3, 0.7)]).unwrap();
    assert_eq!(bb.min, v(0.3, 0.7));
    assert_eq!(bb.max, v(0.3, 0.7));
}

#[test]
fn from_points_finds_extents_in_any_order() {
    let bb = BoundingBox::from_points(&[v(0.5, 0.1), v(0.2, 0.8), v(0.9, 0.4)]).unwrap();
    assert_eq!(bb.min, v(0.2, 0.1));
    assert_eq!(bb.max, v(0.9, 0.8));
}

#[test]
fn holes_do_not_expand_shape_boxes() {
    let mut shape = Shape::new_fog(
        vec![v(0.2, 0.2), v(0.4, 0.2), v(0.4, 0.4), v(0.2, 0.4)],
        ShapeColor::Black,
    );
    // A hole that (nonsensically) pokes outside the outer boundary must
    // still be ignored by the box.
    shape.holes.push(vec![v(0.0, 0.0), v(0.9, 0.0), v(0.9, 0.9)]);

    let boxes = shape_bounding_boxes(&[shape]);
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].min, v(0.2, 0.2));
    assert_eq!(boxes[0].max, v(0.4, 0.4));
}

#[test]
fn empty_shapes_are_skipped() {
    let full = Shape::new_fog(vec![v(0.1, 0.1), v(0.2, 0.1), v(0.2, 0.2)], ShapeColor::Black);
    let empty = Shape::new_fog(Vec::new(), ShapeColor::Black);
    let boxes = shape_bounding_boxes(&[empty, full]);
    assert_eq!(boxes.len(), 1);
}

#[test]
fn overlap_is_inclusive_of_edges() {
    let a = BoundingBox { min: v(0.0, 0.0), max: v(0.5, 0.5) };
    let b = BoundingBox { min: v(0.5, 0.0), max: v(1.0, 0.5) };
    let c = BoundingBox { min: v(0.6, 0.6), max: v(0.7, 0.7) };
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c));
}
