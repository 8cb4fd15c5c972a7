#![allow(clippy::float_cmp)]

use super::*;

fn square(x: f64, y: f64, size: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + size, y),
        Vec2::new(x + size, y + size),
        Vec2::new(x, y + size),
    ]
}

#[test]
fn new_fog_defaults() {
    let shape = Shape::new_fog(square(0.1, 0.1, 0.2), ShapeColor::Black);
    assert_eq!(shape.kind, ShapeKind::Fog);
    assert_eq!(shape.color, ShapeColor::Black);
    assert!(shape.visible);
    assert!(shape.holes.is_empty());
    assert_eq!(shape.stroke_width, crate::consts::DEFAULT_STROKE_WIDTH);
}

#[test]
fn new_fog_ids_are_unique() {
    let a = Shape::new_fog(square(0.0, 0.0, 0.1), ShapeColor::Black);
    let b = Shape::new_fog(square(0.0, 0.0, 0.1), ShapeColor::Black);
    assert_ne!(a.id, b.id);
}

#[test]
fn with_geometry_reassigns_id_and_keeps_metadata() {
    let original = Shape::new_fog(square(0.0, 0.0, 0.5), ShapeColor::Red);
    let replaced = original.with_geometry(square(0.1, 0.1, 0.2), vec![square(0.15, 0.15, 0.05)]);
    assert_ne!(replaced.id, original.id);
    assert_eq!(replaced.color, ShapeColor::Red);
    assert_eq!(replaced.stroke_width, original.stroke_width);
    assert_eq!(replaced.holes.len(), 1);
}

#[test]
fn validity_requires_three_points() {
    let mut shape = Shape::new_fog(square(0.0, 0.0, 0.1), ShapeColor::Black);
    assert!(shape.is_valid_polygon());
    shape.points.truncate(2);
    assert!(!shape.is_valid_polygon());
}

#[test]
fn kind_and_color_serde_tags() {
    assert_eq!(serde_json::to_string(&ShapeKind::Fog).unwrap(), "\"fog\"");
    assert_eq!(serde_json::to_string(&ShapeColor::Black).unwrap(), "\"black\"");
    assert_eq!(serde_json::to_string(&ShapeColor::Red).unwrap(), "\"red\"");
}

#[test]
fn shape_serde_roundtrip() {
    let mut shape = Shape::new_fog(square(0.2, 0.2, 0.3), ShapeColor::Black);
    shape.holes.push(square(0.3, 0.3, 0.05));
    let json = serde_json::to_string(&shape).unwrap();
    let back: Shape = serde_json::from_str(&json).unwrap();
    assert_eq!(back, shape);
}

#[test]
fn shape_edit_serde_roundtrip() {
    let edit = ShapeEdit { id: Uuid::new_v4(), visible: false };
    let json = serde_json::to_string(&edit).unwrap();
    let back: ShapeEdit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, edit);
}
