//! Axis-aligned bounding boxes for guide lookup.
//!
//! Boxes are derived from a shape's outer boundary only; holes never expand
//! a shape's extent. They are rebuilt whenever the shape set changes, never
//! mutated in place.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::shape::Shape;
use crate::vec2::Vec2;

/// An axis-aligned bounding box in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Corner with the smallest x and y.
    pub min: Vec2,
    /// Corner with the largest x and y.
    pub max: Vec2,
}

impl BoundingBox {
    /// Build the box enclosing a point sequence. Returns `None` for an
    /// empty sequence.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Whether this box overlaps another, edges included.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Bounding boxes for each shape's outer boundary, in input order.
///
/// Shapes with no points contribute no box. `O(total points)`.
#[must_use]
pub fn shape_bounding_boxes(shapes: &[Shape]) -> Vec<BoundingBox> {
    shapes
        .iter()
        .filter_map(|shape| BoundingBox::from_points(&shape.points))
        .collect()
}
