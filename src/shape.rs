//! Fog shape model: shapes, ids, colors, and edit patches.
//!
//! A `Shape` is a closed polygon in map-normalized coordinates with zero or
//! more holes carved out of it. The host owns the committed collection
//! (`ShapeMap`) and persists it; the engine only ever produces replacement
//! shapes through merge, subtract, and session commits.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_STROKE_WIDTH;
use crate::vec2::Vec2;

/// Unique identifier for a fog shape.
pub type ShapeId = Uuid;

/// Mapping from shape id to shape, as owned by the host.
pub type ShapeMap = HashMap<ShapeId, Shape>;

/// The kind of a shape. Fog is currently the only overlay kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Fog-of-war overlay polygon.
    #[default]
    Fog,
}

/// Symbolic color tag for a shape.
///
/// The renderer resolves these to actual colors; the engine only uses them
/// to signal intent (black = fog, red = destructive cut in progress).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeColor {
    /// Committed fog.
    Black,
    /// Cut-mode tint for in-progress and uncommitted shapes.
    Red,
}

/// A fog shape: a closed outer polygon with optional holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    /// Shape kind.
    pub kind: ShapeKind,
    /// Outer boundary, ordered, normalized to `[0, 1]` per map axis.
    /// A valid closed polygon has at least 3 points.
    pub points: Vec<Vec2>,
    /// Closed sub-polygons carved out of the outer boundary. Unordered
    /// among themselves; each hole's own points are ordered.
    pub holes: Vec<Vec<Vec2>>,
    /// Render stroke weight in grid-stroke units.
    pub stroke_width: f64,
    /// Symbolic render color.
    pub color: ShapeColor,
    /// Whether the fog currently hides content. Hidden shapes are
    /// already-revealed (cut) regions.
    pub visible: bool,
}

impl Shape {
    /// Create a fresh fog shape with the given seed points and color.
    #[must_use]
    pub fn new_fog(points: Vec<Vec2>, color: ShapeColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Fog,
            points,
            holes: Vec::new(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            color,
            visible: true,
        }
    }

    /// A copy of this shape with replaced geometry and a fresh id.
    #[must_use]
    pub fn with_geometry(&self, points: Vec<Vec2>, holes: Vec<Vec<Vec2>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            holes,
            ..self.clone()
        }
    }

    /// Whether the outer boundary has enough points to close a polygon.
    #[must_use]
    pub fn is_valid_polygon(&self) -> bool {
        self.points.len() >= crate::consts::MIN_POLYGON_POINTS
    }
}

/// Sparse visibility patch emitted by the toggle tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeEdit {
    /// Shape being patched.
    pub id: ShapeId,
    /// New visibility flag.
    pub visible: bool,
}
