//! Shared numeric constants for the fog engine.

// ── Shapes ──────────────────────────────────────────────────────

/// Default stroke weight for fog shapes, in grid-stroke units.
pub const DEFAULT_STROKE_WIDTH: f64 = 0.5;

/// Minimum normalized distance between consecutive brush samples; closer
/// samples are dropped to bound point growth during a drag.
pub const BRUSH_DEDUPE_EPSILON: f64 = 0.001;

/// Minimum vertex count for a closed polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

// ── Simplification ──────────────────────────────────────────────

/// Fraction of a grid cell used as the base RDP tolerance. Tunable; the
/// effective tolerance is divided by the caller's zoom-derived scale.
pub const SIMPLIFY_CELL_RATIO: f64 = 0.1;

// ── Boolean clipping ────────────────────────────────────────────

/// Segment-parameter margin below which a crossing is treated as touching
/// an endpoint and ignored rather than split.
pub const INTERSECTION_PARAM_EPSILON: f64 = 1e-9;

/// Normalized distance under which two ring vertices are considered the
/// same point and deduplicated.
pub const POINT_MERGE_EPSILON: f64 = 1e-9;

/// Result rings with less absolute signed area than this are dropped as
/// slivers instead of being kept as zero-width artifacts.
pub const AREA_EPSILON: f64 = 1e-10;

/// Traversal step budget per vertex; exceeding it means the clip failed
/// to close a ring and reports a geometry error.
pub const CLIP_STEP_FACTOR: usize = 4;
