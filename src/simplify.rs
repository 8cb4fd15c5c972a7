//! Ramer-Douglas-Peucker simplification of hand-drawn point sequences.
//!
//! Brush strokes sample the pointer at event rate and accumulate far more
//! points than the final shape needs. Simplification runs at commit time
//! with a tolerance proportional to the map's grid cell size and inversely
//! proportional to the view zoom, so a zoomed-in stroke keeps more detail.

#[cfg(test)]
#[path = "simplify_test.rs"]
mod simplify_test;

use crate::consts::SIMPLIFY_CELL_RATIO;
use crate::vec2::Vec2;

/// Simplify a point sequence for the given grid granularity and zoom scale.
///
/// `cell_size` is the normalized size of one grid cell; `scale` is the
/// zoom-derived divisor (callers pass `max(zoom, 1) / 2`; the halving
/// compensates for smoothing being disabled while edge snapping is active
/// and is a tunable, not an invariant). Endpoints are always preserved,
/// points are never reordered, and the output is never longer than the
/// input nor empty for non-empty input.
#[must_use]
pub fn simplify_points(points: &[Vec2], cell_size: Vec2, scale: f64) -> Vec<Vec2> {
    let tolerance = (cell_size.x + cell_size.y) / 2.0 * SIMPLIFY_CELL_RATIO / scale;
    rdp(points, tolerance)
}

/// Ramer-Douglas-Peucker with an explicit distance tolerance.
#[must_use]
pub fn rdp(points: &[Vec2], epsilon: f64) -> Vec<Vec2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;
    rdp_recurse(points, 0, n - 1, epsilon, &mut keep);

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

/// Mark points between `start` and `end` that deviate from the chord by
/// more than `epsilon`.
fn rdp_recurse(points: &[Vec2], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;
    for i in (start + 1)..end {
        let dist = points[i].distance_to_segment(points[start], points[end]);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        keep[max_idx] = true;
        rdp_recurse(points, start, max_idx, epsilon, keep);
        rdp_recurse(points, max_idx, end, epsilon, keep);
    }
}
