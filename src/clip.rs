//! Polygon boolean operations with hole support.
//!
//! This is a Greiner-Hormann clipper over ring sets interpreted with the
//! even-odd fill rule. Input polygons are flattened to rings (outer plus
//! holes), pairwise edge intersections are inserted into doubly linked
//! vertex lists, each crossing is marked as an entry into or exit out of
//! the other region, and result rings are traced by walking one list and
//! switching to the other at every crossing. Traced rings are then
//! reassembled into polygons-with-holes by containment parity.
//!
//! Touching contacts (a crossing at or within epsilon of a segment
//! endpoint) are not split; correctness for self-intersecting or otherwise
//! malformed input is explicitly out of scope, and a traversal that fails
//! to close reports [`GeometryError`] instead of looping.

#[cfg(test)]
#[path = "clip_test.rs"]
mod clip_test;

use crate::consts::{
    AREA_EPSILON, CLIP_STEP_FACTOR, INTERSECTION_PARAM_EPSILON, MIN_POLYGON_POINTS,
    POINT_MERGE_EPSILON,
};
use crate::error::GeometryError;
use crate::vec2::Vec2;

/// A closed ring of points; the closing edge from last back to first is
/// implicit.
pub type Ring = Vec<Vec2>;

/// A polygon with holes: one outer boundary and zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    #[must_use]
    pub fn new(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    /// Covered area: outer area minus hole areas, floored at zero so a
    /// hole larger than its outer cannot report negative coverage.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        (signed_area(&self.outer).abs() - holes).max(0.0)
    }

    fn rings(&self) -> Vec<Ring> {
        let mut rings = Vec::with_capacity(1 + self.holes.len());
        rings.push(self.outer.clone());
        rings.extend(self.holes.iter().cloned());
        rings
    }
}

/// Shoelace signed area of a ring. Positive for counter-clockwise winding
/// in y-up coordinates.
#[must_use]
pub fn signed_area(ring: &[Vec2]) -> f64 {
    if ring.len() < MIN_POLYGON_POINTS {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.cross(b);
    }
    sum / 2.0
}

/// Union of a set of polygons, collapsed to a minimal non-overlapping set.
///
/// # Errors
///
/// Returns [`GeometryError`] if a traversal fails to close, typically on
/// self-intersecting input.
pub fn union_all(polygons: &[Polygon]) -> Result<Vec<Polygon>, GeometryError> {
    let mut iter = polygons.iter();
    let Some(first) = iter.next() else {
        return Ok(Vec::new());
    };

    let mut acc: Vec<Ring> = clean_rings(first.rings());
    for next in iter {
        let rings = clean_rings(next.rings());
        if rings.is_empty() {
            continue;
        }
        if acc.is_empty() {
            acc = rings;
            continue;
        }
        acc = boolean_rings(&acc, &rings, BooleanOp::Union)?;
    }
    Ok(assemble(acc))
}

/// Parts of `subject` not covered by `clip_region`.
///
/// A region fully inside the subject becomes a hole; a region splitting
/// the subject yields multiple polygons; a subject fully covered yields an
/// empty result.
///
/// # Errors
///
/// Returns [`GeometryError`] if a traversal fails to close, typically on
/// self-intersecting input.
pub fn difference(subject: &Polygon, clip_region: &[Polygon]) -> Result<Vec<Polygon>, GeometryError> {
    let subject_rings = clean_rings(subject.rings());
    if subject_rings.is_empty() {
        return Ok(Vec::new());
    }
    let clip_rings = clean_rings(clip_region.iter().flat_map(Polygon::rings).collect());
    if clip_rings.is_empty() {
        return Ok(assemble(subject_rings));
    }
    let result = boolean_rings(&subject_rings, &clip_rings, BooleanOp::Difference)?;
    Ok(assemble(result))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BooleanOp {
    Union,
    Difference,
}

// ── Vertex list machinery ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Subject,
    Clip,
}

#[derive(Debug, Clone)]
struct Node {
    pos: Vec2,
    next: usize,
    prev: usize,
    /// Twin node in the other side's list, for intersection nodes.
    neighbor: Option<usize>,
    /// Traveling forward through this crossing enters the other region.
    entry: bool,
    visited: bool,
}

impl Node {
    fn is_intersection(&self) -> bool {
        self.neighbor.is_some()
    }
}

struct Arena {
    nodes: Vec<Node>,
    /// First node index of each ring, with the side it belongs to.
    rings: Vec<(usize, Side)>,
}

/// A pairwise crossing between one subject edge and one clip edge.
struct Crossing {
    pos: Vec2,
    subject_edge: (usize, usize), // (ring index, edge index)
    clip_edge: (usize, usize),
    t: f64,
    u: f64,
}

/// Drop consecutive near-duplicate points and rings too small to close.
fn clean_rings(rings: Vec<Ring>) -> Vec<Ring> {
    rings
        .into_iter()
        .map(|mut ring| {
            ring.dedup_by(|a, b| a.close_to(*b, POINT_MERGE_EPSILON));
            if ring.len() > 1 && ring[0].close_to(ring[ring.len() - 1], POINT_MERGE_EPSILON) {
                ring.pop();
            }
            ring
        })
        .filter(|ring| ring.len() >= MIN_POLYGON_POINTS)
        .collect()
}

/// Even-odd ray cast against a single ring.
fn point_in_ring(point: Vec2, ring: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let pi = ring[i];
        let pj = ring[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Even-odd point-in-region test over a set of rings.
fn point_in_rings(point: Vec2, rings: &[Ring]) -> bool {
    rings
        .iter()
        .fold(false, |inside, ring| inside ^ point_in_ring(point, ring))
}

/// Whether two rings trace the same closed boundary, from any starting
/// vertex and in either direction.
fn rings_coincident(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    (0..n).any(|offset| {
        b[offset].close_to(a[0], POINT_MERGE_EPSILON)
            && ((1..n).all(|k| b[(offset + k) % n].close_to(a[k], POINT_MERGE_EPSILON))
                || (1..n).all(|k| b[(offset + n - k) % n].close_to(a[k], POINT_MERGE_EPSILON)))
    })
}

/// Pair up rings that coincide between the two sides and resolve each
/// pair from the even-odd parity of its surroundings. A coincident pair
/// produces no crossings, and its vertices sit on the twin's boundary
/// where the ray cast is unreliable, so the crossing-less keep rules
/// cannot see it. Returns the rings left for crossing insertion on each
/// side plus the resolved boundaries to carry straight into the result.
fn resolve_coincident(
    subject: &[Ring],
    clip: &[Ring],
    op: BooleanOp,
) -> (Vec<Ring>, Vec<Ring>, Vec<Ring>) {
    let mut clip_paired = vec![false; clip.len()];
    let mut active_subject: Vec<Ring> = Vec::new();
    let mut carried: Vec<Ring> = Vec::new();

    for (i, s_ring) in subject.iter().enumerate() {
        let twin = (0..clip.len()).find(|&j| !clip_paired[j] && rings_coincident(s_ring, &clip[j]));
        let Some(j) = twin else {
            active_subject.push(s_ring.clone());
            continue;
        };
        clip_paired[j] = true;

        // Parity of each side's surroundings at the pair, the pair itself
        // excluded: its sample vertex lies on both paired rings.
        let sample = s_ring[0];
        let around = |rings: &[Ring], skip: usize| {
            rings.iter().enumerate().fold(false, |inside, (k, ring)| {
                if k == skip {
                    inside
                } else {
                    inside ^ point_in_ring(sample, ring)
                }
            })
        };
        let subject_around = around(subject, i);
        let clip_around = around(clip, j);

        // The pair bounds the result only where membership in the combined
        // region changes across it.
        let keep = match op {
            BooleanOp::Union => !subject_around && !clip_around,
            BooleanOp::Difference => subject_around != clip_around,
        };
        if keep {
            carried.push(s_ring.clone());
        }
    }

    let active_clip = clip
        .iter()
        .enumerate()
        .filter(|&(j, _)| !clip_paired[j])
        .map(|(_, ring)| ring.clone())
        .collect();
    (active_subject, active_clip, carried)
}

/// Proper interior crossing of two segments, if any.
///
/// Crossings at or within epsilon of an endpoint are reported as `None`;
/// touching contacts are not split.
fn segment_crossing(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<(Vec2, f64, f64)> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let denom = d1.cross(d2);
    if denom.abs() < f64::EPSILON {
        return None; // Parallel or collinear.
    }
    let offset = b1 - a1;
    let t = offset.cross(d2) / denom;
    let u = offset.cross(d1) / denom;
    let margin = INTERSECTION_PARAM_EPSILON;
    if t <= margin || t >= 1.0 - margin || u <= margin || u >= 1.0 - margin {
        return None;
    }
    Some((a1.lerp(a2, t), t, u))
}

/// All proper crossings between the subject and clip edge sets.
fn find_crossings(subject: &[Ring], clip: &[Ring]) -> Vec<Crossing> {
    let mut crossings = Vec::new();
    for (si, s_ring) in subject.iter().enumerate() {
        for se in 0..s_ring.len() {
            let a1 = s_ring[se];
            let a2 = s_ring[(se + 1) % s_ring.len()];
            for (ci, c_ring) in clip.iter().enumerate() {
                for ce in 0..c_ring.len() {
                    let b1 = c_ring[ce];
                    let b2 = c_ring[(ce + 1) % c_ring.len()];
                    if let Some((pos, t, u)) = segment_crossing(a1, a2, b1, b2) {
                        crossings.push(Crossing {
                            pos,
                            subject_edge: (si, se),
                            clip_edge: (ci, ce),
                            t,
                            u,
                        });
                    }
                }
            }
        }
    }
    crossings
}

impl Arena {
    /// Build linked vertex lists for one side, inserting the side's
    /// crossings along each edge in parameter order. Returns the node
    /// index assigned to each crossing, aligned with `crossings`.
    fn build_side(&mut self, rings: &[Ring], side: Side, crossings: &mut [Crossing]) -> Vec<usize> {
        let mut crossing_nodes = vec![usize::MAX; crossings.len()];

        for (ring_idx, ring) in rings.iter().enumerate() {
            let ring_start = self.nodes.len();
            for (edge_idx, &pos) in ring.iter().enumerate() {
                self.push_chained(pos, None);

                // Crossings on this edge, nearest first.
                let mut on_edge: Vec<usize> = (0..crossings.len())
                    .filter(|&k| {
                        let c = &crossings[k];
                        match side {
                            Side::Subject => c.subject_edge == (ring_idx, edge_idx),
                            Side::Clip => c.clip_edge == (ring_idx, edge_idx),
                        }
                    })
                    .collect();
                on_edge.sort_by(|&a, &b| {
                    let (pa, pb) = match side {
                        Side::Subject => (crossings[a].t, crossings[b].t),
                        Side::Clip => (crossings[a].u, crossings[b].u),
                    };
                    pa.total_cmp(&pb)
                });
                for k in on_edge {
                    crossing_nodes[k] = self.nodes.len();
                    // Twin linkage is patched in once both sides exist.
                    self.push_chained(crossings[k].pos, Some(usize::MAX));
                }
            }
            self.close_ring(ring_start, side);
        }
        crossing_nodes
    }

    fn push_chained(&mut self, pos: Vec2, neighbor: Option<usize>) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            pos,
            next: idx + 1,
            prev: idx.wrapping_sub(1),
            neighbor,
            entry: false,
            visited: false,
        });
        idx
    }

    fn close_ring(&mut self, start: usize, side: Side) {
        let last = self.nodes.len() - 1;
        self.nodes[last].next = start;
        self.nodes[start].prev = last;
        self.rings.push((start, side));
    }

    /// Alternate entry/exit flags along each ring, seeded by whether the
    /// ring's first vertex lies inside the other side's region.
    fn mark_entries(&mut self, subject: &[Ring], clip: &[Ring]) {
        for &(start, side) in &self.rings.clone() {
            let other = match side {
                Side::Subject => clip,
                Side::Clip => subject,
            };
            let mut status = point_in_rings(self.nodes[start].pos, other);
            let mut cur = start;
            loop {
                if self.nodes[cur].is_intersection() {
                    self.nodes[cur].entry = !status;
                    status = !status;
                }
                cur = self.nodes[cur].next;
                if cur == start {
                    break;
                }
            }
        }
    }

    /// Flag inversion selects the traced boundary: union walks the outside
    /// of both regions, difference walks the subject's outside and the
    /// clip's inside.
    fn apply_op(&mut self, op: BooleanOp) {
        for &(start, side) in &self.rings.clone() {
            let invert = match (op, side) {
                (BooleanOp::Union, _) | (BooleanOp::Difference, Side::Subject) => true,
                (BooleanOp::Difference, Side::Clip) => false,
            };
            if !invert {
                continue;
            }
            let mut cur = start;
            loop {
                if self.nodes[cur].is_intersection() {
                    self.nodes[cur].entry = !self.nodes[cur].entry;
                }
                cur = self.nodes[cur].next;
                if cur == start {
                    break;
                }
            }
        }
    }

    fn mark_visited(&mut self, idx: usize) {
        self.nodes[idx].visited = true;
        if let Some(twin) = self.nodes[idx].neighbor {
            self.nodes[twin].visited = true;
        }
    }

    /// Trace one result ring starting from an unvisited crossing.
    fn trace(&mut self, start: usize, max_steps: usize) -> Result<Ring, GeometryError> {
        let mut ring = vec![self.nodes[start].pos];
        self.mark_visited(start);
        let mut cur = start;
        let mut steps = 0usize;

        loop {
            // Walk to the next crossing, collecting vertices. The direction
            // is fixed by the entry flag of the crossing we are leaving.
            let forward = self.nodes[cur].entry;
            loop {
                cur = if forward { self.nodes[cur].next } else { self.nodes[cur].prev };
                steps += 1;
                if steps > max_steps {
                    return Err(GeometryError::TraversalStalled { steps });
                }
                ring.push(self.nodes[cur].pos);
                if self.nodes[cur].is_intersection() {
                    break;
                }
            }
            self.mark_visited(cur);
            if cur == start || self.nodes[cur].neighbor == Some(start) {
                return Ok(ring);
            }
            // Switch to the other side's list.
            cur = self.nodes[cur].neighbor.unwrap_or(start);
        }
    }
}

/// Run one boolean operation over even-odd ring sets, producing a soup of
/// closed result rings.
fn boolean_rings(subject: &[Ring], clip: &[Ring], op: BooleanOp) -> Result<Vec<Ring>, GeometryError> {
    let (active_subject, active_clip, carried) = resolve_coincident(subject, clip, op);

    let mut crossings = find_crossings(&active_subject, &active_clip);

    let mut arena = Arena { nodes: Vec::new(), rings: Vec::new() };
    let subject_nodes = arena.build_side(&active_subject, Side::Subject, &mut crossings);
    let clip_nodes = arena.build_side(&active_clip, Side::Clip, &mut crossings);
    for k in 0..crossings.len() {
        arena.nodes[subject_nodes[k]].neighbor = Some(clip_nodes[k]);
        arena.nodes[clip_nodes[k]].neighbor = Some(subject_nodes[k]);
    }

    // Region membership still counts the resolved rings; only crossing
    // insertion and tracing skip them.
    arena.mark_entries(subject, clip);
    arena.apply_op(op);

    let mut result: Vec<Ring> = carried;

    // Rings with no crossings are kept or dropped wholesale.
    for &(start, side) in &arena.rings.clone() {
        let has_crossing = {
            let mut found = false;
            let mut cur = start;
            loop {
                if arena.nodes[cur].is_intersection() {
                    found = true;
                    break;
                }
                cur = arena.nodes[cur].next;
                if cur == start {
                    break;
                }
            }
            found
        };
        if has_crossing {
            continue;
        }
        let sample = arena.nodes[start].pos;
        let keep = match (op, side) {
            // Union keeps rings clear of the other region.
            (BooleanOp::Union, Side::Subject) => !point_in_rings(sample, clip),
            (BooleanOp::Union, Side::Clip) => !point_in_rings(sample, subject),
            // Difference keeps uncovered subject rings and turns covered
            // clip rings into holes.
            (BooleanOp::Difference, Side::Subject) => !point_in_rings(sample, clip),
            (BooleanOp::Difference, Side::Clip) => point_in_rings(sample, subject),
        };
        if keep {
            let mut ring = Vec::new();
            let mut cur = start;
            loop {
                ring.push(arena.nodes[cur].pos);
                cur = arena.nodes[cur].next;
                if cur == start {
                    break;
                }
            }
            result.push(ring);
        }
    }

    // Trace rings through the crossings.
    let max_steps = arena.nodes.len().saturating_mul(CLIP_STEP_FACTOR).max(16);
    for k in 0..crossings.len() {
        let node = subject_nodes[k];
        if arena.nodes[node].visited {
            continue;
        }
        result.push(arena.trace(node, max_steps)?);
    }

    Ok(clean_rings(result))
}

// ── Reassembly ──────────────────────────────────────────────────

/// Group a soup of non-crossing rings into polygons-with-holes by
/// containment parity: rings inside an even number of other rings are
/// outers, the rest are holes attached to their tightest containing outer.
fn assemble(rings: Vec<Ring>) -> Vec<Polygon> {
    let rings: Vec<Ring> = rings
        .into_iter()
        .filter(|ring| signed_area(ring).abs() > AREA_EPSILON)
        .collect();
    if rings.is_empty() {
        return Vec::new();
    }

    // Sample each ring at its leftmost vertex, which sits on the ring's
    // hull and so cannot be interior to the ring itself.
    let samples: Vec<Vec2> = rings
        .iter()
        .map(|ring| {
            ring.iter()
                .copied()
                .min_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
                .unwrap_or(Vec2::ZERO)
        })
        .collect();

    let containers: Vec<Vec<usize>> = (0..rings.len())
        .map(|i| {
            (0..rings.len())
                .filter(|&j| j != i && point_in_rings(samples[i], std::slice::from_ref(&rings[j])))
                .collect()
        })
        .collect();

    let mut polygons: Vec<Polygon> = Vec::new();
    let mut outer_of: Vec<Option<usize>> = vec![None; rings.len()];

    for (i, ring) in rings.iter().enumerate() {
        if containers[i].len() % 2 == 0 {
            outer_of[i] = Some(polygons.len());
            polygons.push(Polygon::new(oriented(ring.clone(), true), Vec::new()));
        }
    }
    for (i, ring) in rings.iter().enumerate() {
        if containers[i].len() % 2 == 0 {
            continue;
        }
        // Tightest containing outer ring.
        let parent = containers[i]
            .iter()
            .filter(|&&j| outer_of[j].is_some())
            .min_by(|&&a, &&b| signed_area(&rings[a]).abs().total_cmp(&signed_area(&rings[b]).abs()));
        if let Some(&parent_ring) = parent {
            if let Some(poly_idx) = outer_of[parent_ring] {
                polygons[poly_idx].holes.push(oriented(ring.clone(), false));
            }
        }
    }
    polygons
}

/// Normalize ring winding: outers counter-clockwise, holes clockwise.
fn oriented(mut ring: Ring, counter_clockwise: bool) -> Ring {
    if (signed_area(&ring) > 0.0) != counter_clockwise {
        ring.reverse();
    }
    ring
}
