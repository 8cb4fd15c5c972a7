//! Fog-level merge and subtract operations.
//!
//! `merge_fog_shapes` collapses overlapping fog shapes into a minimal
//! renderable set; `subtract_shapes` cuts a reference region out of
//! candidate shapes at commit time. Both are pure transformers over host
//! data: they never mutate their inputs and return replacement shapes with
//! fresh ids.

#[cfg(test)]
#[path = "fog_test.rs"]
mod fog_test;

use tracing::warn;

use crate::clip::{self, Polygon};
use crate::shape::{Shape, ShapeColor, ShapeMap};

fn to_polygon(shape: &Shape) -> Polygon {
    Polygon::new(shape.points.clone(), shape.holes.clone())
}

/// Merge a set of fog shapes into the minimal polygon set covering their
/// union.
///
/// When `ignore_hidden` is set, hidden shapes (already-cut regions) are
/// excluded from the union. Result shapes inherit stroke and kind from the
/// first merged input and are always visible, black fog; the caller decides
/// whether the result replaces or supplements the originals.
///
/// If the union cannot be computed the inputs are returned unchanged, so a
/// malformed shape degrades rendering instead of dropping fog.
#[must_use]
pub fn merge_fog_shapes(shapes: &[Shape], ignore_hidden: bool) -> Vec<Shape> {
    let merged: Vec<&Shape> = shapes
        .iter()
        .filter(|shape| !(ignore_hidden && !shape.visible))
        .collect();
    let Some(first) = merged.first() else {
        return Vec::new();
    };

    let polygons: Vec<Polygon> = merged.iter().map(|s| to_polygon(s)).collect();
    match clip::union_all(&polygons) {
        Ok(union) => union
            .into_iter()
            .map(|poly| {
                let mut shape = first.with_geometry(poly.outer, poly.holes);
                shape.color = ShapeColor::Black;
                shape.visible = true;
                shape
            })
            .collect(),
        Err(err) => {
            warn!(%err, shapes = merged.len(), "fog merge failed, keeping shapes unmerged");
            merged.into_iter().cloned().collect()
        }
    }
}

/// Subtract a reference region from every candidate shape.
///
/// The region is typically the merged union of the shapes opposing the
/// current edit (see the session commit pipeline). Each candidate is cut
/// independently: a candidate split into disjoint pieces contributes one
/// output shape per piece, a candidate fully covered by the region
/// degenerates to nothing, and a candidate whose geometry cannot be
/// processed passes through unchanged so its siblings still commit.
///
/// Resulting shapes carry fresh ids; degenerate results (fewer than 3
/// points) are kept out of the output.
#[must_use]
pub fn subtract_shapes(region: &[Shape], candidates: &ShapeMap) -> ShapeMap {
    let region_polygons: Vec<Polygon> = region.iter().map(to_polygon).collect();

    let mut result = ShapeMap::new();
    for (id, shape) in candidates {
        match clip::difference(&to_polygon(shape), &region_polygons) {
            Ok(pieces) => {
                for piece in pieces {
                    let replacement = shape.with_geometry(piece.outer, piece.holes);
                    if replacement.is_valid_polygon() {
                        result.insert(replacement.id, replacement);
                    }
                }
            }
            Err(err) => {
                warn!(%err, shape = %id, "subtract failed for shape, passing it through");
                result.insert(*id, shape.clone());
            }
        }
    }
    result
}
