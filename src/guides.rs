//! Snap-to-grid and snap-to-shape alignment guides.
//!
//! While the rectangle or polygon tool is active, every pointer move
//! proposes candidate guides from nearby grid lines and from other shapes'
//! bounding-box edges, then keeps at most one guide per axis. Guides are
//! ephemeral: recomputed per event, never persisted, and consumed only by
//! the host renderer and by brush-position snapping.

#[cfg(test)]
#[path = "guides_test.rs"]
mod guides_test;

use crate::bounds::BoundingBox;
use crate::vec2::Vec2;

/// Guide axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    /// A guide along a constant x.
    Vertical,
    /// A guide along a constant y.
    Horizontal,
}

/// An alignment guide line in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub orientation: GuideOrientation,
    pub start: Vec2,
    pub end: Vec2,
}

impl Guide {
    /// The guide's fixed coordinate on its axis.
    #[must_use]
    pub fn axis_value(&self) -> f64 {
        match self.orientation {
            GuideOrientation::Vertical => self.start.x,
            GuideOrientation::Horizontal => self.start.y,
        }
    }

    /// Perpendicular distance from `point` to this guide.
    #[must_use]
    pub fn distance_to(&self, point: Vec2) -> f64 {
        match self.orientation {
            GuideOrientation::Vertical => (point.x - self.axis_value()).abs(),
            GuideOrientation::Horizontal => (point.y - self.axis_value()).abs(),
        }
    }
}

/// Grid geometry in map pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Pixel dimensions of one grid cell.
    pub cell_pixel_size: Vec2,
    /// Pixel offset of the grid origin within the map.
    pub offset: Vec2,
    /// Sub-cell pixel offset (hex grids shift rows by half a cell).
    pub cell_pixel_offset: Vec2,
}

/// Candidate guides from nearby grid lines.
///
/// `pixel_point` is the pointer in map pixel space; a guide is proposed per
/// axis when the pointer lies within `sensitivity` grid-cell units of a
/// grid line. Grid guides span the full map on their axis.
#[must_use]
pub fn guides_from_grid(
    pixel_point: Vec2,
    grid: &GridSettings,
    sensitivity: f64,
    map_size: Vec2,
) -> Vec<Guide> {
    let origin = grid.offset + grid.cell_pixel_offset;
    let cell_point = (pixel_point - origin).div(grid.cell_pixel_size);
    let snapped = cell_point.round();
    let diff = (snapped - cell_point).abs();

    let mut guides = Vec::new();
    if diff.x < sensitivity {
        let x = (snapped.x * grid.cell_pixel_size.x + origin.x) / map_size.x;
        guides.push(Guide {
            orientation: GuideOrientation::Vertical,
            start: Vec2::new(x, 0.0),
            end: Vec2::new(x, 1.0),
        });
    }
    if diff.y < sensitivity {
        let y = (snapped.y * grid.cell_pixel_size.y + origin.y) / map_size.y;
        guides.push(Guide {
            orientation: GuideOrientation::Horizontal,
            start: Vec2::new(0.0, y),
            end: Vec2::new(1.0, y),
        });
    }
    guides
}

/// Candidate guides from other shapes' bounding-box edges.
///
/// `point` is in normalized coordinates and `cell_size` is the normalized
/// grid cell, used to express `sensitivity` in cell units. Box guides span
/// from the box extent to the pointer so the renderer can draw the
/// alignment relation rather than a full-map line.
#[must_use]
pub fn guides_from_bounding_boxes(
    point: Vec2,
    boxes: &[BoundingBox],
    cell_size: Vec2,
    sensitivity: f64,
) -> Vec<Guide> {
    let mut guides = Vec::new();
    for bb in boxes {
        for x in [bb.min.x, bb.max.x] {
            if (point.x - x).abs() / cell_size.x < sensitivity {
                guides.push(Guide {
                    orientation: GuideOrientation::Vertical,
                    start: Vec2::new(x, bb.min.y.min(point.y)),
                    end: Vec2::new(x, bb.max.y.max(point.y)),
                });
            }
        }
        for y in [bb.min.y, bb.max.y] {
            if (point.y - y).abs() / cell_size.y < sensitivity {
                guides.push(Guide {
                    orientation: GuideOrientation::Horizontal,
                    start: Vec2::new(bb.min.x.min(point.x), y),
                    end: Vec2::new(bb.max.x.max(point.x), y),
                });
            }
        }
    }
    guides
}

/// Keep at most one guide per orientation: the candidate closest to the
/// point on its axis.
#[must_use]
pub fn find_best_guides(point: Vec2, candidates: &[Guide]) -> Vec<Guide> {
    let mut best: Vec<Guide> = Vec::with_capacity(2);
    for orientation in [GuideOrientation::Vertical, GuideOrientation::Horizontal] {
        let winner = candidates
            .iter()
            .filter(|g| g.orientation == orientation)
            .min_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)));
        if let Some(guide) = winner {
            best.push(*guide);
        }
    }
    best
}
