#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;

use super::*;

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

fn grid() -> GridSettings {
    GridSettings {
        cell_pixel_size: v(100.0, 100.0),
        offset: Vec2::ZERO,
        cell_pixel_offset: Vec2::ZERO,
    }
}

fn map_size() -> Vec2 {
    v(1000.0, 1000.0)
}

#[test]
fn grid_guides_near_a_line_on_both_axes() {
    // 2 px from the x = 500 line, 3 px from the y = 300 line.
    let guides = guides_from_grid(v(498.0, 303.0), &grid(), 0.1, map_size());
    assert_eq!(guides.len(), 2);

    let vertical = guides.iter().find(|g| g.orientation == GuideOrientation::Vertical).unwrap();
    assert_relative_eq!(vertical.axis_value(), 0.5);
    assert_eq!(vertical.start, v(0.5, 0.0));
    assert_eq!(vertical.end, v(0.5, 1.0));

    let horizontal = guides.iter().find(|g| g.orientation == GuideOrientation::Horizontal).unwrap();
    assert_relative_eq!(horizontal.axis_value(), 0.3);
}

#[test]
fn grid_guides_outside_sensitivity_are_absent() {
    // 50 px = half a cell away on both axes.
    let guides = guides_from_grid(v(450.0, 450.0), &grid(), 0.1, map_size());
    assert!(guides.is_empty());
}

#[test]
fn grid_guides_respect_offsets() {
    let offset_grid = GridSettings {
        cell_pixel_size: v(100.0, 100.0),
        offset: v(30.0, 0.0),
        cell_pixel_offset: Vec2::ZERO,
    };
    // 530 is exactly on a shifted grid line.
    let guides = guides_from_grid(v(531.0, 450.0), &offset_grid, 0.1, map_size());
    assert_eq!(guides.len(), 1);
    assert_relative_eq!(guides[0].axis_value(), 0.53);
}

#[test]
fn box_guides_at_edges_within_sensitivity() {
    let boxes = [BoundingBox { min: v(0.2, 0.2), max: v(0.4, 0.6) }];
    let cell = v(0.1, 0.1);
    // 0.005 normalized = 0.05 cells from the min.x edge.
    let guides = guides_from_bounding_boxes(v(0.205, 0.8), &boxes, cell, 0.1);
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].orientation, GuideOrientation::Vertical);
    assert_relative_eq!(guides[0].axis_value(), 0.2);
    // Spans from the box to the pointer.
    assert_relative_eq!(guides[0].start.y, 0.2);
    assert_relative_eq!(guides[0].end.y, 0.8);
}

#[test]
fn box_guides_none_when_far() {
    let boxes = [BoundingBox { min: v(0.2, 0.2), max: v(0.4, 0.6) }];
    let guides = guides_from_bounding_boxes(v(0.7, 0.9), &boxes, v(0.1, 0.1), 0.1);
    assert!(guides.is_empty());
}

#[test]
fn best_guides_keeps_at_most_one_per_axis() {
    let point = v(0.5, 0.5);
    let near = Guide {
        orientation: GuideOrientation::Vertical,
        start: v(0.51, 0.0),
        end: v(0.51, 1.0),
    };
    let far = Guide {
        orientation: GuideOrientation::Vertical,
        start: v(0.55, 0.0),
        end: v(0.55, 1.0),
    };
    let horizontal = Guide {
        orientation: GuideOrientation::Horizontal,
        start: v(0.0, 0.48),
        end: v(1.0, 0.48),
    };
    let best = find_best_guides(point, &[far, near, horizontal]);
    assert_eq!(best.len(), 2);
    assert!(best.contains(&near));
    assert!(best.contains(&horizontal));
    assert!(!best.contains(&far));
}

#[test]
fn best_guides_empty_for_no_candidates() {
    assert!(find_best_guides(v(0.5, 0.5), &[]).is_empty());
}

#[test]
fn closer_bounding_box_edge_beats_grid_line() {
    // Point is 0.5 cells (0.05 normalized) from the nearest grid line and
    // 0.05 cells (0.005 normalized) from a bounding-box edge. Both feed
    // the same selection; the box edge must win.
    let point = v(0.455, 0.8);
    let mut candidates = guides_from_grid(point.mul(map_size()), &grid(), 0.6, map_size());
    let boxes = [BoundingBox { min: v(0.45, 0.2), max: v(0.6, 0.6) }];
    candidates.extend(guides_from_bounding_boxes(point, &boxes, v(0.1, 0.1), 0.1));

    let best = find_best_guides(point, &candidates);
    let vertical = best.iter().find(|g| g.orientation == GuideOrientation::Vertical).unwrap();
    assert_relative_eq!(vertical.axis_value(), 0.45);
}
