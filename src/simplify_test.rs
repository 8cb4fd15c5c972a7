#![allow(clippy::float_cmp)]

use super::*;

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

fn cell() -> Vec2 {
    v(0.05, 0.05)
}

#[test]
fn empty_and_tiny_inputs_pass_through() {
    assert!(simplify_points(&[], cell(), 1.0).is_empty());

    let one = [v(0.1, 0.1)];
    assert_eq!(simplify_points(&one, cell(), 1.0), one);

    let two = [v(0.1, 0.1), v(0.9, 0.9)];
    assert_eq!(simplify_points(&two, cell(), 1.0), two);
}

#[test]
fn collinear_interior_points_are_dropped() {
    let points = [v(0.0, 0.0), v(0.25, 0.0), v(0.5, 0.0), v(0.75, 0.0), v(1.0, 0.0)];
    let out = rdp(&points, 0.001);
    assert_eq!(out, vec![v(0.0, 0.0), v(1.0, 0.0)]);
}

#[test]
fn sharp_corner_survives() {
    let points = [v(0.0, 0.0), v(0.5, 0.0), v(0.5, 0.5)];
    let out = rdp(&points, 0.01);
    assert_eq!(out, points.to_vec());
}

#[test]
fn endpoints_are_always_preserved() {
    let points = [v(0.1, 0.1), v(0.1001, 0.1), v(0.1002, 0.1)];
    let out = rdp(&points, 0.5);
    assert_eq!(out.first(), Some(&v(0.1, 0.1)));
    assert_eq!(out.last(), Some(&v(0.1002, 0.1)));
}

#[test]
fn never_increases_point_count() {
    let points: Vec<Vec2> = (0..50)
        .map(|i| {
            let t = f64::from(i) / 49.0;
            v(t, (t * 20.0).sin() * 0.1)
        })
        .collect();
    let out = simplify_points(&points, cell(), 1.0);
    assert!(out.len() <= points.len());
    assert!(!out.is_empty());
}

#[test]
fn idempotent() {
    let points: Vec<Vec2> = (0..30)
        .map(|i| {
            let t = f64::from(i) / 29.0;
            v(t, (t * 12.0).cos() * 0.05)
        })
        .collect();
    let once = simplify_points(&points, cell(), 1.0);
    let twice = simplify_points(&once, cell(), 1.0);
    assert_eq!(once, twice);
}

#[test]
fn does_not_reorder_points() {
    let points = [v(0.0, 0.0), v(0.3, 0.2), v(0.6, 0.0), v(0.9, 0.3)];
    let out = rdp(&points, 0.01);
    let mut last_seen = 0;
    for p in &out {
        let idx = points.iter().position(|q| q == p).unwrap();
        assert!(idx >= last_seen);
        last_seen = idx;
    }
}

#[test]
fn larger_zoom_keeps_more_detail() {
    let points: Vec<Vec2> = (0..40)
        .map(|i| {
            let t = f64::from(i) / 39.0;
            v(t, (t * 30.0).sin() * 0.004)
        })
        .collect();
    let zoomed_out = simplify_points(&points, cell(), 0.5);
    let zoomed_in = simplify_points(&points, cell(), 4.0);
    assert!(zoomed_in.len() >= zoomed_out.len());
}
