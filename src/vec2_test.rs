#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;

use super::*;

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

#[test]
fn add_sub_are_componentwise() {
    let a = v(1.0, 2.0);
    let b = v(0.5, -1.0);
    assert_eq!(a + b, v(1.5, 1.0));
    assert_eq!(a - b, v(0.5, 3.0));
}

#[test]
fn scalar_mul_div() {
    let a = v(2.0, -4.0);
    assert_eq!(a * 0.5, v(1.0, -2.0));
    assert_eq!(a / 2.0, v(1.0, -2.0));
}

#[test]
fn componentwise_mul_div() {
    let a = v(0.5, 0.25);
    let size = v(1000.0, 2000.0);
    assert_eq!(a.mul(size), v(500.0, 500.0));
    assert_eq!(a.mul(size).div(size), a);
}

#[test]
fn length_and_distance() {
    assert_relative_eq!(v(3.0, 4.0).length(), 5.0);
    assert_relative_eq!(v(1.0, 1.0).distance(v(4.0, 5.0)), 5.0);
}

#[test]
fn cross_sign_follows_orientation() {
    // Counter-clockwise turn is positive in y-up coordinates.
    assert!(v(1.0, 0.0).cross(v(0.0, 1.0)) > 0.0);
    assert!(v(0.0, 1.0).cross(v(1.0, 0.0)) < 0.0);
}

#[test]
fn close_to_uses_euclidean_distance() {
    let a = v(0.1, 0.1);
    assert!(a.close_to(v(0.1005, 0.1005), 0.001));
    assert!(!a.close_to(v(0.102, 0.1), 0.001));
}

#[test]
fn round_and_abs() {
    assert_eq!(v(1.4, -1.6).round(), v(1.0, -2.0));
    assert_eq!(v(-1.5, 2.5).abs(), v(1.5, 2.5));
}

#[test]
fn distance_to_segment_interior() {
    let d = v(1.0, 1.0).distance_to_segment(v(0.0, 0.0), v(2.0, 0.0));
    assert_relative_eq!(d, 1.0);
}

#[test]
fn distance_to_segment_clamps_to_endpoints() {
    let d = v(-3.0, 4.0).distance_to_segment(v(0.0, 0.0), v(2.0, 0.0));
    assert_relative_eq!(d, 5.0);
}

#[test]
fn distance_to_degenerate_segment_is_point_distance() {
    let p = v(1.0, 0.0);
    let d = p.distance_to_segment(v(0.0, 0.0), v(0.0, 0.0));
    assert_relative_eq!(d, 1.0);
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = v(0.0, 0.0);
    let b = v(2.0, 4.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), v(1.0, 2.0));
}

#[test]
fn serde_roundtrip() {
    let a = v(0.25, 0.75);
    let json = serde_json::to_string(&a).unwrap();
    let back: Vec2 = serde_json::from_str(&json).unwrap();
    assert_eq!(a, back);
}
