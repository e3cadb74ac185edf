pub mod intersect_2d;
pub mod polygon_2d;

use std::f64::consts::TAU;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Angle from `origin` toward `target`, in `(-π, π]`.
#[must_use]
pub fn angle_to(origin: &Point2, target: &Point2) -> f64 {
    (target.y - origin.y).atan2(target.x - origin.x)
}

/// Unit direction vector for `angle`.
#[must_use]
pub fn direction(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}

/// Counter-clockwise offset from `start` to `angle`, wrapped into `[0, 2π)`.
#[must_use]
pub fn ccw_offset(start: f64, angle: f64) -> f64 {
    let delta = (angle - start).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if delta >= TAU {
        0.0
    } else {
        delta
    }
}
