use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    // Scale-aware: compare the sine of the angle between the lines.
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let w = p2 - p1;
    let t = w.perp(d2) / cross;
    let u = w.perp(d1) / cross;
    Some((t, u))
}

/// Intersection of the ray `origin + t * dir` (`t >= 0`) with the segment `a`-`b`.
///
/// Returns `(t, u)` where `u` is the segment parameter clamped to `[0, 1]`.
/// `u_tolerance` widens the accepted segment range so rays aimed exactly at an
/// endpoint are not lost to rounding. Parallel or degenerate systems yield `None`.
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    a: &Point2,
    b: &Point2,
    u_tolerance: f64,
) -> Option<(f64, f64)> {
    let (t, u) = line_line_intersect_2d(origin, dir, a, &(b - a))?;
    if t < -TOLERANCE || u < -u_tolerance || u > 1.0 + u_tolerance {
        return None;
    }
    Some((t.max(0.0), u.clamp(0.0, 1.0)))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}
