use super::Point2;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Signed area of the triangle `(apex, a, b)`.
///
/// Positive when `a -> b` turns counter-clockwise around `apex`.
#[must_use]
pub fn triangle_signed_area(apex: &Point2, a: &Point2, b: &Point2) -> f64 {
    0.5 * (a - apex).perp(&(b - apex))
}
