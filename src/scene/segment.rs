use crate::math::{Point2, Vector2, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for a segment in a [`SegmentSet`](super::SegmentSet).
    pub struct SegmentId;
}

/// Where a segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// One of the four walls of the enclosing rectangle.
    Boundary,
    /// An edge of the obstacle at this index in the scene's obstacle list.
    Obstacle(usize),
}

/// An opaque line segment blocking light.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Start point.
    pub a: Point2,
    /// End point.
    pub b: Point2,
    pub kind: SegmentKind,
}

impl Segment {
    /// Creates a new segment from `a` to `b`.
    #[must_use]
    pub fn new(a: Point2, b: Point2, kind: SegmentKind) -> Self {
        Self { a, b, kind }
    }

    /// Vector from `a` to `b`.
    #[must_use]
    pub fn delta(&self) -> Vector2 {
        self.b - self.a
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    /// Whether `p` lies on the segment. `tolerance` is relative to the
    /// segment's length, both across the line and along it.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, tolerance: f64) -> bool {
        let d = self.delta();
        let length = d.norm();
        let w = p - self.a;
        if length <= TOLERANCE {
            return w.norm() <= tolerance;
        }
        if w.perp(&d).abs() / length > tolerance * length.max(1.0) {
            return false;
        }
        let u = w.dot(&d) / (length * length);
        u >= -tolerance && u <= 1.0 + tolerance
    }

    /// Point at parameter `u`, returning the exact endpoint for `u` of 0 or 1.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Point2 {
        if u <= 0.0 {
            self.a
        } else if u >= 1.0 {
            self.b
        } else {
            self.a + self.delta() * u
        }
    }
}
