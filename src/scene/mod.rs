//! Static scene geometry: obstacles, the enclosing boundary, and the
//! immutable segment set every sweep reads.

mod build;
mod segment;

pub use build::BuildSegmentSet;
pub use segment::{Segment, SegmentId, SegmentKind};

use slotmap::SlotMap;

use crate::math::Point2;

/// A closed opaque polygon. Its last vertex connects back to the first.
#[derive(Debug, Clone, Default)]
pub struct Obstacle {
    pub vertices: Vec<Point2>,
}

impl Obstacle {
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// Consecutive vertex pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Axis-aligned rectangle enclosing the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub min: Point2,
    pub max: Point2,
}

impl Boundary {
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// A `width` x `height` rectangle anchored at the origin.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Point2::origin(), Point2::new(width, height))
    }

    /// Corners in counter-clockwise order starting at `min`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Immutable set of light-blocking segments for one scene.
///
/// Boundary walls are always present and inserted first, so iteration order
/// is: four walls, then obstacle edges in input order.
#[derive(Debug, Clone)]
pub struct SegmentSet {
    segments: SlotMap<SegmentId, Segment>,
    endpoints: Vec<Point2>,
    boundary: Boundary,
}

impl SegmentSet {
    /// Returns the segment, or `None` if the id belongs to another set.
    #[must_use]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Iterates over all segments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Distinct segment endpoints, in first-seen order.
    #[must_use]
    pub fn endpoints(&self) -> &[Point2] {
        &self.endpoints
    }

    #[must_use]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }
}
