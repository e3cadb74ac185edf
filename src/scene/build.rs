use std::collections::HashSet;

use slotmap::SlotMap;

use super::{Boundary, Obstacle, Segment, SegmentKind, SegmentSet};
use crate::error::{Result, SceneError};
use crate::math::Point2;

/// Decomposes obstacles and the boundary rectangle into a [`SegmentSet`].
///
/// Runs once per scene. The four boundary walls are always emitted so every
/// ray cast later terminates on some segment.
#[derive(Debug)]
pub struct BuildSegmentSet<'a> {
    obstacles: &'a [Obstacle],
    boundary: Boundary,
}

impl<'a> BuildSegmentSet<'a> {
    /// Creates a new segment-set build.
    #[must_use]
    pub fn new(obstacles: &'a [Obstacle], boundary: Boundary) -> Self {
        Self {
            obstacles,
            boundary,
        }
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// - `SceneError::UnenclosedScene` if the boundary is not a finite rectangle
    ///   with positive extent
    /// - `SceneError::InvalidObstacle` if an obstacle has fewer than 3 vertices
    /// - `SceneError::NonFiniteCoordinate` if an obstacle vertex is NaN or infinite
    pub fn execute(&self) -> Result<SegmentSet> {
        self.check_enclosure()?;

        let edge_count: usize = self.obstacles.iter().map(|o| o.vertices.len()).sum();
        let mut segments = SlotMap::with_capacity_and_key(4 + edge_count);
        let mut endpoints = Vec::with_capacity(4 + edge_count);
        let mut seen = HashSet::with_capacity(4 + edge_count);

        let corners = self.boundary.corners();
        for i in 0..4 {
            let (a, b) = (corners[i], corners[(i + 1) % 4]);
            segments.insert(Segment::new(a, b, SegmentKind::Boundary));
            push_unique(&mut endpoints, &mut seen, a);
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            let vertex_count = obstacle.vertices.len();
            if vertex_count < 3 {
                return Err(SceneError::InvalidObstacle {
                    index,
                    vertex_count,
                }
                .into());
            }
            if obstacle
                .vertices
                .iter()
                .any(|p| !(p.x.is_finite() && p.y.is_finite()))
            {
                return Err(SceneError::NonFiniteCoordinate { index }.into());
            }
            for (a, b) in obstacle.edges() {
                segments.insert(Segment::new(a, b, SegmentKind::Obstacle(index)));
                push_unique(&mut endpoints, &mut seen, a);
            }
        }

        tracing::info!(
            obstacles = self.obstacles.len(),
            segments = segments.len(),
            endpoints = endpoints.len(),
            "built scene segment set"
        );

        Ok(SegmentSet {
            segments,
            endpoints,
            boundary: self.boundary,
        })
    }

    fn check_enclosure(&self) -> Result<()> {
        let Boundary { min, max } = self.boundary;
        let finite = [min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite());
        if !finite {
            return Err(SceneError::UnenclosedScene(
                "boundary rectangle has a non-finite corner".to_owned(),
            )
            .into());
        }
        if max.x <= min.x || max.y <= min.y {
            return Err(SceneError::UnenclosedScene(format!(
                "boundary rectangle ({}, {})-({}, {}) has no area",
                min.x, min.y, max.x, max.y
            ))
            .into());
        }
        Ok(())
    }
}

/// Every endpoint of a closed polygon starts exactly one of its edges, so
/// recording edge starts is enough.
fn push_unique(endpoints: &mut Vec<Point2>, seen: &mut HashSet<(u64, u64)>, p: Point2) {
    if seen.insert((p.x.to_bits(), p.y.to_bits())) {
        endpoints.push(p);
    }
}
