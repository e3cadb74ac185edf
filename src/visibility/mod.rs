//! Radial-sweep visibility: sample ray angles, cast each ray against the
//! scene's segments, then fold the ordered hits into a fan polygon.

mod angle_sampler;
mod assemble;
mod ray_caster;
mod robustness;

pub use angle_sampler::{sample_angles, sample_angles_into, AngleSample};
pub use assemble::assemble;
pub use ray_caster::cast_ray;
pub use robustness::filter_slivers;

use crate::config::SweepConfig;
use crate::light::LightState;
use crate::math::polygon_2d::{signed_area_2d, triangle_signed_area};
use crate::math::Point2;
use crate::scene::{SegmentId, SegmentSet};

/// Where one ray stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Point2,
    /// Distance from the light to `point`.
    pub distance: f64,
    /// Angle of the ray that produced the hit.
    pub angle: f64,
    /// Segment the ray stopped on, or `None` if it ran out of range.
    pub segment: Option<SegmentId>,
    /// The hit is exactly a segment endpoint.
    pub at_endpoint: bool,
}

/// Angularly ordered fan of hits around a light.
///
/// The light position is not stored; renderers anchor the triangle fan there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityPolygon {
    vertices: Vec<Hit>,
    closed: bool,
}

impl VisibilityPolygon {
    /// Ordered vertices with their ray metadata.
    #[must_use]
    pub fn vertices(&self) -> &[Hit] {
        &self.vertices
    }

    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.vertices.iter().map(|h| h.point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the fan wraps all the way around (full-circle light).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fan triangles `(apex, v_i, v_i+1)`, including the seam triangle when closed.
    #[must_use]
    pub fn triangles(&self, apex: Point2) -> Vec<[Point2; 3]> {
        let n = self.vertices.len();
        if n < 2 {
            return Vec::new();
        }
        let count = if self.closed { n } else { n - 1 };
        (0..count)
            .map(|i| [apex, self.vertices[i].point, self.vertices[(i + 1) % n].point])
            .collect()
    }

    /// Lit area of the fan anchored at `apex`.
    #[must_use]
    pub fn area(&self, apex: Point2) -> f64 {
        if self.closed {
            let points: Vec<Point2> = self.points().collect();
            return signed_area_2d(&points);
        }
        self.triangles(apex)
            .iter()
            .map(|[a, b, c]| triangle_signed_area(a, b, c))
            .sum()
    }
}

/// Runs visibility sweeps, reusing its scratch buffers across calls.
///
/// Holds no scene state: each sweep is a pure function of the light and the
/// segment set.
#[derive(Debug, Default)]
pub struct Sweeper {
    config: SweepConfig,
    samples: Vec<AngleSample>,
    rays: Vec<Hit>,
}

impl Sweeper {
    #[must_use]
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            samples: Vec::new(),
            rays: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Computes the visibility polygon of `light`.
    ///
    /// A light with a non-finite position, or a range that is not positive and
    /// finite, yields an empty polygon.
    pub fn compute(&mut self, light: &LightState, segments: &SegmentSet) -> VisibilityPolygon {
        self.rays.clear();
        if !light.is_valid() {
            tracing::warn!(
                x = light.position.x,
                y = light.position.y,
                max_range = ?light.max_range,
                "light position or range is unusable, skipping sweep"
            );
            return VisibilityPolygon {
                vertices: Vec::new(),
                closed: light.is_full_circle(),
            };
        }
        if !segments.boundary().contains(&light.position) {
            tracing::debug!(
                x = light.position.x,
                y = light.position.y,
                "light lies outside the scene boundary"
            );
        }

        sample_angles_into(light, segments, &self.config, &mut self.samples);
        self.rays.extend(
            self.samples
                .iter()
                .map(|s| cast_ray(light, s.angle, segments, &self.config)),
        );

        let mut polygon = assemble(&self.rays, light, segments, &self.config);
        let removed = filter_slivers(&mut polygon, light, &self.config);
        tracing::trace!(
            rays = self.rays.len(),
            vertices = polygon.len(),
            removed,
            "visibility sweep finished"
        );
        polygon
    }

    /// Raw per-angle hits of the most recent sweep, for a ray overlay.
    #[must_use]
    pub fn rays(&self) -> &[Hit] {
        &self.rays
    }

    /// Sweeps every light of one frame, returning polygons in input order.
    pub fn compute_frame(
        &mut self,
        lights: &[LightState],
        segments: &SegmentSet,
    ) -> Vec<VisibilityPolygon> {
        lights
            .iter()
            .map(|light| self.compute(light, segments))
            .collect()
    }
}

/// One-shot visibility polygon for `light`.
#[must_use]
pub fn compute_visibility(
    light: &LightState,
    segments: &SegmentSet,
    config: &SweepConfig,
) -> VisibilityPolygon {
    Sweeper::new(*config).compute(light, segments)
}
