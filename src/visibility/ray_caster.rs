use super::Hit;
use crate::config::SweepConfig;
use crate::light::LightState;
use crate::math::intersect_2d::{point_at, ray_segment_intersect_2d};
use crate::math::{direction, Point2};
use crate::scene::{Boundary, SegmentId, SegmentSet};

/// Relative tolerance under which two hit distances count as equal.
const TIE_TOLERANCE: f64 = 1e-9;

struct Candidate {
    t: f64,
    u: f64,
    id: SegmentId,
    at_endpoint: bool,
}

/// Casts one ray from the light at `angle` and returns the nearest hit.
///
/// Among segments hit at the same distance, one hit exactly at an endpoint wins
/// over a mid-edge one, then the earlier segment in the set. If nothing is hit
/// within range, the ray ends at `max_range` (or, for unbounded lights, at the
/// farthest boundary corner) with no owning segment.
#[must_use]
pub fn cast_ray(
    light: &LightState,
    angle: f64,
    segments: &SegmentSet,
    config: &SweepConfig,
) -> Hit {
    let origin = light.position;
    let dir = direction(angle);
    let limit = light.max_range.unwrap_or(f64::INFINITY);
    let snap = config.endpoint_tolerance;

    let mut best: Option<Candidate> = None;
    for (id, segment) in segments.iter() {
        let Some((t, u)) = ray_segment_intersect_2d(&origin, &dir, &segment.a, &segment.b, snap)
        else {
            continue;
        };
        if t > limit {
            continue;
        }
        let u = if u <= snap {
            0.0
        } else if u >= 1.0 - snap {
            1.0
        } else {
            u
        };
        let at_endpoint = u <= 0.0 || u >= 1.0;

        let better = match &best {
            None => true,
            Some(current) => {
                if (t - current.t).abs() <= TIE_TOLERANCE * t.max(1.0) {
                    at_endpoint && !current.at_endpoint
                } else {
                    t < current.t
                }
            }
        };
        if better {
            best = Some(Candidate {
                t,
                u,
                id,
                at_endpoint,
            });
        }
    }

    if let Some(found) = best {
        if let Some(segment) = segments.get(found.id) {
            let point = segment.point_at(found.u);
            return Hit {
                point,
                distance: (point - origin).norm(),
                angle,
                segment: Some(found.id),
                at_endpoint: found.at_endpoint,
            };
        }
    }

    let reach = light
        .max_range
        .unwrap_or_else(|| farthest_corner(segments.boundary(), &origin));
    tracing::debug!(angle, reach, "ray escaped all segments, clipping at range bound");
    Hit {
        point: point_at(&origin, &dir, reach),
        distance: reach,
        angle,
        segment: None,
        at_endpoint: false,
    }
}

fn farthest_corner(boundary: &Boundary, origin: &Point2) -> f64 {
    boundary
        .corners()
        .iter()
        .map(|c| (c - origin).norm())
        .fold(0.0, f64::max)
}
