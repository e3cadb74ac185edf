use std::f64::consts::{PI, TAU};

use super::{Hit, VisibilityPolygon};
use crate::config::SweepConfig;
use crate::light::LightState;
use crate::scene::SegmentSet;

/// Builds the fan polygon from hits ordered by angle.
///
/// A hit within `distance_epsilon` of the previously emitted vertex is folded
/// into it; if the folded hit sits exactly on a segment endpoint and the
/// emitted one does not, the endpoint hit takes its place. Full-circle fans
/// also fold the last vertex into the first across the seam. Finally, mid-edge
/// vertices whose neighbours both lie on the same segment are dropped.
#[must_use]
pub fn assemble(
    hits: &[Hit],
    light: &LightState,
    segments: &SegmentSet,
    config: &SweepConfig,
) -> VisibilityPolygon {
    let epsilon = config.distance_epsilon;
    let mut vertices: Vec<Hit> = Vec::with_capacity(hits.len());

    for hit in hits {
        if let Some(last) = vertices.last_mut() {
            if (hit.point - last.point).norm() < epsilon {
                if hit.at_endpoint && !last.at_endpoint {
                    *last = *hit;
                }
                continue;
            }
        }
        vertices.push(*hit);
    }

    let closed = light.is_full_circle();
    if closed && vertices.len() > 1 {
        if let Some(last) = vertices.last().copied() {
            if (last.point - vertices[0].point).norm() < epsilon {
                vertices.pop();
                if last.at_endpoint && !vertices[0].at_endpoint {
                    vertices[0] = Hit {
                        angle: last.angle - TAU,
                        ..last
                    };
                }
            }
        }
    }

    let folded = fold_collinear(&mut vertices, closed, segments, config.endpoint_tolerance);

    tracing::trace!(
        hits = hits.len(),
        vertices = vertices.len(),
        folded,
        "assembled visibility polygon"
    );

    VisibilityPolygon { vertices, closed }
}

/// Removes mid-edge vertices lying on one segment together with both of their
/// neighbours, returning how many were removed.
///
/// This catches companions of far corners, which land `distance * angle_offset`
/// from the corner and escape the distance fold.
fn fold_collinear(
    vertices: &mut Vec<Hit>,
    closed: bool,
    segments: &SegmentSet,
    tolerance: f64,
) -> usize {
    let redundant = |prev: &Hit, mid: &Hit, next: &Hit, wrap: f64| {
        if mid.at_endpoint || next.angle + wrap - prev.angle >= PI {
            return false;
        }
        mid.segment
            .and_then(|id| segments.get(id))
            .is_some_and(|segment| {
                segment.contains_point(&prev.point, tolerance)
                    && segment.contains_point(&next.point, tolerance)
            })
    };

    let before = vertices.len();
    let mut kept: Vec<Hit> = Vec::with_capacity(before);
    for hit in vertices.drain(..) {
        while let [.., prev, mid] = kept.as_slice() {
            if !redundant(prev, mid, &hit, 0.0) {
                break;
            }
            kept.pop();
        }
        kept.push(hit);
    }

    if closed {
        while kept.len() > 3 {
            let n = kept.len();
            if redundant(&kept[n - 2], &kept[n - 1], &kept[0], TAU) {
                kept.pop();
            } else if redundant(&kept[n - 1], &kept[0], &kept[1], TAU) {
                kept.remove(0);
            } else {
                break;
            }
        }
    }

    *vertices = kept;
    before - vertices.len()
}
