use std::f64::consts::{PI, TAU};

use super::{Hit, VisibilityPolygon};
use crate::config::SweepConfig;
use crate::light::LightState;
use crate::math::polygon_2d::triangle_signed_area;

/// Drops vertices that close a fan triangle with signed area below
/// `area_epsilon`, returning how many were removed.
///
/// Such slivers come from rays grazing a shared vertex; negative areas mean
/// rounding flipped two vertices out of angular order. Only triangles spanning
/// less than half a turn are tested, since wider ones are legitimately
/// negative. This reduces false-dark artifacts but cannot rule them out.
pub fn filter_slivers(
    polygon: &mut VisibilityPolygon,
    light: &LightState,
    config: &SweepConfig,
) -> usize {
    let apex = light.position;
    let epsilon = config.area_epsilon;
    let mut removed = 0;

    let mut kept: Vec<Hit> = Vec::with_capacity(polygon.vertices.len());
    for hit in polygon.vertices.drain(..) {
        if let Some(prev) = kept.last_mut() {
            if hit.angle - prev.angle < PI {
                let area = triangle_signed_area(&apex, &prev.point, &hit.point);
                if area < epsilon {
                    tracing::debug!(
                        angle = hit.angle,
                        area,
                        x = hit.point.x,
                        y = hit.point.y,
                        "dropping sliver fan triangle"
                    );
                    if hit.at_endpoint && !prev.at_endpoint {
                        *prev = hit;
                    }
                    removed += 1;
                    continue;
                }
            }
        }
        kept.push(hit);
    }

    if polygon.closed && kept.len() > 2 {
        let first = kept[0];
        if let Some(last) = kept.last().copied() {
            if first.angle + TAU - last.angle < PI
                && triangle_signed_area(&apex, &last.point, &first.point) < epsilon
            {
                tracing::debug!(angle = last.angle, "dropping sliver fan triangle at seam");
                kept.pop();
                removed += 1;
            }
        }
    }

    polygon.vertices = kept;
    removed
}
