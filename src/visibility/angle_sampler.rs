use std::f64::consts::TAU;

use crate::config::SweepConfig;
use crate::light::LightState;
use crate::math::{angle_to, ccw_offset, TOLERANCE};
use crate::scene::SegmentSet;

/// Upper bound on rim samples per sweep, whatever `range_arc_step` says.
const MAX_RIM_SAMPLES: usize = 65_536;

/// One candidate ray direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSample {
    /// Absolute angle, in `[arc_start, arc_start + sweep_width]`.
    pub angle: f64,
    /// Aimed straight at a segment endpoint or along a cone edge, rather than
    /// being an offset companion or a range-rim sample.
    pub primary: bool,
}

/// Returns the ascending, merged ray angles for `light`.
#[must_use]
pub fn sample_angles(
    light: &LightState,
    segments: &SegmentSet,
    config: &SweepConfig,
) -> Vec<AngleSample> {
    let mut out = Vec::with_capacity(segments.endpoints().len() * 3 + 2);
    sample_angles_into(light, segments, config, &mut out);
    out
}

/// Fills `out` with the ray angles for `light`, reusing its allocation.
///
/// Every endpoint in range contributes `θ - ε`, `θ` and `θ + ε`. Cones discard
/// angles outside their wedge and always include both edge angles. Range-limited
/// lights also sample their rim every `range_arc_step`. Angles closer than
/// `angle_merge_epsilon` collapse into one, keeping a primary sample.
pub fn sample_angles_into(
    light: &LightState,
    segments: &SegmentSet,
    config: &SweepConfig,
    out: &mut Vec<AngleSample>,
) {
    out.clear();
    let origin = light.position;
    let start = light.arc_start();
    let width = light.sweep_width();
    let full = light.is_full_circle();
    let offset = config.angle_offset;

    let mut push_wrapped = |angle: f64, primary: bool| {
        let delta = ccw_offset(start, angle);
        if full || delta <= width {
            out.push(AngleSample {
                angle: start + delta,
                primary,
            });
        }
    };

    for endpoint in segments.endpoints() {
        let distance = (endpoint - origin).norm();
        if distance < TOLERANCE {
            continue;
        }
        if light.max_range.is_some_and(|range| distance > range) {
            continue;
        }
        let theta = angle_to(&origin, endpoint);
        push_wrapped(theta - offset, false);
        push_wrapped(theta, true);
        push_wrapped(theta + offset, false);
    }

    if !full {
        out.push(AngleSample {
            angle: start,
            primary: true,
        });
        out.push(AngleSample {
            angle: start + width,
            primary: true,
        });
    }

    if light.max_range.is_some() {
        push_rim_samples(start, width, full, config.range_arc_step, out);
    }

    out.sort_by(|a, b| a.angle.total_cmp(&b.angle));
    merge_close(out, config.angle_merge_epsilon, full);
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn push_rim_samples(start: f64, width: f64, full: bool, step: f64, out: &mut Vec<AngleSample>) {
    let steps = (width / step).ceil().clamp(1.0, MAX_RIM_SAMPLES as f64) as usize;
    let spacing = width / steps as f64;
    // A full circle's last rim sample would duplicate the first.
    let count = if full { steps } else { steps + 1 };
    out.extend((0..count).map(|k| AngleSample {
        angle: start + spacing * k as f64,
        primary: false,
    }));
}

/// Collapses runs of sorted samples closer than `epsilon`. For a full circle the
/// last sample is also compared against the first across the seam.
fn merge_close(samples: &mut Vec<AngleSample>, epsilon: f64, full: bool) {
    let mut merged: Vec<AngleSample> = Vec::with_capacity(samples.len());
    for sample in samples.drain(..) {
        match merged.last_mut() {
            Some(last) if sample.angle - last.angle <= epsilon => {
                if sample.primary && !last.primary {
                    *last = sample;
                }
            }
            _ => merged.push(sample),
        }
    }

    if full && merged.len() > 1 {
        let first = merged[0];
        if let Some(last) = merged.last().copied() {
            if first.angle + TAU - last.angle <= epsilon {
                merged.pop();
                if last.primary && !first.primary {
                    merged[0] = AngleSample {
                        angle: last.angle - TAU,
                        primary: true,
                    };
                }
            }
        }
    }

    *samples = merged;
}
