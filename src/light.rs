use std::f64::consts::TAU;

use crate::math::{ccw_offset, Point2};

/// Per-frame state of one light or field-of-view observer.
///
/// A point light has `arc_angle == 2π`; anything narrower is a cone centred
/// on `arc_direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    pub position: Point2,
    /// Angular width of the lit sector (radians), in `(0, 2π]`.
    pub arc_angle: f64,
    /// Centre angle of the cone (radians). Ignored for full-circle lights.
    pub arc_direction: f64,
    /// Rays stop at this distance when set.
    pub max_range: Option<f64>,
}

impl LightState {
    /// Full-circle light with unlimited range.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            arc_angle: TAU,
            arc_direction: 0.0,
            max_range: None,
        }
    }

    /// Narrows the light to a cone of `arc_angle` radians centred on `arc_direction`.
    #[must_use]
    pub fn with_cone(mut self, arc_angle: f64, arc_direction: f64) -> Self {
        self.arc_angle = arc_angle.clamp(0.0, TAU);
        self.arc_direction = arc_direction;
        self
    }

    /// Limits the light's reach. A non-positive or non-finite range leaves the
    /// light unbounded.
    #[must_use]
    pub fn with_max_range(mut self, max_range: f64) -> Self {
        self.max_range = (max_range.is_finite() && max_range > 0.0).then_some(max_range);
        self
    }

    /// Whether the position and any range are usable for a sweep.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self
                .max_range
                .is_none_or(|range| range.is_finite() && range > 0.0)
    }

    pub fn move_to(&mut self, position: Point2) {
        self.position = position;
    }

    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        self.arc_angle >= TAU - 1e-12
    }

    /// Start of the lit sector. Full-circle lights start half a turn behind
    /// their direction.
    #[must_use]
    pub fn arc_start(&self) -> f64 {
        if self.is_full_circle() {
            self.arc_direction - TAU / 2.0
        } else {
            self.arc_direction - self.arc_angle / 2.0
        }
    }

    /// Angular width actually swept.
    #[must_use]
    pub fn sweep_width(&self) -> f64 {
        if self.is_full_circle() {
            TAU
        } else {
            self.arc_angle
        }
    }

    /// Whether `angle` lies inside the lit sector (inclusive at cone edges).
    #[must_use]
    pub fn covers(&self, angle: f64) -> bool {
        self.is_full_circle() || ccw_offset(self.arc_start(), angle) <= self.arc_angle
    }
}
