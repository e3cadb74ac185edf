//! Scene-wide tunables, loaded once at startup and passed explicitly to the
//! scene loader and the sweep.

use std::f64::consts::{PI, TAU};

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::light::LightState;
use crate::math::Point2;
use crate::scene::Boundary;

/// Smallest accepted rim sampling step (radians).
pub const MIN_RANGE_ARC_STEP: f64 = 1e-4;

/// Numeric tolerances steering one visibility sweep.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Offset of the companion rays cast beside every segment endpoint (radians).
    pub angle_offset: f64,
    /// Candidate angles closer than this are merged into one ray (radians).
    pub angle_merge_epsilon: f64,
    /// Consecutive polygon vertices closer than this collapse into one.
    pub distance_epsilon: f64,
    /// Fan triangles with a signed area below this are dropped.
    pub area_epsilon: f64,
    /// Slack on the segment parameter when a ray lands on an endpoint.
    pub endpoint_tolerance: f64,
    /// Angular step of the extra samples approximating a range-limited light's rim.
    pub range_arc_step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            angle_offset: 1e-4,
            angle_merge_epsilon: 1e-9,
            distance_epsilon: 0.05,
            area_epsilon: 1e-6,
            endpoint_tolerance: 1e-9,
            range_arc_step: PI / 32.0,
        }
    }
}

impl SweepConfig {
    /// Checks every tolerance is positive, the rim step is at least
    /// [`MIN_RANGE_ARC_STEP`] and the offset exceeds the merge epsilon.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("angle_offset", self.angle_offset),
            ("angle_merge_epsilon", self.angle_merge_epsilon),
            ("distance_epsilon", self.distance_epsilon),
            ("area_epsilon", self.area_epsilon),
            ("endpoint_tolerance", self.endpoint_tolerance),
            ("range_arc_step", self.range_arc_step),
        ];
        for (name, value) in fields {
            ensure_positive(name, value)?;
        }
        if self.range_arc_step < MIN_RANGE_ARC_STEP {
            return Err(ConfigError::InvalidValue {
                name: "range_arc_step",
                value: self.range_arc_step,
            }
            .into());
        }
        if self.angle_offset <= self.angle_merge_epsilon {
            return Err(ConfigError::InvalidValue {
                name: "angle_offset",
                value: self.angle_offset,
            }
            .into());
        }
        Ok(())
    }
}

/// Startup configuration for a lit scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Width of the enclosing boundary rectangle, anchored at the origin.
    pub width: f64,
    /// Height of the enclosing boundary rectangle, anchored at the origin.
    pub height: f64,
    /// Number of independent lights swept every frame.
    pub lights_count: usize,
    /// Angular width given to lights that do not set one (radians).
    pub default_arc_angle: f64,
    /// Keep the raw per-angle hits for a ray overlay.
    pub show_rays: bool,
    pub sweep: SweepConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            lights_count: 1,
            default_arc_angle: TAU,
            show_rays: false,
            sweep: SweepConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` when validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// The enclosing rectangle, anchored at the origin.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        Boundary::from_size(self.width, self.height)
    }

    /// A light at `position` with the configured default arc, facing +x.
    #[must_use]
    pub fn light_at(&self, position: Point2) -> LightState {
        LightState::new(position).with_cone(self.default_arc_angle, 0.0)
    }

    /// Validates dimensions, light settings and the nested sweep tolerances.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self) -> Result<()> {
        ensure_positive("width", self.width)?;
        ensure_positive("height", self.height)?;
        if self.lights_count == 0 {
            return Err(ConfigError::InvalidValue {
                name: "lights_count",
                value: self.lights_count as f64,
            }
            .into());
        }
        if !(self.default_arc_angle > 0.0 && self.default_arc_angle <= TAU) {
            return Err(ConfigError::InvalidValue {
                name: "default_arc_angle",
                value: self.default_arc_angle,
            }
            .into());
        }
        self.sweep.validate()
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { name, value }.into())
    }
}
