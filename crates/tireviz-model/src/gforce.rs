//! Raw acceleration to g-force conversion and the indicator display mapping.

use serde::{Deserialize, Serialize};

use crate::color::{IndicatorScale, Rgb};

/// Standard gravity as used by the simulator feed (m/s²).
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Load axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Side to side
    Lateral,
    /// Fore and aft
    Longitudinal,
}

/// Car velocity components (m/s). Absent channels are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Velocity along the car's x axis
    pub x: f32,
    /// Velocity along the car's y axis
    pub y: f32,
    /// Velocity along the car's z axis
    pub z: f32,
}

/// Acceleration in g. Longitudinal is positive under braking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedGForce {
    /// Lateral g
    pub lateral: f32,
    /// Longitudinal g, forward load transfer positive
    pub longitudinal: f32,
}

impl NormalizedGForce {
    /// Build a reading directly from g values.
    pub const fn new(lateral: f32, longitudinal: f32) -> Self {
        Self {
            lateral,
            longitudinal,
        }
    }

    /// Value on one axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Lateral => self.lateral,
            Axis::Longitudinal => self.longitudinal,
        }
    }

    /// Combined magnitude.
    pub fn total(&self) -> f32 {
        self.lateral.hypot(self.longitudinal)
    }
}

/// Per-axis load magnitudes fed into the distributor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadMagnitudes {
    /// Lateral load magnitude
    pub lateral: f32,
    /// Longitudinal load magnitude
    pub longitudinal: f32,
}

/// Small velocity contribution added to the load magnitudes (scrub speed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityBias {
    /// Coefficient on `|velocity.x|` for the lateral magnitude
    pub lateral: f32,
    /// Coefficient on `|velocity.y|` for the longitudinal magnitude
    pub longitudinal: f32,
}

impl Default for VelocityBias {
    fn default() -> Self {
        Self {
            lateral: 0.001,
            longitudinal: 0.000_000_001,
        }
    }
}

/// Converts raw accelerations into g and derives load magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GForceNormalizer {
    gravity: f32,
    bias: VelocityBias,
}

impl Default for GForceNormalizer {
    fn default() -> Self {
        Self::new(STANDARD_GRAVITY, VelocityBias::default())
    }
}

impl GForceNormalizer {
    /// Create a normalizer. `gravity` must be positive.
    pub fn new(gravity: f32, bias: VelocityBias) -> Self {
        Self { gravity, bias }
    }

    /// Divide by gravity and flip the longitudinal sign. No clamping.
    pub fn normalize(&self, raw_lateral: f32, raw_longitudinal: f32) -> NormalizedGForce {
        NormalizedGForce {
            lateral: raw_lateral / self.gravity,
            longitudinal: -(raw_longitudinal / self.gravity),
        }
    }

    /// Load magnitude on one axis with the velocity bias applied.
    pub fn load_magnitude(&self, g: NormalizedGForce, axis: Axis, velocity: Velocity) -> f32 {
        match axis {
            Axis::Lateral => g.lateral.abs() + velocity.x.abs() * self.bias.lateral,
            Axis::Longitudinal => {
                g.longitudinal.abs() + velocity.y.abs() * self.bias.longitudinal
            }
        }
    }

    /// Both magnitudes at once.
    pub fn load_magnitudes(&self, g: NormalizedGForce, velocity: Velocity) -> LoadMagnitudes {
        LoadMagnitudes {
            lateral: self.load_magnitude(g, Axis::Lateral, velocity),
            longitudinal: self.load_magnitude(g, Axis::Longitudinal, velocity),
        }
    }
}

/// Geometry of the g-ball circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// g value at the circle edge
    pub max_g: f32,
    /// Circle radius in display units
    pub radius: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_g: 3.0,
            radius: 90.0,
        }
    }
}

/// Indicator position relative to the circle center. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset, screen-down positive
    pub y: f32,
    /// Whether the point was pulled back onto the circle
    pub clamped: bool,
}

impl IndicatorPoint {
    /// Distance from the circle center.
    pub fn distance(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Maps a g reading onto the indicator circle and picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GForceDisplay {
    config: DisplayConfig,
    scale: IndicatorScale,
}

impl GForceDisplay {
    /// Create a display mapping.
    pub fn new(config: DisplayConfig, scale: IndicatorScale) -> Self {
        Self { config, scale }
    }

    /// Project onto the circle, clamping to the rim while keeping direction.
    ///
    /// The rim test runs in units of `max_g` and in `f64`, so any finite
    /// reading lands on or inside the circle.
    pub fn project(&self, g: NormalizedGForce) -> IndicatorPoint {
        let max_g = f64::from(self.config.max_g);
        let radius = f64::from(self.config.radius);
        let mut gx = f64::from(g.lateral) / max_g;
        let mut gy = -f64::from(g.longitudinal) / max_g;

        let distance = gx.hypot(gy);
        let clamped = distance > 1.0;
        if clamped {
            gx /= distance;
            gy /= distance;
        }

        IndicatorPoint {
            x: (gx * radius) as f32,
            y: (gy * radius) as f32,
            clamped,
        }
    }

    /// Indicator color, driven by lateral g only.
    pub fn color(&self, g: NormalizedGForce) -> Rgb {
        self.scale.color_for(g.lateral)
    }

    /// Circle geometry.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }
}
