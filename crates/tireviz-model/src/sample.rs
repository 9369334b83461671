//! Per-tick telemetry input.

use serde::{Deserialize, Serialize};

use crate::gforce::Velocity;

/// One raw read from the simulator. Every channel may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySample {
    /// Lateral acceleration (m/s²)
    pub lat_accel: Option<f32>,
    /// Longitudinal acceleration (m/s²)
    pub long_accel: Option<f32>,
    /// Velocity along x (m/s)
    pub velocity_x: Option<f32>,
    /// Velocity along y (m/s)
    pub velocity_y: Option<f32>,
    /// Velocity along z (m/s)
    pub velocity_z: Option<f32>,
}

/// Missing or non-finite channels read as zero.
#[inline]
fn or_zero(value: Option<f32>) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl TelemetrySample {
    /// Sample with only the two accelerations set.
    pub fn from_accel(lat_accel: f32, long_accel: f32) -> Self {
        Self {
            lat_accel: Some(lat_accel),
            long_accel: Some(long_accel),
            ..Self::default()
        }
    }

    /// Builder-style velocity setter.
    pub fn with_velocity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.velocity_x = Some(x);
        self.velocity_y = Some(y);
        self.velocity_z = Some(z);
        self
    }

    /// Lateral acceleration, zero when absent.
    pub fn lateral(&self) -> f32 {
        or_zero(self.lat_accel)
    }

    /// Longitudinal acceleration, zero when absent.
    pub fn longitudinal(&self) -> f32 {
        or_zero(self.long_accel)
    }

    /// Velocity with absent components zeroed.
    pub fn velocity(&self) -> Velocity {
        Velocity {
            x: or_zero(self.velocity_x),
            y: or_zero(self.velocity_y),
            z: or_zero(self.velocity_z),
        }
    }
}
