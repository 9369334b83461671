//! Model configuration.
//!
//! Every tunable constant of the model lives here: decay rate, history
//! bound, zone weights, color thresholds, velocity bias and routing
//! offsets. All fields default to the canonical tuning so a partial YAML
//! or JSON document only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::color::IndicatorScale;
use crate::distributor::RoutingOffsets;
use crate::error::ConfigError;
use crate::gforce::{DisplayConfig, STANDARD_GRAVITY, VelocityBias};
use crate::tire::{FAST_RETENTION, PERSISTENT_RETENTION, TireConfig};

/// Named decay presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayProfile {
    /// Slow decay, wear persists for the whole session
    #[default]
    Persistent,
    /// Fast decay, zones cool within seconds of load
    Fast,
}

impl DecayProfile {
    /// Retention factor for this profile.
    pub fn retention(&self) -> f32 {
        match self {
            DecayProfile::Persistent => PERSISTENT_RETENTION,
            DecayProfile::Fast => FAST_RETENTION,
        }
    }
}

/// Complete model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Gravitational acceleration used for normalization
    pub gravity: f32,
    /// Tire accumulation tuning
    pub tire: TireConfig,
    /// Velocity contribution to load magnitudes
    pub velocity_bias: VelocityBias,
    /// Per-tire routing offsets
    pub routing: RoutingOffsets,
    /// G-ball circle geometry
    pub display: DisplayConfig,
    /// G-ball color thresholds
    pub indicator: IndicatorScale,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            tire: TireConfig::default(),
            velocity_bias: VelocityBias::default(),
            routing: RoutingOffsets::default(),
            display: DisplayConfig::default(),
            indicator: IndicatorScale::default(),
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value, min, max))
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(
            field,
            value,
            f32::MIN_POSITIVE,
            f32::MAX,
        ))
    }
}

impl ModelConfig {
    /// Default configuration with a decay preset applied.
    pub fn with_decay(profile: DecayProfile) -> Self {
        let mut config = Self::default();
        config.tire.decay_retention = profile.retention();
        config
    }

    /// Check every value; the first violation is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("gravity", self.gravity)?;

        check_positive("tire.decay_retention", self.tire.decay_retention)?;
        check_range("tire.decay_retention", self.tire.decay_retention, 0.0, 1.0)?;
        if self.tire.history_capacity == 0 {
            return Err(ConfigError::out_of_range(
                "tire.history_capacity",
                0,
                1,
                usize::MAX,
            ));
        }
        if !self.tire.weights.is_finite() {
            return Err(ConfigError::ConstraintViolation(
                "tire.weights must all be finite".to_string(),
            ));
        }

        let heat = &self.tire.heat_scale;
        check_range("tire.heat_scale.inactive_below", heat.inactive_below, 0.0, 1.0)?;
        if heat.inactive_below >= 1.0 {
            return Err(ConfigError::ConstraintViolation(
                "tire.heat_scale.inactive_below must be below 1.0".to_string(),
            ));
        }
        check_positive("tire.heat_scale.midpoint", heat.midpoint)?;
        if heat.midpoint >= 1.0 {
            return Err(ConfigError::out_of_range(
                "tire.heat_scale.midpoint",
                heat.midpoint,
                f32::MIN_POSITIVE,
                1.0,
            ));
        }

        if !(self.velocity_bias.lateral.is_finite() && self.velocity_bias.longitudinal.is_finite())
        {
            return Err(ConfigError::ConstraintViolation(
                "velocity_bias coefficients must be finite".to_string(),
            ));
        }
        if !self.routing.is_finite() {
            return Err(ConfigError::ConstraintViolation(
                "routing offsets must be finite".to_string(),
            ));
        }

        check_positive("display.max_g", self.display.max_g)?;
        check_positive("display.radius", self.display.radius)?;

        check_positive("indicator.yellow_at", self.indicator.yellow_at)?;
        check_positive("indicator.red_at", self.indicator.red_at)?;
        if self.indicator.red_at <= self.indicator.yellow_at {
            return Err(ConfigError::ConstraintViolation(format!(
                "indicator.red_at ({}) must be greater than indicator.yellow_at ({})",
                self.indicator.red_at, self.indicator.yellow_at
            )));
        }

        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(path = %path.display(), retention = config.tire.decay_retention, "Loaded model config");
        Ok(config)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
