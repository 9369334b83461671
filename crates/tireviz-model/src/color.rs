//! Display colors for tire zones and the g-force indicator.
//!
//! Both scales are two-segment green → yellow → red gradients with the blue
//! channel fixed at zero. Channel values are truncated toward zero and
//! saturate to `[0, 255]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Build a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Dim gray used for zones below the heat threshold.
    pub const INACTIVE: Rgb = Rgb::new(50, 50, 50);

    /// Indicator color when there is no lateral load at all.
    pub const NEUTRAL: Rgb = Rgb::new(50, 50, 50);

    /// Pure green, start of both gradients.
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);

    /// Pure yellow, the gradient midpoint.
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    /// Pure red, end of both gradients.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Scale a ratio in `[0, 1]` to a color channel.
#[inline]
fn channel(ratio: f32) -> u8 {
    let scaled = 255.0 * ratio;
    if scaled.is_nan() {
        return 0;
    }
    // Truncation is intended: 127.5 maps to 127.
    scaled.clamp(0.0, 255.0) as u8
}

/// Shared two-segment ramp: green → yellow over `[start, mid]`, yellow → red
/// over `(mid, end]`.
#[inline]
fn ramp(value: f32, start: f32, mid: f32, end: f32) -> Rgb {
    if value <= mid {
        let ratio = (value - start) / (mid - start);
        Rgb::new(channel(ratio), 255, 0)
    } else {
        let ratio = (value - mid) / (end - mid);
        Rgb::new(255, channel(1.0 - ratio), 0)
    }
}

/// Heat scale for tire zone values.
///
/// Values below `inactive_below` render as [`Rgb::INACTIVE`]. From there the
/// red channel rises as `value / midpoint` with green held at 255, so the
/// first active color at the threshold is already a slightly yellowed
/// green. Above `midpoint` green falls linearly to zero at `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneHeatScale {
    /// Zone values strictly below this render inactive.
    pub inactive_below: f32,
    /// Zone value at which the color is pure yellow.
    pub midpoint: f32,
}

impl Default for ZoneHeatScale {
    fn default() -> Self {
        Self {
            inactive_below: 0.10,
            midpoint: 0.5,
        }
    }
}

impl ZoneHeatScale {
    /// Map a zone value to its display color.
    pub fn color_for(&self, value: f32) -> Rgb {
        if value < self.inactive_below {
            return Rgb::INACTIVE;
        }
        let value = value.clamp(0.0, 1.0);
        ramp(value, 0.0, self.midpoint, 1.0)
    }

    /// Whether a zone value renders with an active (non-gray) color.
    pub fn is_active(&self, value: f32) -> bool {
        value >= self.inactive_below
    }
}

/// Color policy for the g-force indicator dot.
///
/// A continuous gradient over `|lateral|` in g: exactly zero is
/// [`Rgb::NEUTRAL`], `(0, yellow_at]` runs green → yellow and
/// `(yellow_at, red_at]` runs yellow → red. Anything beyond `red_at` is red.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorScale {
    /// Lateral g at which the dot is pure yellow.
    pub yellow_at: f32,
    /// Lateral g at which the dot is pure red.
    pub red_at: f32,
}

impl Default for IndicatorScale {
    fn default() -> Self {
        Self {
            yellow_at: 0.5,
            red_at: 1.5,
        }
    }
}

impl IndicatorScale {
    /// Color for a lateral g reading. Only the magnitude matters.
    pub fn color_for(&self, lateral: f32) -> Rgb {
        let magnitude = lateral.abs();
        if magnitude <= 0.0 || magnitude.is_nan() {
            return Rgb::NEUTRAL;
        }
        ramp(magnitude.min(self.red_at), 0.0, self.yellow_at, self.red_at)
    }
}
