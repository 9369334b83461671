//! Per-tire wear accumulation.
//!
//! Each tire tracks three zones across its contact patch. Loads are added
//! with a direction-dependent weighting and every update is immediately
//! followed by an exponential decay step. A tire that receives no update
//! keeps its values: decay only runs inside [`TireState::update`].

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::color::{Rgb, ZoneHeatScale};

/// Retention factor for the persistent (canonical) wear model.
pub const PERSISTENT_RETENTION: f32 = 0.999_997;

/// Retention factor for the fast-cooling wear model.
pub const FAST_RETENTION: f32 = 0.9997;

/// Default history bound: about 25 minutes at 60 Hz.
pub const DEFAULT_HISTORY_CAPACITY: usize = 90_000;

/// One third of a tire's contact patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Inner third (drawn on the left)
    Inner,
    /// Middle third
    Center,
    /// Outer third (drawn on the right)
    Outer,
}

impl Zone {
    /// All zones in drawing order.
    pub const ALL: [Zone; 3] = [Zone::Inner, Zone::Center, Zone::Outer];

    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Inner => "inner",
            Zone::Center => "center",
            Zone::Outer => "outer",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way the load came from; selects the zone weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadDirection {
    /// Positive lateral g
    LateralPositive,
    /// Negative lateral g
    LateralNegative,
    /// Positive longitudinal g (braking, weight forward)
    LongitudinalPositive,
    /// Negative longitudinal g (acceleration, weight rearward)
    LongitudinalNegative,
    /// No direction known; uses the fallback weights and records history
    #[default]
    Unspecified,
}

/// Per-zone weight triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneWeights {
    /// Weight applied to the inner zone
    pub inner: f32,
    /// Weight applied to the center zone
    pub center: f32,
    /// Weight applied to the outer zone
    pub outer: f32,
}

impl ZoneWeights {
    /// Build a weight triple.
    pub const fn new(inner: f32, center: f32, outer: f32) -> Self {
        Self {
            inner,
            center,
            outer,
        }
    }

    /// Weight for one zone.
    pub fn get(&self, zone: Zone) -> f32 {
        match zone {
            Zone::Inner => self.inner,
            Zone::Center => self.center,
            Zone::Outer => self.outer,
        }
    }
}

/// Weight triples for every [`LoadDirection`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionWeights {
    /// Weights for [`LoadDirection::LateralPositive`]
    pub lateral_positive: ZoneWeights,
    /// Weights for [`LoadDirection::LateralNegative`]
    pub lateral_negative: ZoneWeights,
    /// Weights for [`LoadDirection::LongitudinalPositive`]
    pub longitudinal_positive: ZoneWeights,
    /// Weights for [`LoadDirection::LongitudinalNegative`]
    pub longitudinal_negative: ZoneWeights,
    /// Weights for [`LoadDirection::Unspecified`]
    pub unspecified: ZoneWeights,
}

impl Default for DirectionWeights {
    fn default() -> Self {
        let straight = ZoneWeights::new(0.000_02, 0.000_03, 0.000_02);
        Self {
            lateral_positive: ZoneWeights::new(0.000_030_5, 0.000_02, 0.000_015),
            lateral_negative: ZoneWeights::new(0.000_015, 0.000_02, 0.000_030_5),
            longitudinal_positive: straight,
            longitudinal_negative: straight,
            unspecified: straight,
        }
    }
}

impl DirectionWeights {
    /// Select the triple for a direction.
    pub fn for_direction(&self, direction: LoadDirection) -> ZoneWeights {
        match direction {
            LoadDirection::LateralPositive => self.lateral_positive,
            LoadDirection::LateralNegative => self.lateral_negative,
            LoadDirection::LongitudinalPositive => self.longitudinal_positive,
            LoadDirection::LongitudinalNegative => self.longitudinal_negative,
            LoadDirection::Unspecified => self.unspecified,
        }
    }

    fn all(&self) -> [ZoneWeights; 5] {
        [
            self.lateral_positive,
            self.lateral_negative,
            self.longitudinal_positive,
            self.longitudinal_negative,
            self.unspecified,
        ]
    }

    /// True when every weight is finite.
    pub fn is_finite(&self) -> bool {
        self.all()
            .iter()
            .all(|w| w.inner.is_finite() && w.center.is_finite() && w.outer.is_finite())
    }
}

/// Tuning shared by all four tires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TireConfig {
    /// Multiplier applied to every zone on each decay step.
    pub decay_retention: f32,
    /// Maximum number of history entries kept.
    pub history_capacity: usize,
    /// Zone weighting per load direction.
    pub weights: DirectionWeights,
    /// Heat-to-color mapping.
    pub heat_scale: ZoneHeatScale,
}

impl Default for TireConfig {
    fn default() -> Self {
        Self {
            decay_retention: PERSISTENT_RETENTION,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            weights: DirectionWeights::default(),
            heat_scale: ZoneHeatScale::default(),
        }
    }
}

/// Accumulated wear of one tire.
#[derive(Debug, Clone)]
pub struct TireState {
    inner: f32,
    center: f32,
    outer: f32,
    history: VecDeque<f32>,
    config: TireConfig,
}

impl Default for TireState {
    fn default() -> Self {
        Self::new(TireConfig::default())
    }
}

impl TireState {
    /// Create a cold tire.
    pub fn new(config: TireConfig) -> Self {
        Self {
            inner: 0.0,
            center: 0.0,
            outer: 0.0,
            history: VecDeque::new(),
            config,
        }
    }

    /// Apply one load sample, then decay.
    ///
    /// Magnitudes are not validated; negative loads are possible after
    /// routing offsets and simply pull zones down before the clamp.
    pub fn update(&mut self, load: f32, direction: LoadDirection) {
        let weights = self.config.weights.for_direction(direction);
        self.inner += load * weights.inner;
        self.center += load * weights.center;
        self.outer += load * weights.outer;

        if direction == LoadDirection::Unspecified {
            self.history.push_back(load);
        }
        while self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }

        self.decay();
    }

    /// Relax every zone toward zero and clamp into `[0, 1]`.
    pub fn decay(&mut self) {
        let retention = self.config.decay_retention;
        for value in [&mut self.inner, &mut self.center, &mut self.outer] {
            *value = (*value * retention).clamp(0.0, 1.0);
        }
    }

    /// Zero all zones and drop the history.
    pub fn reset(&mut self) {
        self.inner = 0.0;
        self.center = 0.0;
        self.outer = 0.0;
        self.history.clear();
    }

    /// Current value of one zone.
    pub fn zone(&self, zone: Zone) -> f32 {
        match zone {
            Zone::Inner => self.inner,
            Zone::Center => self.center,
            Zone::Outer => self.outer,
        }
    }

    /// Inner zone value.
    pub fn inner(&self) -> f32 {
        self.inner
    }

    /// Center zone value.
    pub fn center(&self) -> f32 {
        self.center
    }

    /// Outer zone value.
    pub fn outer(&self) -> f32 {
        self.outer
    }

    /// Display color for one zone.
    pub fn color_for(&self, zone: Zone) -> Rgb {
        self.config.heat_scale.color_for(self.zone(zone))
    }

    /// Recorded load magnitudes, oldest first.
    pub fn history(&self) -> &VecDeque<f32> {
        &self.history
    }

    /// Tuning this tire was built with.
    pub fn config(&self) -> &TireConfig {
        &self.config
    }

    /// Copy of the current zone values.
    pub fn snapshot(&self) -> TireSnapshot {
        TireSnapshot {
            inner: self.inner,
            center: self.center,
            outer: self.outer,
            colors: Zone::ALL.map(|zone| self.color_for(zone)),
            history_len: self.history.len(),
        }
    }
}

/// Read-only view of a tire for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireSnapshot {
    /// Inner zone value
    pub inner: f32,
    /// Center zone value
    pub center: f32,
    /// Outer zone value
    pub outer: f32,
    /// Zone colors in [`Zone::ALL`] order
    pub colors: [Rgb; 3],
    /// Number of retained history entries
    pub history_len: usize,
}

/// Wheel position on the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TirePosition {
    /// Front left
    FrontLeft,
    /// Front right
    FrontRight,
    /// Rear left
    RearLeft,
    /// Rear right
    RearRight,
}

impl TirePosition {
    /// All positions in display order.
    pub const ALL: [TirePosition; 4] = [
        TirePosition::FrontLeft,
        TirePosition::FrontRight,
        TirePosition::RearLeft,
        TirePosition::RearRight,
    ];

    /// Two-letter label.
    pub fn label(&self) -> &'static str {
        match self {
            TirePosition::FrontLeft => "LF",
            TirePosition::FrontRight => "RF",
            TirePosition::RearLeft => "LR",
            TirePosition::RearRight => "RR",
        }
    }

    /// Whether this is a front wheel.
    pub fn is_front(&self) -> bool {
        matches!(self, TirePosition::FrontLeft | TirePosition::FrontRight)
    }

    /// Whether this wheel is on the left side.
    pub fn is_left(&self) -> bool {
        matches!(self, TirePosition::FrontLeft | TirePosition::RearLeft)
    }
}

impl fmt::Display for TirePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four tires of the car.
#[derive(Debug, Clone, Default)]
pub struct TireSet {
    front_left: TireState,
    front_right: TireState,
    rear_left: TireState,
    rear_right: TireState,
}

impl TireSet {
    /// Four cold tires sharing one configuration.
    pub fn new(config: TireConfig) -> Self {
        Self {
            front_left: TireState::new(config),
            front_right: TireState::new(config),
            rear_left: TireState::new(config),
            rear_right: TireState::new(config),
        }
    }

    /// Tire at a position.
    pub fn get(&self, position: TirePosition) -> &TireState {
        match position {
            TirePosition::FrontLeft => &self.front_left,
            TirePosition::FrontRight => &self.front_right,
            TirePosition::RearLeft => &self.rear_left,
            TirePosition::RearRight => &self.rear_right,
        }
    }

    /// Mutable tire at a position.
    pub fn get_mut(&mut self, position: TirePosition) -> &mut TireState {
        match position {
            TirePosition::FrontLeft => &mut self.front_left,
            TirePosition::FrontRight => &mut self.front_right,
            TirePosition::RearLeft => &mut self.rear_left,
            TirePosition::RearRight => &mut self.rear_right,
        }
    }

    /// Iterate positions with their tires.
    pub fn iter(&self) -> impl Iterator<Item = (TirePosition, &TireState)> {
        TirePosition::ALL
            .into_iter()
            .map(move |position| (position, self.get(position)))
    }

    /// Reset all four tires.
    pub fn reset_all(&mut self) {
        for position in TirePosition::ALL {
            self.get_mut(position).reset();
        }
    }
}
