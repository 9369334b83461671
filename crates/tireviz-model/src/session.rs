//! Session controller: owns the four tires and drives one tick at a time.
//!
//! The session is a plain value owned by the caller. Ticks and resets both
//! take `&mut self`, so a reset can never interleave with an update.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::color::Rgb;
use crate::config::ModelConfig;
use crate::distributor::{LoadDistributor, RoutingPlan};
use crate::error::ConfigError;
use crate::gforce::{
    GForceDisplay, GForceNormalizer, IndicatorPoint, LoadMagnitudes, NormalizedGForce,
};
use crate::sample::TelemetrySample;
use crate::tire::{TirePosition, TireSet, TireSnapshot};

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Telemetry was disconnected; nothing changed.
    Skipped,
    /// The sample was applied.
    Applied {
        /// Normalized reading for this tick
        gforce: NormalizedGForce,
        /// Load magnitudes fed to the distributor
        magnitudes: LoadMagnitudes,
        /// Tire updates performed
        plan: RoutingPlan,
    },
}

impl TickOutcome {
    /// Whether the model was updated.
    pub fn is_applied(&self) -> bool {
        matches!(self, TickOutcome::Applied { .. })
    }
}

/// Everything the presentation layer reads after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Ticks processed, including skipped ones
    pub tick: u64,
    /// Ticks that updated the model
    pub applied_ticks: u64,
    /// Front left tire
    pub front_left: TireSnapshot,
    /// Front right tire
    pub front_right: TireSnapshot,
    /// Rear left tire
    pub rear_left: TireSnapshot,
    /// Rear right tire
    pub rear_right: TireSnapshot,
    /// Last applied g reading
    pub gforce: NormalizedGForce,
    /// Clamped indicator position
    pub indicator: IndicatorPoint,
    /// Indicator color
    pub indicator_color: Rgb,
}

impl SessionSnapshot {
    /// Tire snapshot at a position.
    pub fn tire(&self, position: TirePosition) -> &TireSnapshot {
        match position {
            TirePosition::FrontLeft => &self.front_left,
            TirePosition::FrontRight => &self.front_right,
            TirePosition::RearLeft => &self.rear_left,
            TirePosition::RearRight => &self.rear_right,
        }
    }
}

/// Tire wear and g-force session.
#[derive(Debug, Clone)]
pub struct Session {
    config: ModelConfig,
    tires: TireSet,
    normalizer: GForceNormalizer,
    distributor: LoadDistributor,
    display: GForceDisplay,
    gforce: NormalizedGForce,
    tick: u64,
    applied_ticks: u64,
    resets: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl Session {
    /// Start a session with cold tires.
    ///
    /// The configuration is used as given; see [`try_new`](Self::try_new)
    /// for a validated start.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            tires: TireSet::new(config.tire),
            normalizer: GForceNormalizer::new(config.gravity, config.velocity_bias),
            distributor: LoadDistributor::new(config.routing),
            display: GForceDisplay::new(config.display, config.indicator),
            gforce: NormalizedGForce::default(),
            tick: 0,
            applied_ticks: 0,
            resets: 0,
            config,
        }
    }

    /// Validate `config`, then start a session with cold tires.
    pub fn try_new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Run one tick. When `connected` is false the state is left as is.
    pub fn tick(&mut self, connected: bool, sample: &TelemetrySample) -> TickOutcome {
        self.tick += 1;

        if !connected {
            debug!(tick = self.tick, "Telemetry disconnected, holding state");
            return TickOutcome::Skipped;
        }

        let gforce = self
            .normalizer
            .normalize(sample.lateral(), sample.longitudinal());
        let magnitudes = self.normalizer.load_magnitudes(gforce, sample.velocity());
        let plan = self.distributor.distribute(gforce, magnitudes, &mut self.tires);

        self.gforce = gforce;
        self.applied_ticks += 1;

        trace!(
            tick = self.tick,
            lat_g = gforce.lateral,
            long_g = gforce.longitudinal,
            updates = plan.len(),
            "Applied tick"
        );

        TickOutcome::Applied {
            gforce,
            magnitudes,
            plan,
        }
    }

    /// Zero all four tires. The last g reading is kept.
    pub fn reset(&mut self) {
        self.tires.reset_all();
        self.resets += 1;
        info!(tick = self.tick, resets = self.resets, "Tires reset");
    }

    /// Read-only view of the tires.
    pub fn tires(&self) -> &TireSet {
        &self.tires
    }

    /// Last applied g reading.
    pub fn gforce(&self) -> NormalizedGForce {
        self.gforce
    }

    /// Clamped indicator position for the last reading.
    pub fn indicator(&self) -> IndicatorPoint {
        self.display.project(self.gforce)
    }

    /// Indicator color for the last reading.
    pub fn indicator_color(&self) -> Rgb {
        self.display.color(self.gforce)
    }

    /// Ticks processed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Ticks that changed the model.
    pub fn applied_ticks(&self) -> u64 {
        self.applied_ticks
    }

    /// Number of resets performed.
    pub fn reset_count(&self) -> u64 {
        self.resets
    }

    /// Configuration in use.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Snapshot for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tick: self.tick,
            applied_ticks: self.applied_ticks,
            front_left: self.tires.get(TirePosition::FrontLeft).snapshot(),
            front_right: self.tires.get(TirePosition::FrontRight).snapshot(),
            rear_left: self.tires.get(TirePosition::RearLeft).snapshot(),
            rear_right: self.tires.get(TirePosition::RearRight).snapshot(),
            gforce: self.gforce,
            indicator: self.indicator(),
            indicator_color: self.indicator_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tire::{LoadDirection, PERSISTENT_RETENTION, Zone};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_one_g_lateral_scenario() -> TestResult {
        let mut session = Session::default();
        let outcome = session.tick(true, &TelemetrySample::from_accel(9.81, 0.0));

        let TickOutcome::Applied { gforce, plan, .. } = outcome else {
            return Err("tick should apply while connected".into());
        };
        assert_eq!(gforce.lateral, 1.0);
        assert_eq!(gforce.longitudinal, 0.0);
        assert_eq!(plan.len(), 2);
        assert!(
            plan.iter()
                .all(|l| l.direction == LoadDirection::LateralPositive
                    && !l.position.is_left())
        );

        let r = PERSISTENT_RETENTION;
        let front = session.tires().get(TirePosition::FrontRight);
        assert!((front.inner() - 1.001 * 0.000_030_5 * r).abs() < 1e-9);
        assert!((front.center() - 1.001 * 0.000_02 * r).abs() < 1e-9);
        assert!((front.outer() - 1.001 * 0.000_015 * r).abs() < 1e-9);

        let rear = session.tires().get(TirePosition::RearRight);
        assert!((rear.inner() - 0.9 * 0.000_030_5 * r).abs() < 1e-9);
        for zone in Zone::ALL {
            assert!(rear.zone(zone) > 0.0);
            assert!(session.tires().get(TirePosition::FrontLeft).zone(zone) <= 0.0);
            assert!(session.tires().get(TirePosition::RearLeft).zone(zone) <= 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_disconnected_tick_freezes_state() -> TestResult {
        let mut session = Session::default();
        session.tick(true, &TelemetrySample::from_accel(-12.0, 6.0));
        let before = session.snapshot();

        let outcome = session.tick(false, &TelemetrySample::from_accel(30.0, -30.0));
        assert_eq!(outcome, TickOutcome::Skipped);

        let after = session.snapshot();
        assert_eq!(after.tick, before.tick + 1);
        assert_eq!(after.applied_ticks, before.applied_ticks);
        assert_eq!(after.gforce, before.gforce);
        assert_eq!(after.front_left, before.front_left);
        assert_eq!(after.rear_right, before.rear_right);
        Ok(())
    }

    #[test]
    fn test_empty_sample_routes_nothing() -> TestResult {
        let mut session = Session::default();
        let outcome = session.tick(true, &TelemetrySample::default());
        let TickOutcome::Applied { plan, .. } = outcome else {
            return Err("tick should apply while connected".into());
        };
        assert!(plan.is_empty());
        assert_eq!(session.applied_ticks(), 1);
        Ok(())
    }

    #[test]
    fn test_reset_zeroes_tires_keeps_gforce() -> TestResult {
        let mut session = Session::default();
        for _ in 0..600 {
            session.tick(true, &TelemetrySample::from_accel(15.0, -9.0));
        }
        assert!(session.tires().iter().any(|(_, t)| t.inner() > 0.0));

        session.reset();
        assert_eq!(session.reset_count(), 1);
        for (_, tire) in session.tires().iter() {
            for zone in Zone::ALL {
                assert_eq!(tire.zone(zone), 0.0);
                assert_eq!(tire.color_for(zone), Rgb::INACTIVE);
            }
        }
        assert!(session.gforce().lateral > 1.0);
        Ok(())
    }

    #[test]
    fn test_snapshot_indicator_is_clamped() -> TestResult {
        let mut session = Session::default();
        session.tick(true, &TelemetrySample::from_accel(9.81 * 5.0, 0.0));
        let snapshot = session.snapshot();
        assert!(snapshot.indicator.clamped);
        assert!((snapshot.indicator.x - 90.0).abs() < 1e-3);
        assert_eq!(snapshot.indicator_color, Rgb::RED);
        assert_eq!(
            snapshot.tire(TirePosition::FrontRight),
            &session.tires().get(TirePosition::FrontRight).snapshot()
        );
        Ok(())
    }

    #[test]
    fn test_huge_finite_sample_keeps_indicator_on_rim() -> TestResult {
        let mut session = Session::default();
        session.tick(true, &TelemetrySample::from_accel(f32::MAX, 0.0));
        let indicator = session.snapshot().indicator;
        assert!(indicator.clamped);
        assert!(indicator.x.is_finite() && indicator.y.is_finite());
        assert!((indicator.x - 90.0).abs() < 1e-3);
        assert_eq!(indicator.y, 0.0);
        Ok(())
    }

    #[test]
    fn test_try_new_rejects_invalid_display() -> TestResult {
        let mut config = ModelConfig::default();
        config.display.max_g = 0.0;
        assert!(matches!(
            Session::try_new(config),
            Err(ConfigError::OutOfRange { field: "display.max_g", .. })
        ));
        assert_eq!(Session::try_new(ModelConfig::default())?.tick_count(), 0);
        Ok(())
    }

    #[test]
    fn test_snapshot_serializes() -> TestResult {
        let mut session = Session::default();
        session.tick(true, &TelemetrySample::from_accel(3.0, 2.0).with_velocity(20.0, 1.0, 0.0));
        let json = serde_json::to_string(&session.snapshot())?;
        let decoded: SessionSnapshot = serde_json::from_str(&json)?;
        assert_eq!(decoded.tick, 1);
        assert_eq!(decoded.indicator_color, session.indicator_color());
        Ok(())
    }
}
