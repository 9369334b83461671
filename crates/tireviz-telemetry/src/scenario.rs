//! Synthetic driving scenarios.
//!
//! Raw samples follow the simulator's conventions: lateral acceleration is
//! positive to the left, longitudinal acceleration is negative under
//! braking, `velocity_x` is forward speed.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;
use tireviz_model::TelemetrySample;

use crate::recording::{RecordedFrame, Recording, RecordingMetadata};
use crate::{TelemetryError, TelemetrySource};

const G: f32 = 9.81;

/// Dropout cycle length (s) for sources without a frame limit.
const DROPOUT_PERIOD_SECONDS: f32 = 10.0;

/// Scripted driving pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Cruising with small steering corrections
    Straight,
    /// Repeated accelerate / brake cycles on a straight
    Braking,
    /// Sustained 1.5 g left turn
    LeftHander,
    /// Sustained 1.5 g right turn
    RightHander,
    /// Alternating left/right direction changes
    Chicane,
    /// Chicane with a telemetry dropout in the middle fifth of the run,
    /// or of every 10 s cycle when the run has no fixed length
    Dropout,
}

impl Scenario {
    /// All scenarios.
    pub const ALL: [Scenario; 6] = [
        Scenario::Straight,
        Scenario::Braking,
        Scenario::LeftHander,
        Scenario::RightHander,
        Scenario::Chicane,
        Scenario::Dropout,
    ];

    /// Kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Straight => "straight",
            Scenario::Braking => "braking",
            Scenario::LeftHander => "left-hander",
            Scenario::RightHander => "right-hander",
            Scenario::Chicane => "chicane",
            Scenario::Dropout => "dropout",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Scenario::Straight => "Straight-line cruise scenario",
            Scenario::Braking => "Accelerate and brake cycle scenario",
            Scenario::LeftHander => "Sustained left-hand corner scenario",
            Scenario::RightHander => "Sustained right-hand corner scenario",
            Scenario::Chicane => "Chicane direction change scenario",
            Scenario::Dropout => "Chicane with telemetry dropout scenario",
        }
    }

    /// Frame at time `t` seconds, `progress` in `[0, 1)`.
    fn frame_at(&self, t: f32, progress: f32) -> (bool, TelemetrySample) {
        match self {
            Scenario::Straight => {
                let lat = 0.05 * G * (TAU * t / 4.0).sin();
                (true, TelemetrySample::from_accel(lat, 0.0).with_velocity(50.0, 0.0, 0.0))
            }
            Scenario::Braking => {
                // 6 s cycle: 4 s on throttle, 1.5 s braking, 0.5 s coasting.
                let phase = t % 6.0;
                let long = if phase < 4.0 {
                    0.4 * G
                } else if phase < 5.5 {
                    -1.6 * G
                } else {
                    0.0
                };
                let speed = 20.0 + 40.0 * (phase / 4.0).min(1.0);
                (true, TelemetrySample::from_accel(0.0, long).with_velocity(speed, 0.0, 0.0))
            }
            Scenario::LeftHander => (
                true,
                TelemetrySample::from_accel(1.5 * G, 0.0).with_velocity(40.0, 0.0, 0.0),
            ),
            Scenario::RightHander => (
                true,
                TelemetrySample::from_accel(-1.5 * G, 0.0).with_velocity(40.0, 0.0, 0.0),
            ),
            Scenario::Chicane | Scenario::Dropout => {
                let lat = 1.4 * G * (TAU * t / 3.0).sin();
                let long = -0.3 * G * (TAU * t / 1.5).cos();
                let sample = TelemetrySample::from_accel(lat, long).with_velocity(35.0, 0.5, 0.0);
                let connected = !(*self == Scenario::Dropout && (0.4..0.6).contains(&progress));
                (connected, sample)
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == normalized)
            .ok_or_else(|| TelemetryError::UnknownScenario(s.to_string()))
    }
}

/// Builds recordings for scenarios.
#[derive(Debug)]
pub struct ScenarioGenerator;

impl ScenarioGenerator {
    /// Generate `duration_seconds * fps` frames.
    pub fn generate(
        scenario: Scenario,
        duration_seconds: f32,
        fps: f32,
    ) -> Result<Recording, TelemetryError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(TelemetryError::InvalidFrameRate(fps));
        }
        let frame_count = (duration_seconds.max(0.0) * fps) as usize;

        let frames = (0..frame_count)
            .map(|i| {
                let t = i as f32 / fps;
                let progress = i as f32 / frame_count as f32;
                let (connected, sample) = scenario.frame_at(t, progress);
                RecordedFrame {
                    tick: i as u64,
                    connected,
                    sample,
                }
            })
            .collect();

        Ok(Recording {
            metadata: RecordingMetadata {
                source_id: format!("scenario:{scenario}"),
                fps,
                frame_count,
                duration_seconds: f64::from(duration_seconds.max(0.0)),
                description: Some(scenario.description().to_string()),
            },
            frames,
        })
    }
}

/// Endless scenario source, one frame per poll.
#[derive(Debug)]
pub struct ScenarioSource {
    scenario: Scenario,
    source_id: String,
    fps: f32,
    tick: u64,
    limit: Option<u64>,
}

impl ScenarioSource {
    /// Source producing frames at `fps`, optionally stopping after `limit`.
    pub fn new(scenario: Scenario, fps: f32, limit: Option<u64>) -> Result<Self, TelemetryError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(TelemetryError::InvalidFrameRate(fps));
        }
        Ok(Self {
            scenario,
            source_id: format!("scenario:{scenario}"),
            fps,
            tick: 0,
            limit,
        })
    }
}

impl TelemetrySource for ScenarioSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn frame_rate(&self) -> f32 {
        self.fps
    }

    fn poll(&mut self) -> Option<RecordedFrame> {
        if self.limit.is_some_and(|limit| self.tick >= limit) {
            return None;
        }
        let t = self.tick as f32 / self.fps;
        let progress = match self.limit {
            Some(limit) => self.tick as f32 / limit as f32,
            None => (t / DROPOUT_PERIOD_SECONDS).fract(),
        };
        let (connected, sample) = self.scenario.frame_at(t, progress);
        let frame = RecordedFrame {
            tick: self.tick,
            connected,
            sample,
        };
        self.tick += 1;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_frame_count() -> TestResult {
        let recording = ScenarioGenerator::generate(Scenario::Chicane, 2.0, 60.0)?;
        assert_eq!(recording.metadata.frame_count, 120);
        assert_eq!(recording.frames.len(), 120);
        assert_eq!(recording.metadata.source_id, "scenario:chicane");
        Ok(())
    }

    #[test]
    fn test_dropout_has_disconnected_window() -> TestResult {
        let recording = ScenarioGenerator::generate(Scenario::Dropout, 10.0, 60.0)?;
        let ratio = recording.connected_ratio();
        assert!(ratio > 0.75 && ratio < 0.85, "ratio {ratio}");
        assert!(recording.frames.first().is_some_and(|f| f.connected));
        assert!(recording.frames.last().is_some_and(|f| f.connected));
        Ok(())
    }

    #[test]
    fn test_corner_signs() -> TestResult {
        let left = ScenarioGenerator::generate(Scenario::LeftHander, 1.0, 10.0)?;
        let right = ScenarioGenerator::generate(Scenario::RightHander, 1.0, 10.0)?;
        assert!(left.frames.iter().all(|f| f.sample.lateral() > 0.0));
        assert!(right.frames.iter().all(|f| f.sample.lateral() < 0.0));
        Ok(())
    }

    #[test]
    fn test_braking_has_both_phases() -> TestResult {
        let recording = ScenarioGenerator::generate(Scenario::Braking, 6.0, 60.0)?;
        assert!(recording.frames.iter().any(|f| f.sample.longitudinal() < -10.0));
        assert!(recording.frames.iter().any(|f| f.sample.longitudinal() > 3.0));
        Ok(())
    }

    #[test]
    fn test_invalid_fps_rejected() -> TestResult {
        assert!(matches!(
            ScenarioGenerator::generate(Scenario::Straight, 1.0, 0.0),
            Err(TelemetryError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            ScenarioSource::new(Scenario::Straight, f32::NAN, None),
            Err(TelemetryError::InvalidFrameRate(_))
        ));
        Ok(())
    }

    #[test]
    fn test_parse_names() -> TestResult {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>()?, scenario);
        }
        assert_eq!("Left_Hander".parse::<Scenario>()?, Scenario::LeftHander);
        assert!(matches!(
            "hairpin".parse::<Scenario>(),
            Err(TelemetryError::UnknownScenario(_))
        ));
        Ok(())
    }

    #[test]
    fn test_source_limit_and_ticks() -> TestResult {
        let mut source = ScenarioSource::new(Scenario::Straight, 60.0, Some(3))?;
        let ticks: Vec<u64> = std::iter::from_fn(|| source.poll()).map(|f| f.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert_eq!(source.poll(), None);
        Ok(())
    }

    #[test]
    fn test_unbounded_dropout_disconnects_periodically() -> TestResult {
        let mut source = ScenarioSource::new(Scenario::Dropout, 60.0, None)?;
        let frames: Vec<RecordedFrame> = (0..6000).filter_map(|_| source.poll()).collect();
        assert_eq!(frames.len(), 6000);

        let disconnected = frames.iter().filter(|f| !f.connected).count();
        assert!((1100..=1300).contains(&disconnected), "disconnected {disconnected}");

        // Each 10 s cycle has its own window: seconds 4 to 6, 14 to 16, ...
        for cycle in 0..10u64 {
            let start = cycle * 600;
            let frame_at = |offset: u64| frames.iter().find(|f| f.tick == start + offset);
            assert!(frame_at(60).is_some_and(|f| f.connected));
            assert!(frame_at(300).is_some_and(|f| !f.connected));
            assert!(frame_at(500).is_some_and(|f| f.connected));
        }
        Ok(())
    }

    #[test]
    fn test_source_matches_generator() -> TestResult {
        let recording = ScenarioGenerator::generate(Scenario::Dropout, 2.0, 30.0)?;
        let mut source = ScenarioSource::new(Scenario::Dropout, 30.0, Some(60))?;
        for expected in &recording.frames {
            let frame = source.poll().ok_or("source ended early")?;
            assert_eq!(&frame, expected);
        }
        Ok(())
    }
}
