//! Session loop shared by `replay` and `simulate`.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tireviz_model::{ModelConfig, Session};
use tireviz_telemetry::{
    ConnectionMonitor, ReplaySource, Scenario, ScenarioSource, TelemetrySource,
};
use tracing::{debug, info};

use crate::commands::RunArgs;
use crate::error::CliError;
use crate::output;

/// Totals from one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub applied: u64,
    pub resets: u64,
    pub printed: u64,
}

/// Replay a recording file.
pub fn replay(path: &Path, config: ModelConfig, args: &RunArgs, json: bool) -> Result<()> {
    let mut source = ReplaySource::from_file(path).map_err(CliError::from)?;
    info!(
        path = %path.display(),
        frames = source.len(),
        "Starting replay"
    );
    run(&mut source, config, args, json)?;
    Ok(())
}

/// Run a synthetic scenario.
pub fn simulate(
    scenario: Scenario,
    seconds: f32,
    fps: f32,
    config: ModelConfig,
    args: &RunArgs,
    json: bool,
) -> Result<()> {
    let frames = frame_limit(seconds, fps)?;
    let mut source = ScenarioSource::new(scenario, fps, Some(frames)).map_err(CliError::from)?;
    info!(%scenario, frames, fps, "Starting simulation");
    run(&mut source, config, args, json)?;
    Ok(())
}

/// Number of frames for a duration, rejecting nonsense input.
pub fn frame_limit(seconds: f32, fps: f32) -> Result<u64, CliError> {
    if !(seconds.is_finite() && seconds >= 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "--seconds must be a non-negative number, got {seconds}"
        )));
    }
    if !(fps.is_finite() && fps > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "--fps must be a positive number, got {fps}"
        )));
    }
    Ok((seconds * fps) as u64)
}

/// Poll `source` to exhaustion, ticking a fresh session once per frame.
pub fn run(
    source: &mut dyn TelemetrySource,
    config: ModelConfig,
    args: &RunArgs,
    json: bool,
) -> Result<RunSummary, CliError> {
    let mut session = Session::try_new(config)?;
    drive(source, &mut session, args, json)
}

/// Feed every frame of `source` into `session`.
///
/// A reset requested for tick N runs before tick N's update.
pub fn drive(
    source: &mut dyn TelemetrySource,
    session: &mut Session,
    args: &RunArgs,
    json: bool,
) -> Result<RunSummary, CliError> {
    let mut monitor = ConnectionMonitor::new(source.source_id());
    let reset_at: BTreeSet<u64> = args.reset_at.iter().copied().collect();
    let frame_period = Duration::try_from_secs_f32(1.0 / source.frame_rate()).unwrap_or_default();
    let mut summary = RunSummary::default();
    let mut last_printed = None;

    while let Some(frame) = source.poll() {
        let started = Instant::now();
        let tick = session.tick_count();

        if reset_at.contains(&tick) {
            session.reset();
            summary.resets += 1;
        }

        monitor.observe(frame.connected);
        session.tick(monitor.state().is_connected(), &frame.sample);

        if args
            .every
            .is_some_and(|every| session.tick_count() % every == 0)
        {
            output::print_snapshot(
                source.source_id(),
                monitor.state().is_connected(),
                &session.snapshot(),
                json,
            )?;
            summary.printed += 1;
            last_printed = Some(session.tick_count());
        }

        if args.realtime
            && let Some(remaining) = frame_period.checked_sub(started.elapsed())
        {
            std::thread::sleep(remaining);
        }
    }

    if last_printed != Some(session.tick_count()) {
        output::print_snapshot(
            source.source_id(),
            monitor.state().is_connected(),
            &session.snapshot(),
            json,
        )?;
        summary.printed += 1;
    }

    summary.ticks = session.tick_count();
    summary.applied = session.applied_ticks();
    debug!(
        ticks = summary.ticks,
        applied = summary.applied,
        resets = summary.resets,
        disconnections = monitor.disconnections(),
        "Run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tireviz_model::{TelemetrySample, TirePosition, Zone};
    use tireviz_telemetry::{RecordedFrame, Recording, RecordingMetadata, ScenarioGenerator};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_frame_limit_validation() -> TestResult {
        assert_eq!(frame_limit(2.0, 30.0)?, 60);
        assert_eq!(frame_limit(0.0, 30.0)?, 0);
        assert!(matches!(
            frame_limit(-1.0, 30.0),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            frame_limit(1.0, 0.0),
            Err(CliError::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn test_run_counts_ticks_and_resets() -> TestResult {
        let recording = ScenarioGenerator::generate(Scenario::Dropout, 1.0, 60.0)?;
        let disconnected = recording.frames.iter().filter(|f| !f.connected).count() as u64;
        let mut source = ReplaySource::new(recording);
        let args = RunArgs {
            reset_at: vec![10, 20, 10_000],
            every: Some(30),
            realtime: false,
        };

        let summary = run(&mut source, ModelConfig::default(), &args, true)?;
        assert_eq!(summary.ticks, 60);
        assert_eq!(summary.applied, 60 - disconnected);
        assert_eq!(summary.resets, 2);
        assert_eq!(summary.printed, 2);
        Ok(())
    }

    #[test]
    fn test_final_snapshot_always_printed() -> TestResult {
        let mut source = ScenarioSource::new(Scenario::Straight, 60.0, Some(7))?;
        let args = RunArgs {
            every: Some(5),
            ..RunArgs::default()
        };
        let summary = run(&mut source, ModelConfig::default(), &args, true)?;
        assert_eq!(summary.printed, 2);
        Ok(())
    }

    fn cornering_recording(left_frames: u64) -> Recording {
        // Lateral acceleration is positive to the left: negative loads the left tires.
        let mut frames: Vec<RecordedFrame> = (0..left_frames)
            .map(|tick| RecordedFrame {
                tick,
                connected: true,
                sample: TelemetrySample::from_accel(-14.7, 0.0),
            })
            .collect();
        frames.push(RecordedFrame {
            tick: left_frames,
            connected: true,
            sample: TelemetrySample::from_accel(14.7, 0.0),
        });
        Recording {
            metadata: RecordingMetadata {
                source_id: "cornering".to_string(),
                fps: 60.0,
                frame_count: frames.len(),
                duration_seconds: frames.len() as f64 / 60.0,
                description: None,
            },
            frames,
        }
    }

    #[test]
    fn test_reset_runs_before_that_ticks_update() -> TestResult {
        let mut source = ReplaySource::new(cornering_recording(59));
        let mut session = Session::default();
        let args = RunArgs {
            reset_at: vec![59],
            ..RunArgs::default()
        };

        let summary = drive(&mut source, &mut session, &args, true)?;
        assert_eq!(summary.ticks, 60);
        assert_eq!(summary.resets, 1);

        // Only the final right-hand update (plus its decay) survives the reset.
        for position in [TirePosition::FrontRight, TirePosition::RearRight] {
            let tire = session.tires().get(position);
            for zone in Zone::ALL {
                let value = tire.zone(zone);
                assert!(value > 0.0 && value < 1e-4, "{position} {zone}: {value}");
            }
        }
        for position in [TirePosition::FrontLeft, TirePosition::RearLeft] {
            let tire = session.tires().get(position);
            for zone in Zone::ALL {
                assert_eq!(tire.zone(zone), 0.0, "{position} {zone}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_without_reset_earlier_load_remains() -> TestResult {
        let mut source = ReplaySource::new(cornering_recording(59));
        let mut session = Session::default();
        drive(&mut source, &mut session, &RunArgs::default(), true)?;

        let left = session.tires().get(TirePosition::FrontLeft);
        assert!(left.outer() > 1e-3);
        Ok(())
    }

    #[test]
    fn test_run_rejects_invalid_config() -> TestResult {
        let mut source = ScenarioSource::new(Scenario::Straight, 60.0, Some(1))?;
        let mut config = ModelConfig::default();
        config.display.radius = -1.0;
        assert!(matches!(
            run(&mut source, config, &RunArgs::default(), true),
            Err(CliError::Config(_))
        ));
        Ok(())
    }
}
