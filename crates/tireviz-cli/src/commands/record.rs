//! Capture a synthetic scenario to a recording file.

use std::path::Path;

use anyhow::Result;
use tireviz_telemetry::{SampleRecorder, Scenario, ScenarioSource, TelemetrySource};

use crate::commands::run::frame_limit;
use crate::error::CliError;
use crate::output;

/// Generate `seconds` of `scenario` at `fps` and write it to `out`.
pub fn execute(scenario: Scenario, seconds: f32, fps: f32, out: &Path, json: bool) -> Result<()> {
    let frames = frame_limit(seconds, fps)?;
    if frames == 0 {
        return Err(CliError::InvalidArgument(format!(
            "{seconds} s at {fps} Hz produces no frames"
        ))
        .into());
    }

    let mut source = ScenarioSource::new(scenario, fps, Some(frames)).map_err(CliError::from)?;
    let mut recorder = SampleRecorder::new(out);
    recorder.start(source.source_id(), source.frame_rate());
    while let Some(frame) = source.poll() {
        recorder.record(frame);
    }

    let recording = recorder
        .stop(Some(format!("{scenario} for {seconds} s")))
        .map_err(CliError::from)?;
    output::print_recording_summary(&out.display().to_string(), &recording, json)?;
    Ok(())
}
