//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;
use tireviz_model::{ModelConfig, Rgb, SessionSnapshot, TirePosition, TireSnapshot};
use tireviz_telemetry::Recording;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidArgument(_)) => "invalid_argument",
        Some(CliError::Config(_)) => "config",
        Some(CliError::Telemetry(_)) => "telemetry",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        None => "unknown",
    }
}

#[derive(Debug, Serialize)]
struct SnapshotLine<'a> {
    source: &'a str,
    connected: bool,
    snapshot: &'a SessionSnapshot,
}

/// Print one session snapshot. JSON mode emits one compact object per line.
pub fn print_snapshot(
    source: &str,
    connected: bool,
    snapshot: &SessionSnapshot,
    json: bool,
) -> Result<(), CliError> {
    if json {
        let line = SnapshotLine {
            source,
            connected,
            snapshot,
        };
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    let state = if connected {
        "connected".green()
    } else {
        "disconnected".red()
    };
    println!(
        "{} {} ({} applied, {})",
        "Tick".bold(),
        snapshot.tick,
        snapshot.applied_ticks,
        state
    );
    println!(
        "  G: lat {:+.3} long {:+.3}  indicator ({:.1}, {:.1}){}  {}",
        snapshot.gforce.lateral,
        snapshot.gforce.longitudinal,
        snapshot.indicator.x,
        snapshot.indicator.y,
        if snapshot.indicator.clamped { " clamped" } else { "" },
        paint(&snapshot.indicator_color.to_string(), snapshot.indicator_color)
    );
    for position in TirePosition::ALL {
        print_tire(position, snapshot.tire(position));
    }
    Ok(())
}

fn print_tire(position: TirePosition, tire: &TireSnapshot) {
    let [inner, center, outer] = tire.colors;
    println!(
        "  {}  inner {}  center {}  outer {}  history {}",
        position.label().bold(),
        paint(&format!("{:.6}", tire.inner), inner),
        paint(&format!("{:.6}", tire.center), center),
        paint(&format!("{:.6}", tire.outer), outer),
        tire.history_len
    );
}

fn paint(text: &str, color: Rgb) -> ColoredString {
    text.truecolor(color.r, color.g, color.b)
}

/// Print the result of a `record` run.
pub fn print_recording_summary(path: &str, recording: &Recording, json: bool) -> Result<(), CliError> {
    let meta = &recording.metadata;
    if json {
        let output = json!({
            "success": true,
            "recording": {
                "path": path,
                "source_id": meta.source_id,
                "fps": meta.fps,
                "frames": meta.frame_count,
                "duration_seconds": meta.duration_seconds,
                "connected_ratio": recording.connected_ratio(),
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} frames from {} to {}",
            "Recorded".green().bold(),
            meta.frame_count,
            meta.source_id,
            path
        );
        println!(
            "  {:.1} s at {} Hz, {:.0}% connected",
            meta.duration_seconds,
            meta.fps,
            recording.connected_ratio() * 100.0
        );
    }
    Ok(())
}

/// Print the effective model configuration.
pub fn print_config(config: &ModelConfig, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", config.to_yaml()?);
    }
    Ok(())
}
